// src/routes.rs

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn router(app_state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login));

    let complaint_routes = Router::new()
        .route(
            "/api/complaints",
            post(handlers::complaints::create_complaint).get(handlers::complaints::list_complaints),
        )
        .route(
            "/api/complaints/{id}",
            patch(handlers::complaints::update_complaint),
        );

    let content_routes = Router::new()
        .route(
            "/api/faqs",
            get(handlers::content::list_faqs).post(handlers::content::create_faq),
        )
        .route(
            "/api/news",
            get(handlers::content::list_news).post(handlers::content::create_news),
        )
        .route("/api/contact", post(handlers::content::create_contact));

    // Combina tudo no router principal
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/health", get(|| async { "OK" }))
        .route("/test", get(handlers::health::store_status))
        .route("/api/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(auth_routes)
        .merge(complaint_routes)
        .merge(content_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
