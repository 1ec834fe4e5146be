// src/handlers/content.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppQuery},
    },
    config::AppState,
    models::content::{
        ContactMessage, CreateContactMessagePayload, CreateFaqPayload, CreateNewsPayload, Faq,
        FaqListQuery, News, NewsListQuery,
    },
};

// =============================================================================
//  FAQ
// =============================================================================

// GET /api/faqs
#[utoipa::path(
    get,
    path = "/api/faqs",
    tag = "Content",
    params(FaqListQuery),
    responses((status = 200, description = "FAQs", body = Vec<Faq>))
)]
pub async fn list_faqs(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<FaqListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let faqs = app_state.content_service.list_faqs(query.only_active).await?;

    Ok((StatusCode::OK, Json(faqs)))
}

// POST /api/faqs
#[utoipa::path(
    post,
    path = "/api/faqs",
    tag = "Content",
    request_body = CreateFaqPayload,
    responses((status = 201, description = "FAQ criada", body = Faq))
)]
pub async fn create_faq(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateFaqPayload>,
) -> Result<impl IntoResponse, AppError> {
    let faq = app_state.content_service.create_faq(payload).await?;

    Ok((StatusCode::CREATED, Json(faq)))
}

// =============================================================================
//  NOTÍCIAS
// =============================================================================

// GET /api/news
#[utoipa::path(
    get,
    path = "/api/news",
    tag = "Content",
    params(NewsListQuery),
    responses((status = 200, description = "Notícias", body = Vec<News>))
)]
pub async fn list_news(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<NewsListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let news = app_state
        .content_service
        .list_news(query.only_published, query.limit)
        .await?;

    Ok((StatusCode::OK, Json(news)))
}

// POST /api/news
#[utoipa::path(
    post,
    path = "/api/news",
    tag = "Content",
    request_body = CreateNewsPayload,
    responses((status = 201, description = "Notícia criada", body = News))
)]
pub async fn create_news(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateNewsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let news = app_state.content_service.create_news(payload).await?;

    Ok((StatusCode::CREATED, Json(news)))
}

// =============================================================================
//  CONTATO
// =============================================================================

// POST /api/contact
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Content",
    request_body = CreateContactMessagePayload,
    responses((status = 201, description = "Mensagem registrada", body = ContactMessage))
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateContactMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.content_service.create_contact_message(payload).await?;

    Ok((StatusCode::CREATED, Json(message)))
}
