// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Credit Card Complaint Portal API"),
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Complaints ---
        handlers::complaints::create_complaint,
        handlers::complaints::list_complaints,
        handlers::complaints::update_complaint,

        // --- Content ---
        handlers::content::list_faqs,
        handlers::content::create_faq,
        handlers::content::list_news,
        handlers::content::create_news,
        handlers::content::create_contact,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Health ---
        handlers::health::store_status,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::LoginResponse,

            // --- Complaints ---
            models::complaint::ComplaintCategory,
            models::complaint::ComplaintStatus,
            models::complaint::ComplaintPriority,
            models::complaint::ComplaintNote,
            models::complaint::Complaint,
            models::complaint::CreateComplaintPayload,
            models::complaint::UpdateComplaintPayload,

            // --- Content ---
            models::content::Faq,
            models::content::CreateFaqPayload,
            models::content::News,
            models::content::CreateNewsPayload,
            models::content::ContactMessage,
            models::content::CreateContactMessagePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,

            handlers::health::StoreStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e login"),
        (name = "Complaints", description = "Ciclo de vida das pengaduan"),
        (name = "Content", description = "FAQ, notícias e contato"),
        (name = "Dashboard", description = "Indicadores do painel"),
        (name = "Health", description = "Diagnóstico")
    )
)]
pub struct ApiDoc;
