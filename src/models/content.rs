// src/models/content.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

fn default_true() -> bool {
    true
}

// --- FAQ ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFaqPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Bagaimana cara memblokir kartu?")]
    pub question: String,
    #[validate(length(min = 1, message = "required"))]
    pub answer: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FaqListQuery {
    #[serde(default = "default_true")]
    pub only_active: bool,
}

// --- NEWS ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNewsPayload {
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    #[validate(length(min = 1, message = "required"))]
    pub content: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Serialize)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsListQuery {
    #[serde(default = "default_true")]
    pub only_published: bool,
    /// Padrão 50; 0 = sem limite
    pub limit: Option<i64>,
}

// --- CONTATO ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub handled: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactMessagePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "required"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub handled: bool,
}
