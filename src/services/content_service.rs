// src/services/content_service.rs

use chrono::Utc;
use validator::Validate;

use crate::{
    common::{error::AppError, limit::resolve_limit},
    db::{ContentRepository, Filter},
    models::content::{
        ContactMessage, CreateContactMessagePayload, CreateFaqPayload, CreateNewsPayload, Faq,
        NewContactMessage, NewNews, News,
    },
};

pub const DEFAULT_NEWS_LIMIT: u64 = 50;

#[derive(Clone)]
pub struct ContentService {
    repo: ContentRepository,
}

impl ContentService {
    pub fn new(repo: ContentRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  FAQ
    // =========================================================================

    pub async fn list_faqs(&self, only_active: bool) -> Result<Vec<Faq>, AppError> {
        let filter = if only_active {
            Filter::new().eq("is_active", true)
        } else {
            Filter::new()
        };
        self.repo.list_faqs(&filter).await
    }

    pub async fn create_faq(&self, payload: CreateFaqPayload) -> Result<Faq, AppError> {
        payload.validate()?;
        self.repo.create_faq(&payload).await
    }

    // =========================================================================
    //  NOTÍCIAS
    // =========================================================================

    pub async fn list_news(
        &self,
        only_published: bool,
        limit: Option<i64>,
    ) -> Result<Vec<News>, AppError> {
        let limit = resolve_limit(limit, DEFAULT_NEWS_LIMIT)?;
        let filter = if only_published {
            Filter::new().eq("is_published", true)
        } else {
            Filter::new()
        };
        self.repo.list_news(&filter, limit).await
    }

    // Notícia publicada na criação ganha a data de publicação do servidor
    pub async fn create_news(&self, payload: CreateNewsPayload) -> Result<News, AppError> {
        payload.validate()?;

        let news = NewNews {
            published_at: payload.is_published.then(Utc::now),
            title: payload.title,
            content: payload.content,
            cover_image: payload.cover_image,
            is_published: payload.is_published,
        };
        self.repo.create_news(&news).await
    }

    // =========================================================================
    //  CONTATO
    // =========================================================================

    pub async fn create_contact_message(
        &self,
        payload: CreateContactMessagePayload,
    ) -> Result<ContactMessage, AppError> {
        payload.validate()?;

        let message = NewContactMessage {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
            handled: false,
        };
        let stored = self.repo.create_contact_message(&message).await?;

        tracing::info!(message_id = %stored.id, "✉️ Pesan kontak diterima");

        Ok(stored)
    }
}
