// src/db/content_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::document_store::{
        to_document, DocumentStore, Filter, CONTACT_MESSAGES, FAQS, NEWS,
    },
    models::content::{
        ContactMessage, CreateFaqPayload, Faq, NewContactMessage, NewNews, News,
    },
};

// FAQ, notícias e mensagens de contato: CRUD simples, uma coleção cada
#[derive(Clone)]
pub struct ContentRepository {
    store: Arc<dyn DocumentStore>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create_faq(&self, faq: &CreateFaqPayload) -> Result<Faq, AppError> {
        self.store.insert(FAQS, to_document(faq)?).await?.into_record()
    }

    pub async fn list_faqs(&self, filter: &Filter) -> Result<Vec<Faq>, AppError> {
        self.store
            .find_many(FAQS, filter, None)
            .await?
            .into_iter()
            .map(|doc| doc.into_record())
            .collect()
    }

    pub async fn create_news(&self, news: &NewNews) -> Result<News, AppError> {
        self.store.insert(NEWS, to_document(news)?).await?.into_record()
    }

    pub async fn list_news(
        &self,
        filter: &Filter,
        limit: Option<u64>,
    ) -> Result<Vec<News>, AppError> {
        self.store
            .find_many(NEWS, filter, limit)
            .await?
            .into_iter()
            .map(|doc| doc.into_record())
            .collect()
    }

    pub async fn create_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, AppError> {
        self.store
            .insert(CONTACT_MESSAGES, to_document(message)?)
            .await?
            .into_record()
    }
}
