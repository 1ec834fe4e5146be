// src/db/complaint_repo.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{to_document, Document, DocumentStore, Filter, COMPLAINTS},
    models::complaint::{Complaint, NewComplaint},
};

/// Operações tipadas sobre a coleção `complaint`.
#[derive(Clone)]
pub struct ComplaintRepository {
    store: Arc<dyn DocumentStore>,
}

impl ComplaintRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // O store devolve o documento gravado, sem precisar reler
    pub async fn insert(&self, complaint: &NewComplaint) -> Result<Complaint, AppError> {
        self.store
            .insert(COMPLAINTS, to_document(complaint)?)
            .await?
            .into_record()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>, AppError> {
        self.store
            .find_by_id(COMPLAINTS, id)
            .await?
            .map(|doc| doc.into_record())
            .transpose()
    }

    /// Sem ordenação explícita: hoje sai na ordem de inserção, mas não é garantido.
    pub async fn find_many(
        &self,
        filter: &Filter,
        limit: Option<u64>,
    ) -> Result<Vec<Complaint>, AppError> {
        self.store
            .find_many(COMPLAINTS, filter, limit)
            .await?
            .into_iter()
            .map(|doc| doc.into_record())
            .collect()
    }

    /// Atualização parcial de campos escalares. `fields` vazio não toca no store.
    pub async fn set_fields(&self, id: Uuid, fields: Document) -> Result<u64, AppError> {
        if fields.is_empty() {
            return Ok(0);
        }
        self.store.set_fields(COMPLAINTS, id, fields).await
    }

    /// Anexa uma nota numa única operação atômica do store.
    pub async fn append_note(
        &self,
        id: Uuid,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        self.store
            .append_to_list(COMPLAINTS, id, "notes", json!({ "text": text, "at": at }))
            .await
    }

    pub async fn count_by_filter(&self, filter: &Filter) -> Result<u64, AppError> {
        self.store.count(COMPLAINTS, filter).await
    }
}
