// src/services/complaint_service.rs

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, ids::parse_id, limit::resolve_limit},
    db::{document_store::Document, ComplaintRepository, Filter, UserRepository},
    models::complaint::{
        Complaint, ComplaintListQuery, ComplaintStatus, CreateComplaintPayload, NewComplaint,
        UpdateComplaintPayload,
    },
};

pub const DEFAULT_LIST_LIMIT: u64 = 100;

#[derive(Clone)]
pub struct ComplaintService {
    repo: ComplaintRepository,
    user_repo: UserRepository,
}

impl ComplaintService {
    pub fn new(repo: ComplaintRepository, user_repo: UserRepository) -> Self {
        Self { repo, user_repo }
    }

    pub async fn create_complaint(
        &self,
        payload: CreateComplaintPayload,
    ) -> Result<Complaint, AppError> {
        // 1. Validação antes de qualquer escrita
        payload.validate()?;
        let user_id = parse_id(&payload.user_id)?;

        // 2. O usuário precisa existir
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::UserNotFound);
        }

        // 3. Campos de fluxo sempre definidos pelo servidor
        let record = NewComplaint {
            user_id,
            title: payload.title,
            category: payload.category,
            description: payload.description,
            attachments: payload.attachments,
            status: ComplaintStatus::Baru,
            assigned_to: None,
            priority: payload.priority,
            sla_due_at: None,
            notes: Vec::new(),
        };

        // 4. Grava e devolve exatamente o que ficou no store
        let complaint = self.repo.insert(&record).await?;

        tracing::info!(
            complaint_id = %complaint.id,
            user_id = %complaint.user_id,
            category = ?complaint.category,
            "📝 Pengaduan baru dibuat"
        );

        Ok(complaint)
    }

    /// Muda status e/ou responsável e anexa uma nota, em qualquer combinação.
    /// As duas escritas (campos e nota) não são transacionais entre si.
    pub async fn update_complaint(
        &self,
        complaint_id: &str,
        payload: UpdateComplaintPayload,
    ) -> Result<Complaint, AppError> {
        let id = parse_id(complaint_id)?;
        // Só o formato é validado: não checamos se o usuário existe nem o papel dele
        let assigned_to = payload.assigned_to.as_deref().map(parse_id).transpose()?;

        // Nada a fazer: leitura pura, zero escritas
        if payload.is_empty() {
            return self.fetch(id).await;
        }

        // Checa a existência antes de escrever
        self.fetch(id).await?;

        let mut fields = Document::new();
        if let Some(status) = payload.status {
            fields.insert("status".to_string(), json!(status));
        }
        if let Some(operator_id) = assigned_to {
            fields.insert("assigned_to".to_string(), json!(operator_id));
        }
        self.repo.set_fields(id, fields).await?;

        if let Some(text) = payload.note_text() {
            self.repo.append_note(id, text, Utc::now()).await?;
        }

        tracing::info!(
            complaint_id = %id,
            status = ?payload.status,
            assigned_to = ?assigned_to,
            note = payload.note_text().is_some(),
            "Pengaduan diperbarui"
        );

        // Relê: se sumiu no meio do caminho, é 404
        self.fetch(id).await
    }

    /// Filtro AND sobre os campos informados; a ordem do resultado não é garantida.
    pub async fn list_complaints(
        &self,
        query: ComplaintListQuery,
    ) -> Result<Vec<Complaint>, AppError> {
        let limit = resolve_limit(query.limit, DEFAULT_LIST_LIMIT)?;
        let filter = complaint_filter(&query);
        self.repo.find_many(&filter, limit).await
    }

    async fn fetch(&self, id: Uuid) -> Result<Complaint, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ComplaintNotFound)
    }
}

// Valores vazios na query string contam como ausentes
fn complaint_filter(query: &ComplaintListQuery) -> Filter {
    let mut filter = Filter::new();
    if let Some(status) = non_empty(&query.status) {
        filter = filter.eq("status", status);
    }
    if let Some(user_id) = non_empty(&query.user_id) {
        filter = filter.eq("user_id", canonical_ref(user_id));
    }
    if let Some(assigned_to) = non_empty(&query.assigned_to) {
        filter = filter.eq("assigned_to", canonical_ref(assigned_to));
    }
    filter
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Referências são gravadas no formato canônico do Uuid; o que não for UUID
// passa como veio (e simplesmente não casa com nada)
fn canonical_ref(raw: &str) -> String {
    parse_id(raw).map(|id| id.to_string()).unwrap_or_else(|_| raw.to_string())
}
