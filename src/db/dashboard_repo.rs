// src/db/dashboard_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{
        complaint_repo::ComplaintRepository,
        document_store::{DocumentStore, Filter, FAQS, NEWS, USERS},
    },
    models::{complaint::ComplaintStatus, dashboard::DashboardSummary},
};

#[derive(Clone)]
pub struct DashboardRepository {
    store: Arc<dyn DocumentStore>,
    complaints: ComplaintRepository,
}

impl DashboardRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let complaints = ComplaintRepository::new(store.clone());
        Self { store, complaints }
    }

    // Resumo geral: seis contagens independentes, disparadas em paralelo.
    // Não há snapshot entre elas; se qualquer uma falhar, o resumo inteiro falha.
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let all = Filter::new();
        let open = Filter::new().any_of("status", ComplaintStatus::OPEN.map(ComplaintStatus::as_str));
        let closed = Filter::new().eq("status", ComplaintStatus::Selesai.as_str());
        let active_faqs = Filter::new().eq("is_active", true);
        let published_news = Filter::new().eq("is_published", true);

        let (users, complaints, complaints_open, complaints_closed, faqs, news) = tokio::try_join!(
            self.store.count(USERS, &all),
            self.complaints.count_by_filter(&all),
            self.complaints.count_by_filter(&open),
            self.complaints.count_by_filter(&closed),
            self.store.count(FAQS, &active_faqs),
            self.store.count(NEWS, &published_news),
        )?;

        Ok(DashboardSummary {
            users,
            complaints,
            complaints_open,
            complaints_closed,
            faqs,
            news,
        })
    }
}
