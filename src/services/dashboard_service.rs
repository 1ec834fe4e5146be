// src/services/dashboard_service.rs

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::db::{
        document_store::{to_document, DocumentStore, COMPLAINTS, FAQS, NEWS, USERS},
        MemoryDocumentStore,
    };

    #[tokio::test]
    async fn counts_users_and_complaints_by_status() {
        let store = Arc::new(MemoryDocumentStore::new());

        for i in 0..3 {
            let user = json!({"name": format!("u{i}"), "email": format!("u{i}@example.com")});
            store.insert(USERS, to_document(&user).unwrap()).await.unwrap();
        }
        for status in ["baru", "baru", "diproses", "selesai", "selesai"] {
            store
                .insert(COMPLAINTS, to_document(&json!({"status": status})).unwrap())
                .await
                .unwrap();
        }
        store
            .insert(COMPLAINTS, to_document(&json!({"status": "ditolak"})).unwrap())
            .await
            .unwrap();
        store
            .insert(FAQS, to_document(&json!({"is_active": true})).unwrap())
            .await
            .unwrap();
        store
            .insert(FAQS, to_document(&json!({"is_active": false})).unwrap())
            .await
            .unwrap();
        store
            .insert(NEWS, to_document(&json!({"is_published": false})).unwrap())
            .await
            .unwrap();

        let dashboard = DashboardService::new(DashboardRepository::new(store));
        let summary = dashboard.get_summary().await.unwrap();

        assert_eq!(
            summary,
            DashboardSummary {
                users: 3,
                complaints: 6,
                complaints_open: 3,
                complaints_closed: 2,
                faqs: 1,
                news: 0,
            }
        );
    }
}
