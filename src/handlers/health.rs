// src/handlers/health.rs

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::config::AppState;

// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "name": "Credit Card Complaint Portal API", "status": "ok" }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreStatus {
    pub backend: String,
    pub data_backend: String,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub error: Option<String>,
}

// GET /test
// Diagnóstico do store: aqui o erro vira parte da resposta, não um 5xx.
#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses((status = 200, description = "Estado do document store", body = StoreStatus))
)]
pub async fn store_status(State(app_state): State<AppState>) -> Json<StoreStatus> {
    let mut status = StoreStatus {
        backend: "running".to_string(),
        data_backend: app_state.store.backend().to_string(),
        connection_status: "connected".to_string(),
        collections: Vec::new(),
        error: None,
    };

    match app_state.store.list_collections().await {
        Ok(mut names) => {
            names.truncate(10);
            status.collections = names;
        }
        Err(e) => {
            tracing::warn!("Diagnóstico do store falhou: {}", e);
            status.connection_status = "error".to_string();
            status.error = Some(e.to_string());
        }
    }

    Json(status)
}
