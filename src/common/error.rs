// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante pertence a uma família (`kind`): validação, não encontrado,
// credenciais, store ou interno.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("invalid id")]
    InvalidId,

    #[error("{0}")]
    InvalidInput(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("complaint not found")]
    ComplaintNotFound,

    // Falhas do document store
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Tempo limite do store excedido")]
    StoreTimeout,

    #[error("Documento corrompido: {0}")]
    CorruptDocument(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidId
            | AppError::InvalidInput(_)
            | AppError::EmailAlreadyExists => "validation",
            AppError::InvalidCredentials => "unauthorized",
            AppError::UserNotFound | AppError::ComplaintNotFound => "not_found",
            AppError::DatabaseError(_) | AppError::StoreTimeout | AppError::CorruptDocument(_) => {
                "store"
            }
            AppError::InternalServerError(_) | AppError::BcryptError(_) => "internal",
        }
    }
}

// Banco fora do ar ou inalcançável: o cliente recebe 503, não 500
fn store_unreachable(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

// Rejeições dos extratores viram 400, não o 422 padrão do axum
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "kind": kind,
                    "error": "Satu atau lebih field tidak valid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidId => (StatusCode::BAD_REQUEST, "ID tidak valid".to_string()),
            AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            AppError::EmailAlreadyExists => {
                (StatusCode::BAD_REQUEST, "Email sudah terdaftar".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Email atau password salah".to_string())
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User tidak ditemukan".to_string()),
            AppError::ComplaintNotFound => {
                (StatusCode::NOT_FOUND, "Pengaduan tidak ditemukan".to_string())
            }
            AppError::StoreTimeout => {
                tracing::error!("Document store não respondeu dentro do tempo limite");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database tidak tersedia".to_string(),
                )
            }
            AppError::DatabaseError(ref e) if store_unreachable(e) => {
                tracing::error!("Document store inalcançável: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database tidak tersedia".to_string(),
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Terjadi kesalahan yang tidak terduga.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "kind": kind, "error": error_message }));
        (status, body).into_response()
    }
}
