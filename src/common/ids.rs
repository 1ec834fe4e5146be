// src/common/ids.rs

use uuid::Uuid;

use crate::common::error::AppError;

/// Converte o identificador vindo do cliente (path, corpo ou query) em `Uuid`.
/// Qualquer coisa que não seja um UUID bem formado vira `AppError::InvalidId`.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidId)
}
