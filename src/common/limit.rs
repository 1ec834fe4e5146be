// src/common/limit.rs

use crate::common::error::AppError;

/// Traduz o `limit` da query string para o limite do store.
/// Ausente usa o padrão da rota, 0 significa "sem limite", negativo é erro.
pub fn resolve_limit(requested: Option<i64>, default: u64) -> Result<Option<u64>, AppError> {
    match requested {
        None => Ok(Some(default)),
        Some(0) => Ok(None),
        Some(n) => u64::try_from(n)
            .map(Some)
            .map_err(|_| AppError::InvalidInput("limit tidak boleh negatif".to_string())),
    }
}
