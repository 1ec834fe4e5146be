// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// Os contadores do topo do painel. Cada um é uma leitura independente,
// não há snapshot entre eles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub users: u64,
    pub complaints: u64,
    pub complaints_open: u64,   // baru + diproses
    pub complaints_closed: u64, // selesai
    pub faqs: u64,              // só ativas
    pub news: u64,              // só publicadas
}
