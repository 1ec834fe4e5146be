// src/models/complaint.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    Limit,
    Tagihan,
    KartuHilang,
    Penipuan,
    Biaya,
    #[default]
    Lainnya,
}

/// Estado do fluxo de atendimento. Qualquer estado pode seguir qualquer outro:
/// não há tabela de transições, nem estado terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Baru,
    Diproses,
    Selesai,
    Ditolak,
}

impl ComplaintStatus {
    /// Estados contados como "em aberto" no dashboard
    pub const OPEN: [ComplaintStatus; 2] = [ComplaintStatus::Baru, ComplaintStatus::Diproses];

    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Baru => "baru",
            ComplaintStatus::Diproses => "diproses",
            ComplaintStatus::Selesai => "selesai",
            ComplaintStatus::Ditolak => "ditolak",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    Rendah,
    #[default]
    Sedang,
    Tinggi,
}

// --- Entidade ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintNote {
    #[schema(example = "calling customer")]
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Tagihan ganda bulan Maret")]
    pub title: String,
    pub category: ComplaintCategory,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub status: ComplaintStatus,
    pub assigned_to: Option<Uuid>,
    pub priority: ComplaintPriority,
    // Existe no schema, mas nada calcula nem lê este campo
    pub sla_due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Vec<ComplaintNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// O que é gravado na criação. Os campos de fluxo (status, assigned_to,
/// notes) só são definidos aqui, pelo servidor.
#[derive(Debug, Clone, Serialize)]
pub struct NewComplaint {
    pub user_id: Uuid,
    pub title: String,
    pub category: ComplaintCategory,
    pub description: String,
    pub attachments: Vec<String>,
    pub status: ComplaintStatus,
    pub assigned_to: Option<Uuid>,
    pub priority: ComplaintPriority,
    pub sla_due_at: Option<DateTime<Utc>>,
    pub notes: Vec<ComplaintNote>,
}

// --- Payloads ---

// Campos extras (status, assigned_to, notes...) enviados pelo cliente são
// simplesmente descartados na desserialização.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintPayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub user_id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Kartu saya dibobol")]
    pub title: String,

    #[serde(default)]
    pub category: ComplaintCategory,

    #[validate(length(min = 1, message = "required"))]
    pub description: String,

    #[serde(default)]
    pub attachments: Vec<String>,

    #[serde(default)]
    pub priority: ComplaintPriority,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateComplaintPayload {
    pub status: Option<ComplaintStatus>,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub assigned_to: Option<String>,
    #[schema(example = "calling customer")]
    pub note: Option<String>,
}

impl UpdateComplaintPayload {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none() && self.note_text().is_none()
    }

    /// Nota efetiva, gravada exatamente como veio. Só `""` conta como ausente.
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintListQuery {
    /// baru | diproses | selesai | ditolak
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub assigned_to: Option<String>,
    /// Padrão 100; 0 = sem limite
    pub limit: Option<i64>,
}
