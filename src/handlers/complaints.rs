// src/handlers/complaints.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppQuery},
    },
    config::AppState,
    models::complaint::{
        Complaint, ComplaintListQuery, CreateComplaintPayload, UpdateComplaintPayload,
    },
};

// POST /api/complaints
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = "Complaints",
    request_body = CreateComplaintPayload,
    responses(
        (status = 201, description = "Pengaduan dibuat (status baru, tanpa petugas, tanpa catatan)", body = Complaint),
        (status = 400, description = "user_id inválido ou campos obrigatórios vazios"),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn create_complaint(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateComplaintPayload>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state.complaint_service.create_complaint(payload).await?;

    Ok((StatusCode::CREATED, Json(complaint)))
}

// GET /api/complaints?status=&user_id=&assigned_to=&limit=
#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = "Complaints",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "Pengaduan que casam com todos os filtros (ordem não garantida)", body = Vec<Complaint>)
    )
)]
pub async fn list_complaints(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ComplaintListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let complaints = app_state.complaint_service.list_complaints(query).await?;

    Ok((StatusCode::OK, Json(complaints)))
}

// PATCH /api/complaints/{id}
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}",
    tag = "Complaints",
    request_body = UpdateComplaintPayload,
    params(
        ("id" = String, Path, description = "ID da pengaduan")
    ),
    responses(
        (status = 200, description = "Pengaduan atualizada", body = Complaint),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Pengaduan não encontrada")
    )
)]
pub async fn update_complaint(
    State(app_state): State<AppState>,
    Path(complaint_id): Path<String>,
    AppJson(payload): AppJson<UpdateComplaintPayload>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state
        .complaint_service
        .update_complaint(&complaint_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(complaint)))
}
