// src/handlers/backups.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::backup::BackupAssignment,
};

fn default_slot() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignBackupPayload {
    pub operator_id: Uuid,
    pub backup_operator_id: Uuid,

    #[serde(default = "default_slot")]
    #[validate(range(min = 1, max = 9, message = "O slot deve estar entre 1 e 9"))]
    #[schema(example = 1)]
    pub backup_slot: i32,

    #[schema(example = "2026-03-09")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RemoveBackupQuery {
    pub operator_id: Uuid,
    pub date: Option<NaiveDate>,
}

// POST /api/backups
#[utoipa::path(
    post,
    path = "/api/backups",
    tag = "Backups",
    request_body = AssignBackupPayload,
    responses(
        (status = 201, description = "Substituto atribuído", body = BackupAssignment),
        (status = 404, description = "Operador não encontrado"),
        (status = 409, description = "Substituição inválida")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn assign_backup(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<AssignBackupPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let date = payload.date.unwrap_or_else(|| app_state.cache.today());
    let assignment = app_state.backup_service
        .assign(
            tenant.0,
            payload.operator_id,
            payload.backup_operator_id,
            payload.backup_slot,
            date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

// DELETE /api/backups?operatorId=...&date=...
#[utoipa::path(
    delete,
    path = "/api/backups",
    tag = "Backups",
    responses(
        (status = 204, description = "Substituição removida"),
        (status = 404, description = "Nenhuma substituição para o operador nesse dia")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant"),
        RemoveBackupQuery
    )
)]
pub async fn remove_backup(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<RemoveBackupQuery>,
) -> Result<impl IntoResponse, AppError> {

    let date = query.date.unwrap_or_else(|| app_state.cache.today());
    app_state.backup_service
        .remove(tenant.0, query.operator_id, date)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
