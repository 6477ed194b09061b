// src/handlers/attendance.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::attendance::Attendance,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAttendancePayload {
    pub operator_id: Uuid,

    // Sem data: hoje (UTC)
    #[schema(example = "2026-03-09")]
    pub date: Option<NaiveDate>,
}

// POST /api/attendance/toggle
#[utoipa::path(
    post,
    path = "/api/attendance/toggle",
    tag = "Attendance",
    request_body = ToggleAttendancePayload,
    responses(
        (status = 200, description = "Presença alternada", body = Attendance),
        (status = 404, description = "Operador não encontrado")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn toggle_attendance(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<ToggleAttendancePayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let date = payload.date.unwrap_or_else(|| app_state.cache.today());
    let attendance = app_state.attendance_service
        .toggle(tenant.0, payload.operator_id, date)
        .await?;

    Ok((StatusCode::OK, Json(attendance)))
}
