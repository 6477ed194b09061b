// src/handlers/occupancy.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::occupancy::OccupancyReport,
};

// GET /api/occupancy
#[utoipa::path(
    get,
    path = "/api/occupancy",
    tag = "Occupancy",
    responses(
        (status = 200, description = "Ocupação dos postos críticos de hoje", body = OccupancyReport),
        (status = 400, description = "Cabeçalho X-Tenant-ID inválido"),
        (status = 503, description = "Dados de ocupação temporariamente indisponíveis")
    ),
    params(
        ("x-tenant-id" = uuid::Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn get_occupancy(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {

    let report = app_state.cache.get_or_compute(tenant.0).await?;

    Ok((StatusCode::OK, Json(report)))
}
