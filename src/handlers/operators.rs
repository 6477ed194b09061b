// src/handlers/operators.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::operator::Operator,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReassignOperatorPayload {
    pub poste_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "A ligne é obrigatória"))]
    #[schema(example = "Ligne 2")]
    #[serde(deserialize_with = "super::trimmed")]
    pub ligne: String,
}

// PUT /api/operators/{id}/assignment
#[utoipa::path(
    put,
    path = "/api/operators/{id}/assignment",
    tag = "Operators",
    request_body = ReassignOperatorPayload,
    responses(
        (status = 200, description = "Operador reatribuído", body = Operator),
        (status = 404, description = "Operador ou poste não encontrado")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant"),
        ("id" = Uuid, Path, description = "ID do operador")
    )
)]
pub async fn reassign_operator(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(operator_id): Path<Uuid>,
    Json(payload): Json<ReassignOperatorPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let operator = app_state.operator_service
        .reassign(tenant.0, operator_id, payload.poste_id, &payload.ligne)
        .await?;

    Ok((StatusCode::OK, Json(operator)))
}

// DELETE /api/operators/{id}
#[utoipa::path(
    delete,
    path = "/api/operators/{id}",
    tag = "Operators",
    responses(
        (status = 204, description = "Operador apagado"),
        (status = 404, description = "Operador não encontrado")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant"),
        ("id" = Uuid, Path, description = "ID do operador")
    )
)]
pub async fn delete_operator(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(operator_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {

    app_state.operator_service.delete(tenant.0, operator_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_ligne_fails_validation() {
        let payload: ReassignOperatorPayload =
            serde_json::from_value(json!({ "posteId": Uuid::new_v4(), "ligne": "   " })).unwrap();
        assert!(payload.validate().is_err());

        let payload: ReassignOperatorPayload =
            serde_json::from_value(json!({ "posteId": Uuid::new_v4(), "ligne": " Ligne 2 " })).unwrap();
        assert_eq!(payload.ligne, "Ligne 2");
        assert!(payload.validate().is_ok());
    }
}
