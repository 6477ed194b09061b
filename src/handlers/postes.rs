// src/handlers/postes.rs

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
    models::poste::{CriticalPosition, Poste},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PosteNamePayload {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres"))]
    #[schema(example = "Poste 12")]
    #[serde(deserialize_with = "super::trimmed")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetCriticalPayload {
    pub poste_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "A ligne é obrigatória"))]
    #[schema(example = "Ligne 1")]
    #[serde(deserialize_with = "super::trimmed")]
    pub ligne: String,

    #[schema(example = true)]
    pub is_critical: bool,
}

// GET /api/postes
#[utoipa::path(
    get,
    path = "/api/postes",
    tag = "Postes",
    responses(
        (status = 200, description = "Postes na ordem de exibição", body = Vec<Poste>)
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn list_postes(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {

    let postes = app_state.poste_service.list_sorted(tenant.0).await?;

    Ok((StatusCode::OK, Json(postes)))
}

// POST /api/postes
#[utoipa::path(
    post,
    path = "/api/postes",
    tag = "Postes",
    request_body = PosteNamePayload,
    responses(
        (status = 201, description = "Poste criado", body = Poste),
        (status = 409, description = "Já existe um poste com este nome")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn create_poste(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<PosteNamePayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let poste = app_state.poste_service.create(tenant.0, &payload.name).await?;

    Ok((StatusCode::CREATED, Json(poste)))
}

// PUT /api/postes/{id}
#[utoipa::path(
    put,
    path = "/api/postes/{id}",
    tag = "Postes",
    request_body = PosteNamePayload,
    responses(
        (status = 200, description = "Poste renomeado", body = Poste),
        (status = 404, description = "Poste não encontrado"),
        (status = 409, description = "Já existe um poste com este nome")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant"),
        ("id" = Uuid, Path, description = "ID do poste")
    )
)]
pub async fn rename_poste(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(poste_id): Path<Uuid>,
    Json(payload): Json<PosteNamePayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let poste = app_state.poste_service
        .rename(tenant.0, poste_id, &payload.name)
        .await?;

    Ok((StatusCode::OK, Json(poste)))
}

// DELETE /api/postes/{id}
#[utoipa::path(
    delete,
    path = "/api/postes/{id}",
    tag = "Postes",
    responses(
        (status = 204, description = "Poste apagado"),
        (status = 404, description = "Poste não encontrado")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant"),
        ("id" = Uuid, Path, description = "ID do poste")
    )
)]
pub async fn delete_poste(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(poste_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {

    app_state.poste_service.delete(tenant.0, poste_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/critical-positions
#[utoipa::path(
    put,
    path = "/api/critical-positions",
    tag = "Postes",
    request_body = SetCriticalPayload,
    responses(
        (status = 200, description = "Criticidade atualizada", body = CriticalPosition),
        (status = 404, description = "Poste não encontrado")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn set_critical_position(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<SetCriticalPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let position = app_state.poste_service
        .set_critical(tenant.0, payload.poste_id, &payload.ligne, payload.is_critical)
        .await?;

    Ok((StatusCode::OK, Json(position)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_names_fail_validation() {
        let payload: PosteNamePayload = serde_json::from_value(json!({ "name": "   " })).unwrap();
        assert_eq!(payload.name, "");
        assert!(payload.validate().is_err());
    }

    #[test]
    fn names_and_lignes_arrive_trimmed() {
        let payload: PosteNamePayload = serde_json::from_value(json!({ "name": "  Poste 12 " })).unwrap();
        assert_eq!(payload.name, "Poste 12");
        assert!(payload.validate().is_ok());

        let critical: SetCriticalPayload = serde_json::from_value(json!({
            "posteId": Uuid::new_v4(),
            "ligne": " \t ",
            "isCritical": true,
        }))
        .unwrap();
        assert!(critical.validate().is_err());
    }
}
