use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Cabeçalho x-tenant-id ausente ou mal formado
    #[error("Contexto de tenant inválido no pedido: {0}")]
    InvalidTenantHeader(String),

    // Invalidação chamada sem tenant válido. Tem de falhar alto no caminho de escrita.
    #[error("Invalidação de cache chamada sem tenant válido")]
    InvalidTenantContext,

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Conflito de substituição: {0}")]
    BackupConflict(String),

    #[error("O poste '{0}' já existe")]
    PosteNameAlreadyExists(String),

    // Falha de leitura/escrita no banco. Não é repetida aqui.
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // A mesma falha, vista pela leitura do agregado
    #[error("Dados de ocupação indisponíveis: {0}")]
    OccupancyUnavailable(#[source] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Falhas de banco na leitura do agregado viram `OccupancyUnavailable`.
    pub fn on_occupancy_read(self) -> Self {
        match self {
            AppError::DatabaseError(e) => AppError::OccupancyUnavailable(e),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidTenantHeader(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BackupConflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::PosteNameAlreadyExists(name) => {
                (StatusCode::CONFLICT, format!("O poste '{}' já existe.", name))
            }

            // Nunca devolvemos uma contagem parcial como se fosse verdade.
            AppError::OccupancyUnavailable(ref e) => {
                tracing::error!(error = %e, "Falha de acesso aos dados de ocupação");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Dados de ocupação temporariamente indisponíveis.".to_string(),
                )
            }

            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_read_failures_render_as_unavailable() {
        let error = AppError::DatabaseError(sqlx::Error::PoolTimedOut).on_occupancy_read();
        assert!(matches!(error, AppError::OccupancyUnavailable(_)));
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn write_path_database_errors_are_server_errors() {
        let response = AppError::DatabaseError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn occupancy_read_keeps_other_errors() {
        let error = AppError::NotFound("Poste".into()).on_occupancy_read();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[test]
    fn invalid_invalidation_call_is_a_server_error() {
        let response = AppError::InvalidTenantContext.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn backup_conflicts_render_as_409() {
        let response = AppError::BackupConflict("já substitui outro operador".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
