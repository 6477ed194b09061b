// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

const TENANT_ID_HEADER: &str = "x-tenant-id";

// Tenant do pedido, lido do cabeçalho X-Tenant-ID.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

fn parse_tenant_header(value: Option<&str>) -> Result<Uuid, AppError> {
    let raw = value.ok_or_else(|| {
        AppError::InvalidTenantHeader("O cabeçalho X-Tenant-ID é obrigatório.".to_string())
    })?;

    let tenant_id = Uuid::parse_str(raw.trim()).map_err(|_| {
        AppError::InvalidTenantHeader("Cabeçalho X-Tenant-ID inválido (não é um UUID).".to_string())
    })?;

    if tenant_id.is_nil() {
        return Err(AppError::InvalidTenantHeader(
            "Cabeçalho X-Tenant-ID não pode ser o UUID nulo.".to_string(),
        ));
    }

    Ok(tenant_id)
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = match parts.headers.get(TENANT_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::InvalidTenantHeader("Cabeçalho X-Tenant-ID contém caracteres inválidos.".to_string())
            })?),
            None => None,
        };

        parse_tenant_header(value).map(TenantContext)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(header: Option<&str>) -> Result<TenantContext, AppError> {
        let mut builder = Request::builder().uri("/api/occupancy");
        if let Some(value) = header {
            builder = builder.header(TENANT_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        TenantContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_the_tenant_header() {
        let tenant = Uuid::new_v4();
        let context = extract(Some(&tenant.to_string())).await.unwrap();
        assert_eq!(context.0, tenant);
    }

    #[tokio::test]
    async fn rejects_missing_malformed_and_nil_tenants() {
        assert!(matches!(extract(None).await, Err(AppError::InvalidTenantHeader(_))));
        assert!(matches!(extract(Some("loja-1")).await, Err(AppError::InvalidTenantHeader(_))));
        assert!(matches!(
            extract(Some("00000000-0000-0000-0000-000000000000")).await,
            Err(AppError::InvalidTenantHeader(_))
        ));
    }
}
