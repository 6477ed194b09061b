// src/services/operator_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    cache::CacheCoordinator,
    common::error::AppError,
    db::{OperatorRepository, PosteRepository},
    models::operator::Operator,
};

#[derive(Clone)]
pub struct OperatorService {
    operator_repo: OperatorRepository,
    poste_repo: PosteRepository,
    cache: CacheCoordinator,
    pool: PgPool,
}

impl OperatorService {
    pub fn new(
        operator_repo: OperatorRepository,
        poste_repo: PosteRepository,
        cache: CacheCoordinator,
        pool: PgPool,
    ) -> Self {
        Self { operator_repo, poste_repo, cache, pool }
    }

    /// Move o operador para outro (poste, ligne) do mesmo tenant.
    pub async fn reassign(
        &self,
        tenant_id: Uuid,
        operator_id: Uuid,
        poste_id: Uuid,
        ligne: &str,
    ) -> Result<Operator, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.poste_repo.poste_exists(&mut *tx, tenant_id, poste_id).await? {
            return Err(AppError::NotFound(format!("Poste {}", poste_id)));
        }

        let operator = self.operator_repo
            .update_assignment(&mut *tx, tenant_id, operator_id, poste_id, ligne.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Operador {}", operator_id)))?;

        tx.commit().await?;

        self.cache.invalidate_on_operator_change(tenant_id).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            operator_id = %operator_id,
            poste_id = %poste_id,
            ligne = %operator.ligne,
            "Operador reatribuído"
        );
        Ok(operator)
    }

    /// Presenças e substituições do operador vão em cascata.
    pub async fn delete(&self, tenant_id: Uuid, operator_id: Uuid) -> Result<(), AppError> {
        let removed = self.operator_repo
            .delete_operator(&self.pool, tenant_id, operator_id)
            .await?;

        if removed == 0 {
            return Err(AppError::NotFound(format!("Operador {}", operator_id)));
        }

        self.cache.invalidate_on_operator_change(tenant_id).await?;

        tracing::info!(tenant_id = %tenant_id, operator_id = %operator_id, "Operador apagado");
        Ok(())
    }
}
