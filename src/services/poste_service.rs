// src/services/poste_service.rs

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    cache::CacheCoordinator,
    common::error::AppError,
    db::{OccupancySource, PosteRepository},
    models::poste::{CriticalPosition, Poste},
    services::poste_order::sort_postes,
};

#[derive(Clone)]
pub struct PosteService {
    poste_repo: PosteRepository,
    // Leituras passam pelo cache de referência (família "postes")
    source: Arc<dyn OccupancySource>,
    cache: CacheCoordinator,
    pool: PgPool,
}

impl PosteService {
    pub fn new(
        poste_repo: PosteRepository,
        source: Arc<dyn OccupancySource>,
        cache: CacheCoordinator,
        pool: PgPool,
    ) -> Self {
        Self { poste_repo, source, cache, pool }
    }

    /// Postes do tenant na ordem de exibição.
    pub async fn list_sorted(&self, tenant_id: Uuid) -> Result<Vec<Poste>, AppError> {
        let mut postes = self.source.postes(tenant_id).await?;
        sort_postes(&mut postes);
        Ok(postes)
    }

    pub async fn create(&self, tenant_id: Uuid, name: &str) -> Result<Poste, AppError> {
        let poste = self.poste_repo
            .create_poste(&self.pool, tenant_id, name.trim())
            .await?;

        self.cache.invalidate_on_poste_change(tenant_id).await?;

        tracing::info!(tenant_id = %tenant_id, poste_id = %poste.id, name = %poste.name, "Poste criado");
        Ok(poste)
    }

    pub async fn rename(&self, tenant_id: Uuid, poste_id: Uuid, name: &str) -> Result<Poste, AppError> {
        let poste = self.poste_repo
            .rename_poste(&self.pool, tenant_id, poste_id, name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poste {}", poste_id)))?;

        self.cache.invalidate_on_poste_change(tenant_id).await?;
        Ok(poste)
    }

    /// Apaga o poste; pares críticos e substituições vão em cascata,
    /// os operadores ficam sem poste.
    pub async fn delete(&self, tenant_id: Uuid, poste_id: Uuid) -> Result<(), AppError> {
        let removed = self.poste_repo
            .delete_poste(&self.pool, tenant_id, poste_id)
            .await?;

        if removed == 0 {
            return Err(AppError::NotFound(format!("Poste {}", poste_id)));
        }

        self.cache.invalidate_on_poste_change(tenant_id).await?;

        tracing::info!(tenant_id = %tenant_id, poste_id = %poste_id, "Poste apagado");
        Ok(())
    }

    /// Marca ou desmarca (poste, ligne) como crítico.
    pub async fn set_critical(
        &self,
        tenant_id: Uuid,
        poste_id: Uuid,
        ligne: &str,
        is_critical: bool,
    ) -> Result<CriticalPosition, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.poste_repo.poste_exists(&mut *tx, tenant_id, poste_id).await? {
            return Err(AppError::NotFound(format!("Poste {}", poste_id)));
        }

        let position = self.poste_repo
            .upsert_critical_position(&mut *tx, tenant_id, poste_id, ligne.trim(), is_critical)
            .await?;

        tx.commit().await?;

        self.cache.invalidate_on_poste_change(tenant_id).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            poste_id = %poste_id,
            ligne = %position.ligne,
            is_critical,
            "Criticidade do posto atualizada"
        );
        Ok(position)
    }
}
