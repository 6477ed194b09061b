// src/cache/coordinator.rs

//! Leitura do agregado com cache (tier 1) e superfície de invalidação.
//!
//! Cada caminho de escrita chama `invalidate_on_*` depois do commit.
//! O que apagar vem de `INVALIDATION_TABLE`, nunca do chamador.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{
    invalidation::{families_for, ChangeKind},
    keys::{KeyFamily, TenantKey},
    layer::{CacheLayer, CacheStats},
};
use crate::{
    common::error::AppError,
    models::occupancy::OccupancyReport,
    services::occupancy_service::OccupancyService,
};

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Clone)]
pub struct CacheCoordinator {
    layer: CacheLayer,
    occupancy: OccupancyService,
    today: fn() -> NaiveDate,
}

impl CacheCoordinator {
    pub fn new(layer: CacheLayer, occupancy: OccupancyService) -> Self {
        Self { layer, occupancy, today: utc_today }
    }

    /// Troca o relógio (o dia "de hoje") usado no cálculo e na invalidação.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub fn stats(&self) -> CacheStats {
        self.layer.stats()
    }

    /// Relatório de ocupação do tenant, do cache ou recalculado.
    ///
    /// Em miss, o cálculo corre numa task própria: se o chamador desistir,
    /// o cálculo termina e ainda grava o resultado. Pedidos simultâneos
    /// podem recalcular a mesma chave; só custa trabalho repetido.
    /// Um cálculo iniciado antes de uma invalidação pode gravar depois dela;
    /// esse valor antigo dura no máximo o TTL da família (15 s no agregado).
    pub async fn get_or_compute(&self, tenant_id: Uuid) -> Result<OccupancyReport, AppError> {
        if tenant_id.is_nil() {
            return Err(AppError::InvalidTenantContext);
        }

        let key = TenantKey::new(tenant_id, KeyFamily::Occupancy);
        if let Some(report) = self.layer.get_json::<OccupancyReport>(&key).await {
            return Ok(report);
        }

        let today = self.today();
        let layer = self.layer.clone();
        let occupancy = self.occupancy.clone();

        let task = tokio::spawn(async move {
            let report = occupancy.compute(tenant_id, today).await?;
            layer.put_json(&key, &report).await;
            Ok::<_, AppError>(report)
        });

        task.await
            .map_err(|e| {
                AppError::InternalServerError(anyhow::anyhow!("Cálculo de ocupação interrompido: {}", e))
            })?
            .map_err(AppError::on_occupancy_read)
    }

    /// Apaga as famílias que `kind` afeta para o tenant. Idempotente.
    pub async fn invalidate(&self, tenant_id: Uuid, kind: ChangeKind) -> Result<(), AppError> {
        if tenant_id.is_nil() {
            tracing::error!(change = kind.as_str(), "Invalidação de cache chamada sem tenant");
            return Err(AppError::InvalidTenantContext);
        }

        const EVERYTHING: &[KeyFamily] = &KeyFamily::ALL;
        let families = families_for(kind).unwrap_or_else(|| {
            tracing::error!(change = kind.as_str(), "Tipo de alteração sem entrada na tabela, limpando tudo");
            EVERYTHING
        });

        let removed = self.layer.delete_families(tenant_id, families, self.today()).await;
        tracing::info!(
            tenant_id = %tenant_id,
            change = kind.as_str(),
            families = families.len(),
            removed,
            "Cache de ocupação invalidado"
        );
        Ok(())
    }

    pub async fn invalidate_on_attendance_change(&self, tenant_id: Uuid) -> Result<(), AppError> {
        self.invalidate(tenant_id, ChangeKind::Attendance).await
    }

    pub async fn invalidate_on_backup_change(&self, tenant_id: Uuid) -> Result<(), AppError> {
        self.invalidate(tenant_id, ChangeKind::Backup).await
    }

    pub async fn invalidate_on_poste_change(&self, tenant_id: Uuid) -> Result<(), AppError> {
        self.invalidate(tenant_id, ChangeKind::Poste).await
    }

    pub async fn invalidate_on_operator_change(&self, tenant_id: Uuid) -> Result<(), AppError> {
        self.invalidate(tenant_id, ChangeKind::Operator).await
    }
}
