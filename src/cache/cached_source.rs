// src/cache/cached_source.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{
    keys::{KeyFamily, TenantKey},
    layer::CacheLayer,
};
use crate::{
    common::error::AppError,
    db::OccupancySource,
    models::{
        attendance::Attendance,
        backup::BackupAssignment,
        operator::Operator,
        poste::{CriticalPosition, Poste},
    },
};

/// Serve as listas de referência a partir do cache (tier 2),
/// delegando em `inner` nos misses.
#[derive(Clone)]
pub struct CachedSource {
    inner: Arc<dyn OccupancySource>,
    layer: CacheLayer,
}

impl CachedSource {
    pub fn new(inner: Arc<dyn OccupancySource>, layer: CacheLayer) -> Self {
        Self { inner, layer }
    }
}

#[async_trait]
impl OccupancySource for CachedSource {
    async fn critical_positions(&self, tenant_id: Uuid) -> Result<Vec<CriticalPosition>, AppError> {
        let key = TenantKey::new(tenant_id, KeyFamily::CriticalPositions);
        self.layer.get_or_load(key, || self.inner.critical_positions(tenant_id)).await
    }

    async fn postes(&self, tenant_id: Uuid) -> Result<Vec<Poste>, AppError> {
        let key = TenantKey::new(tenant_id, KeyFamily::Postes);
        self.layer.get_or_load(key, || self.inner.postes(tenant_id)).await
    }

    async fn operators(&self, tenant_id: Uuid) -> Result<Vec<Operator>, AppError> {
        let key = TenantKey::new(tenant_id, KeyFamily::Operators);
        self.layer.get_or_load(key, || self.inner.operators(tenant_id)).await
    }

    async fn attendance_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<Attendance>, AppError> {
        let key = TenantKey::dated(tenant_id, KeyFamily::TodayAttendance, date);
        self.layer.get_or_load(key, || self.inner.attendance_on(tenant_id, date)).await
    }

    async fn backups_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<BackupAssignment>, AppError> {
        let key = TenantKey::dated(tenant_id, KeyFamily::TodayBackups, date);
        self.layer.get_or_load(key, || self.inner.backups_on(tenant_id, date)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::{settings::CacheSettings, store::MemoryCacheStore},
        test_support::{day, MemorySource},
    };

    #[tokio::test]
    async fn reference_lists_are_read_once() {
        let memory = Arc::new(MemorySource::new());
        let tenant = Uuid::new_v4();
        memory.add_poste(tenant, "Bol");
        let layer = CacheLayer::new(Arc::new(MemoryCacheStore::new()), CacheSettings::default());
        let source = CachedSource::new(memory.clone(), layer);

        let first = source.postes(tenant).await.unwrap();
        let second = source.postes(tenant).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(memory.reads_of("postes"), 1);
    }

    #[tokio::test]
    async fn dated_lists_are_keyed_by_day() {
        let memory = Arc::new(MemorySource::new());
        let tenant = Uuid::new_v4();
        let layer = CacheLayer::new(Arc::new(MemoryCacheStore::new()), CacheSettings::default());
        let source = CachedSource::new(memory.clone(), layer);

        source.attendance_on(tenant, day()).await.unwrap();
        source.attendance_on(tenant, day().succ_opt().unwrap()).await.unwrap();
        source.attendance_on(tenant, day()).await.unwrap();

        assert_eq!(memory.reads_of("attendance"), 2);
    }

    #[tokio::test]
    async fn tenants_do_not_share_reference_lists() {
        let memory = Arc::new(MemorySource::new());
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        memory.add_poste(a, "Bol");
        let layer = CacheLayer::new(Arc::new(MemoryCacheStore::new()), CacheSettings::default());
        let source = CachedSource::new(memory.clone(), layer);

        assert_eq!(source.postes(a).await.unwrap().len(), 1);
        assert!(source.postes(b).await.unwrap().is_empty());
    }
}
