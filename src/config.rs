// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    cache::{CacheCoordinator, CacheLayer, CacheProvider, CacheSettings, CachedSource},
    db::{
        AttendanceRepository, BackupRepository, OccupancyRepository, OccupancySource,
        OperatorRepository, PosteRepository,
    },
    services::{AttendanceService, BackupService, OccupancyService, OperatorService, PosteService},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bind_addr: String,
    // Leitura do agregado e superfície de invalidação
    pub cache: CacheCoordinator,
    pub attendance_service: AttendanceService,
    pub backup_service: BackupService,
    pub poste_service: PosteService,
    pub operator_service: OperatorService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Cache ---
        let cache_settings = CacheSettings::from_env();
        let provider = CacheProvider::from_settings(&cache_settings);
        tracing::info!(
            backend = provider.name(),
            occupancy_ttl_secs = cache_settings.occupancy_ttl.as_secs(),
            "Cache de ocupação configurado"
        );
        let layer = CacheLayer::new(Arc::new(provider), cache_settings);

        // --- Monta o gráfico de dependências ---
        let poste_repo = PosteRepository::new(db_pool.clone());
        let operator_repo = OperatorRepository::new(db_pool.clone());
        let attendance_repo = AttendanceRepository::new(db_pool.clone());
        let backup_repo = BackupRepository::new(db_pool.clone());

        let repository = OccupancyRepository::new(
            poste_repo.clone(),
            operator_repo.clone(),
            attendance_repo.clone(),
            backup_repo.clone(),
        );
        let source: Arc<dyn OccupancySource> = Arc::new(CachedSource::new(Arc::new(repository), layer.clone()));
        let cache = CacheCoordinator::new(layer, OccupancyService::new(source.clone()));

        let attendance_service = AttendanceService::new(
            operator_repo.clone(),
            attendance_repo.clone(),
            cache.clone(),
            db_pool.clone(),
        );
        let backup_service = BackupService::new(
            operator_repo.clone(),
            attendance_repo,
            backup_repo,
            cache.clone(),
            db_pool.clone(),
        );
        let poste_service = PosteService::new(poste_repo.clone(), source, cache.clone(), db_pool.clone());
        let operator_service = OperatorService::new(operator_repo, poste_repo, cache.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            bind_addr,
            cache,
            attendance_service,
            backup_service,
            poste_service,
            operator_service,
        })
    }
}
