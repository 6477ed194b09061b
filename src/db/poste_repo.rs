// src/db/poste_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::poste::{CriticalPosition, Poste},
};

#[derive(Clone)]
pub struct PosteRepository {
    pool: PgPool,
}

impl PosteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ---
    // Leitura
    // ---

    pub async fn list_postes<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Poste>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let postes = sqlx::query_as::<_, Poste>(
            "SELECT id, tenant_id, name FROM postes WHERE tenant_id = $1 ORDER BY name ASC",
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(postes)
    }

    /// Apenas os pares marcados como críticos.
    pub async fn list_critical_positions<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<CriticalPosition>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let positions = sqlx::query_as::<_, CriticalPosition>(
            r#"
            SELECT id, poste_id, ligne, tenant_id, is_critical
            FROM critical_positions
            WHERE tenant_id = $1 AND is_critical = true
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(positions)
    }

    // ---
    // Escrita
    // ---

    pub async fn create_poste<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        name: &str,
    ) -> Result<Poste, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Poste>(
            "INSERT INTO postes (tenant_id, name) VALUES ($1, $2) RETURNING id, tenant_id, name",
        )
            .bind(tenant_id)
            .bind(name)
            .fetch_one(executor)
            .await
            .map_err(|e| unique_name_violation(e, name))
    }

    pub async fn rename_poste<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        poste_id: Uuid,
        name: &str,
    ) -> Result<Option<Poste>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Poste>(
            r#"
            UPDATE postes SET name = $3
            WHERE tenant_id = $1 AND id = $2
            RETURNING id, tenant_id, name
            "#,
        )
            .bind(tenant_id)
            .bind(poste_id)
            .bind(name)
            .fetch_optional(executor)
            .await
            .map_err(|e| unique_name_violation(e, name))
    }

    /// Os critical_positions e backups do poste caem em cascata (FK).
    pub async fn delete_poste<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        poste_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM postes WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(poste_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// UPSERT na chave (poste_id, ligne, tenant_id).
    pub async fn upsert_critical_position<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        poste_id: Uuid,
        ligne: &str,
        is_critical: bool,
    ) -> Result<CriticalPosition, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let position = sqlx::query_as::<_, CriticalPosition>(
            r#"
            INSERT INTO critical_positions (poste_id, ligne, tenant_id, is_critical)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (poste_id, ligne, tenant_id)
            DO UPDATE SET is_critical = EXCLUDED.is_critical
            RETURNING id, poste_id, ligne, tenant_id, is_critical
            "#,
        )
            .bind(poste_id)
            .bind(ligne)
            .bind(tenant_id)
            .bind(is_critical)
            .fetch_one(executor)
            .await?;
        Ok(position)
    }

    pub async fn poste_exists<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        poste_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM postes WHERE tenant_id = $1 AND id = $2)",
        )
            .bind(tenant_id)
            .bind(poste_id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }
}

fn unique_name_violation(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::PosteNameAlreadyExists(name.to_string());
        }
    }
    e.into()
}
