// src/db/operator_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{common::error::AppError, models::operator::Operator};

const OPERATOR_COLUMNS: &str =
    "id, tenant_id, first_name, last_name, matricule, poste_id, ligne, is_capable, is_critical";

#[derive(Clone)]
pub struct OperatorRepository {
    pool: PgPool,
}

impl OperatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn list_operators<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Operator>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {OPERATOR_COLUMNS} FROM operators WHERE tenant_id = $1 ORDER BY last_name, first_name"
        );
        let operators = sqlx::query_as::<_, Operator>(&sql)
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(operators)
    }

    pub async fn find_operator<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        operator_id: Uuid,
    ) -> Result<Option<Operator>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {OPERATOR_COLUMNS} FROM operators WHERE tenant_id = $1 AND id = $2");
        let operator = sqlx::query_as::<_, Operator>(&sql)
            .bind(tenant_id)
            .bind(operator_id)
            .fetch_optional(executor)
            .await?;
        Ok(operator)
    }

    /// Move o operador para outro (poste, ligne).
    pub async fn update_assignment<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        operator_id: Uuid,
        poste_id: Uuid,
        ligne: &str,
    ) -> Result<Option<Operator>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE operators SET poste_id = $3, ligne = $4 WHERE tenant_id = $1 AND id = $2 RETURNING {OPERATOR_COLUMNS}"
        );
        let operator = sqlx::query_as::<_, Operator>(&sql)
            .bind(tenant_id)
            .bind(operator_id)
            .bind(poste_id)
            .bind(ligne)
            .fetch_optional(executor)
            .await?;
        Ok(operator)
    }

    pub async fn delete_operator<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        operator_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM operators WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(operator_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
