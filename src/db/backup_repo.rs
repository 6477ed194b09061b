// src/db/backup_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{common::error::AppError, models::backup::BackupAssignment};

const BACKUP_COLUMNS: &str =
    "id, poste_id, operator_id, backup_operator_id, backup_slot, assigned_date, tenant_id";

#[derive(Clone)]
pub struct BackupRepository {
    pool: PgPool,
}

impl BackupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn list_for_date<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<BackupAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {BACKUP_COLUMNS} FROM backup_assignments WHERE tenant_id = $1 AND assigned_date = $2"
        );
        let rows = sqlx::query_as::<_, BackupAssignment>(&sql)
            .bind(tenant_id)
            .bind(date)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// A substituição que um operador já está a fazer nesse dia, se houver.
    pub async fn find_by_backup_operator<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        backup_operator_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<BackupAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {BACKUP_COLUMNS} FROM backup_assignments WHERE tenant_id = $1 AND backup_operator_id = $2 AND assigned_date = $3 LIMIT 1"
        );
        let row = sqlx::query_as::<_, BackupAssignment>(&sql)
            .bind(tenant_id)
            .bind(backup_operator_id)
            .bind(date)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// UPSERT em (operator_id, assigned_date): trocar o substituto substitui a linha.
    /// Um substituto que já cobre outro operador nesse dia viola
    /// (backup_operator_id, assigned_date) e vira `BackupConflict`.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        poste_id: Uuid,
        operator_id: Uuid,
        backup_operator_id: Uuid,
        backup_slot: i32,
        date: NaiveDate,
    ) -> Result<BackupAssignment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO backup_assignments
                (tenant_id, poste_id, operator_id, backup_operator_id, backup_slot, assigned_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (operator_id, assigned_date)
            DO UPDATE SET
                poste_id = EXCLUDED.poste_id,
                backup_operator_id = EXCLUDED.backup_operator_id,
                backup_slot = EXCLUDED.backup_slot
            RETURNING {BACKUP_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, BackupAssignment>(&sql)
            .bind(tenant_id)
            .bind(poste_id)
            .bind(operator_id)
            .bind(backup_operator_id)
            .bind(backup_slot)
            .bind(date)
            .fetch_one(executor)
            .await
            .map_err(|e| backup_overlap_violation(e, backup_operator_id, date))?;
        Ok(row)
    }

    pub async fn delete_for_operator<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        operator_id: Uuid,
        date: NaiveDate,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM backup_assignments WHERE tenant_id = $1 AND operator_id = $2 AND assigned_date = $3",
        )
            .bind(tenant_id)
            .bind(operator_id)
            .bind(date)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

fn backup_overlap_violation(e: sqlx::Error, backup_operator_id: Uuid, date: NaiveDate) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::BackupConflict(format!(
                "O operador {} já substitui outro operador em {}.",
                backup_operator_id, date
            ));
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{day, FakeDatabaseError};

    #[test]
    fn concurrent_double_booking_becomes_a_backup_conflict() {
        let backup = Uuid::new_v4();
        let err = backup_overlap_violation(FakeDatabaseError::unique_violation().into(), backup, day());
        match err {
            AppError::BackupConflict(msg) => assert!(msg.contains(&backup.to_string())),
            other => panic!("esperava BackupConflict, veio {:?}", other),
        }
    }

    #[test]
    fn other_database_errors_pass_through() {
        let err = backup_overlap_violation(FakeDatabaseError::foreign_key_violation().into(), Uuid::new_v4(), day());
        assert!(matches!(err, AppError::DatabaseError(_)));

        let err = backup_overlap_violation(sqlx::Error::PoolTimedOut, Uuid::new_v4(), day());
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn schema_forbids_one_backup_covering_two_operators_on_a_day() {
        let schema = include_str!("../../migrations/20250101000000_initial_schema.sql");
        assert!(schema.contains("UNIQUE (backup_operator_id, assigned_date)"));
    }
}
