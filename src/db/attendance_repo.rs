// src/db/attendance_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::attendance::{Attendance, AttendanceStatus},
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Presenças do dia dos operadores do tenant (a tabela não tem tenant_id próprio).
    pub async fn list_for_date<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT a.id, a.operator_id, a.date, a.status
            FROM attendances a
            JOIN operators o ON o.id = a.operator_id
            WHERE o.tenant_id = $1 AND a.date = $2
            "#,
        )
            .bind(tenant_id)
            .bind(date)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    pub async fn find_status<'e, E>(
        &self,
        executor: E,
        operator_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AttendanceStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let status = sqlx::query_scalar::<_, AttendanceStatus>(
            "SELECT status FROM attendances WHERE operator_id = $1 AND date = $2",
        )
            .bind(operator_id)
            .bind(date)
            .fetch_optional(executor)
            .await?;
        Ok(status)
    }

    /// UPSERT em (operator_id, date): nunca duas linhas para o mesmo dia.
    pub async fn upsert_status<'e, E>(
        &self,
        executor: E,
        operator_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<Attendance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendances (operator_id, date, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (operator_id, date)
            DO UPDATE SET status = EXCLUDED.status
            RETURNING id, operator_id, date, status
            "#,
        )
            .bind(operator_id)
            .bind(date)
            .bind(status)
            .fetch_one(executor)
            .await?;
        Ok(attendance)
    }
}
