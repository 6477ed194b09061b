// src/services/attendance_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    cache::CacheCoordinator,
    common::error::AppError,
    db::{AttendanceRepository, OperatorRepository},
    models::attendance::{Attendance, AttendanceStatus},
};

/// Próximo estado do toggle. Sem registo conta como presente.
pub fn next_status(current: Option<AttendanceStatus>) -> AttendanceStatus {
    match current {
        Some(AttendanceStatus::Absent) => AttendanceStatus::Present,
        Some(AttendanceStatus::Present) | None => AttendanceStatus::Absent,
    }
}

#[derive(Clone)]
pub struct AttendanceService {
    operator_repo: OperatorRepository,
    attendance_repo: AttendanceRepository,
    cache: CacheCoordinator,
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(
        operator_repo: OperatorRepository,
        attendance_repo: AttendanceRepository,
        cache: CacheCoordinator,
        pool: PgPool,
    ) -> Self {
        Self { operator_repo, attendance_repo, cache, pool }
    }

    /// Presente → ausente, ausente → presente.
    pub async fn toggle(&self, tenant_id: Uuid, operator_id: Uuid, date: NaiveDate) -> Result<Attendance, AppError> {
        let mut tx = self.pool.begin().await?;

        self.ensure_operator(&mut tx, tenant_id, operator_id).await?;

        let current = self.attendance_repo
            .find_status(&mut *tx, operator_id, date)
            .await?;

        let attendance = self.attendance_repo
            .upsert_status(&mut *tx, operator_id, date, next_status(current))
            .await?;

        tx.commit().await?;

        self.cache.invalidate_on_attendance_change(tenant_id).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            operator_id = %operator_id,
            date = %date,
            status = ?attendance.status,
            "Presença alternada"
        );
        Ok(attendance)
    }

    pub async fn set_status(
        &self,
        tenant_id: Uuid,
        operator_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<Attendance, AppError> {
        let mut tx = self.pool.begin().await?;

        self.ensure_operator(&mut tx, tenant_id, operator_id).await?;

        let attendance = self.attendance_repo
            .upsert_status(&mut *tx, operator_id, date, status)
            .await?;

        tx.commit().await?;

        self.cache.invalidate_on_attendance_change(tenant_id).await?;
        Ok(attendance)
    }

    async fn ensure_operator(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tenant_id: Uuid,
        operator_id: Uuid,
    ) -> Result<(), AppError> {
        self.operator_repo
            .find_operator(&mut **tx, tenant_id, operator_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Operador {}", operator_id)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_without_record_marks_absent() {
        assert_eq!(next_status(None), AttendanceStatus::Absent);
    }

    #[test]
    fn toggle_flips_between_states() {
        assert_eq!(next_status(Some(AttendanceStatus::Present)), AttendanceStatus::Absent);
        assert_eq!(next_status(Some(AttendanceStatus::Absent)), AttendanceStatus::Present);
    }
}
