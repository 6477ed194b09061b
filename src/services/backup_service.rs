// src/services/backup_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    cache::CacheCoordinator,
    common::error::AppError,
    db::{AttendanceRepository, BackupRepository, OperatorRepository},
    models::{attendance::AttendanceStatus, backup::BackupAssignment, operator::Operator},
};

/// Regras para `backup` substituir `operator` num dia.
///
/// `backup_covering` é a substituição que o candidato já faz nesse dia,
/// se fizer alguma.
pub fn check_backup_candidate(
    operator: &Operator,
    operator_status: Option<AttendanceStatus>,
    backup: &Operator,
    backup_status: Option<AttendanceStatus>,
    backup_covering: Option<&BackupAssignment>,
) -> Result<Uuid, AppError> {
    if operator.id == backup.id {
        return Err(AppError::BackupConflict("Um operador não se pode substituir a si próprio.".into()));
    }

    let poste_id = operator
        .poste_id
        .ok_or_else(|| AppError::BackupConflict(format!("{} não tem poste atribuído.", operator.full_name())))?;

    // Sem registo de presença conta como presente
    if operator_status != Some(AttendanceStatus::Absent) {
        return Err(AppError::BackupConflict(format!("{} não está ausente.", operator.full_name())));
    }

    if backup_status == Some(AttendanceStatus::Absent) {
        return Err(AppError::BackupConflict(format!("{} está ausente.", backup.full_name())));
    }

    if let Some(existing) = backup_covering {
        if existing.operator_id != operator.id {
            return Err(AppError::BackupConflict(format!(
                "{} já substitui outro operador neste dia.",
                backup.full_name()
            )));
        }
    }

    Ok(poste_id)
}

#[derive(Clone)]
pub struct BackupService {
    operator_repo: OperatorRepository,
    attendance_repo: AttendanceRepository,
    backup_repo: BackupRepository,
    cache: CacheCoordinator,
    pool: PgPool,
}

impl BackupService {
    pub fn new(
        operator_repo: OperatorRepository,
        attendance_repo: AttendanceRepository,
        backup_repo: BackupRepository,
        cache: CacheCoordinator,
        pool: PgPool,
    ) -> Self {
        Self { operator_repo, attendance_repo, backup_repo, cache, pool }
    }

    /// Atribui (ou troca) o substituto de um operador ausente.
    pub async fn assign(
        &self,
        tenant_id: Uuid,
        operator_id: Uuid,
        backup_operator_id: Uuid,
        backup_slot: i32,
        date: NaiveDate,
    ) -> Result<BackupAssignment, AppError> {
        let mut tx = self.pool.begin().await?;

        let operator = self.operator_repo
            .find_operator(&mut *tx, tenant_id, operator_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Operador {}", operator_id)))?;

        let backup = self.operator_repo
            .find_operator(&mut *tx, tenant_id, backup_operator_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Operador {}", backup_operator_id)))?;

        let operator_status = self.attendance_repo.find_status(&mut *tx, operator_id, date).await?;
        let backup_status = self.attendance_repo.find_status(&mut *tx, backup_operator_id, date).await?;
        let backup_covering = self.backup_repo
            .find_by_backup_operator(&mut *tx, tenant_id, backup_operator_id, date)
            .await?;

        let poste_id = check_backup_candidate(
            &operator,
            operator_status,
            &backup,
            backup_status,
            backup_covering.as_ref(),
        )?;

        let assignment = self.backup_repo
            .upsert(&mut *tx, tenant_id, poste_id, operator_id, backup_operator_id, backup_slot, date)
            .await?;

        tx.commit().await?;

        self.cache.invalidate_on_backup_change(tenant_id).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            operator_id = %operator_id,
            backup_operator_id = %backup_operator_id,
            date = %date,
            "Substituto atribuído"
        );
        Ok(assignment)
    }

    pub async fn remove(&self, tenant_id: Uuid, operator_id: Uuid, date: NaiveDate) -> Result<(), AppError> {
        let removed = self.backup_repo
            .delete_for_operator(&self.pool, tenant_id, operator_id, date)
            .await?;

        if removed == 0 {
            return Err(AppError::NotFound(format!("Substituição do operador {} em {}", operator_id, date)));
        }

        self.cache.invalidate_on_backup_change(tenant_id).await?;
        Ok(())
    }
}
