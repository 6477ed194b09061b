// src/db/occupancy_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::{AttendanceRepository, BackupRepository, OperatorRepository, PosteRepository},
    models::{
        attendance::Attendance,
        backup::BackupAssignment,
        operator::Operator,
        poste::{CriticalPosition, Poste},
    },
};

/// As leituras de que o agregador de ocupação precisa, todas por tenant.
///
/// Só leitura: quem escreve nestas tabelas são os serviços de escrita.
#[async_trait]
pub trait OccupancySource: Send + Sync {
    /// Só os pares com `is_critical = true`.
    async fn critical_positions(&self, tenant_id: Uuid) -> Result<Vec<CriticalPosition>, AppError>;

    async fn postes(&self, tenant_id: Uuid) -> Result<Vec<Poste>, AppError>;

    async fn operators(&self, tenant_id: Uuid) -> Result<Vec<Operator>, AppError>;

    async fn attendance_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<Attendance>, AppError>;

    async fn backups_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<BackupAssignment>, AppError>;
}

// Implementação PostgreSQL: delega nos repositórios de cada tabela.
#[derive(Clone)]
pub struct OccupancyRepository {
    postes: PosteRepository,
    operators: OperatorRepository,
    attendance: AttendanceRepository,
    backups: BackupRepository,
}

impl OccupancyRepository {
    pub fn new(
        postes: PosteRepository,
        operators: OperatorRepository,
        attendance: AttendanceRepository,
        backups: BackupRepository,
    ) -> Self {
        Self { postes, operators, attendance, backups }
    }
}

#[async_trait]
impl OccupancySource for OccupancyRepository {
    async fn critical_positions(&self, tenant_id: Uuid) -> Result<Vec<CriticalPosition>, AppError> {
        self.postes.list_critical_positions(self.postes.pool(), tenant_id).await
    }

    async fn postes(&self, tenant_id: Uuid) -> Result<Vec<Poste>, AppError> {
        self.postes.list_postes(self.postes.pool(), tenant_id).await
    }

    async fn operators(&self, tenant_id: Uuid) -> Result<Vec<Operator>, AppError> {
        self.operators.list_operators(self.operators.pool(), tenant_id).await
    }

    async fn attendance_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<Attendance>, AppError> {
        self.attendance.list_for_date(self.attendance.pool(), tenant_id, date).await
    }

    async fn backups_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<BackupAssignment>, AppError> {
        self.backups.list_for_date(self.backups.pool(), tenant_id, date).await
    }
}
