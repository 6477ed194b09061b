// src/test_support.rs

// Fonte de dados em memória e backend de cache que falha sempre,
// para testar o agregador e o cache sem PostgreSQL.

use std::{
    borrow::Cow,
    collections::HashMap,
    error::Error as StdError,
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    cache::store::{CacheError, CacheResult, CacheStore},
    common::error::AppError,
    db::OccupancySource,
    models::{
        attendance::{Attendance, AttendanceStatus},
        backup::BackupAssignment,
        operator::Operator,
        poste::{CriticalPosition, Poste},
    },
};

/// Dia fixo usado pelos testes.
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).expect("data válida")
}

#[derive(Debug, Default, Clone)]
pub struct Fixture {
    pub postes: Vec<Poste>,
    pub critical_positions: Vec<CriticalPosition>,
    pub operators: Vec<Operator>,
    pub attendance: Vec<Attendance>,
    pub backups: Vec<BackupAssignment>,
}

#[derive(Default)]
pub struct MemorySource {
    data: Mutex<Fixture>,
    reads: Mutex<HashMap<&'static str, usize>>,
    failing: AtomicBool,
    delay_ms: AtomicU64,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_poste(&self, tenant_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.data.lock().unwrap().postes.push(Poste { id, tenant_id, name: name.to_string() });
        id
    }

    pub fn mark_critical(&self, tenant_id: Uuid, poste_id: Uuid, ligne: &str) {
        self.data.lock().unwrap().critical_positions.push(CriticalPosition {
            id: Uuid::new_v4(),
            poste_id,
            ligne: ligne.to_string(),
            tenant_id,
            is_critical: true,
        });
    }

    pub fn add_operator(&self, tenant_id: Uuid, first: &str, last: &str, poste_id: Uuid, ligne: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut data = self.data.lock().unwrap();
        let matricule = format!("M-{:04}", data.operators.len() + 1);
        data.operators.push(Operator {
            id,
            tenant_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            matricule,
            poste_id: Some(poste_id),
            ligne: ligne.to_string(),
            is_capable: true,
            is_critical: false,
        });
        id
    }

    /// UPSERT em (operator_id, date), como a tabela real.
    pub fn set_attendance(&self, operator_id: Uuid, date: NaiveDate, status: AttendanceStatus) {
        let mut data = self.data.lock().unwrap();
        match data.attendance.iter_mut().find(|a| a.operator_id == operator_id && a.date == date) {
            Some(existing) => existing.status = status,
            None => data.attendance.push(Attendance { id: Uuid::new_v4(), operator_id, date, status }),
        }
    }

    pub fn assign_backup(&self, tenant_id: Uuid, operator_id: Uuid, backup_operator_id: Uuid, date: NaiveDate) {
        let mut data = self.data.lock().unwrap();
        let poste_id = data.operators
            .iter()
            .find(|o| o.id == operator_id)
            .and_then(|o| o.poste_id)
            .unwrap_or_else(Uuid::nil);
        data.backups.retain(|b| !(b.operator_id == operator_id && b.assigned_date == date));
        data.backups.push(BackupAssignment {
            id: Uuid::new_v4(),
            poste_id,
            operator_id,
            backup_operator_id,
            backup_slot: 1,
            assigned_date: date,
            tenant_id,
        });
    }

    /// Apaga só o registo do poste, deixando as referências penduradas.
    pub fn forget_poste(&self, poste_id: Uuid) {
        self.data.lock().unwrap().postes.retain(|p| p.id != poste_id);
    }

    pub fn forget_operator(&self, operator_id: Uuid) {
        self.data.lock().unwrap().operators.retain(|o| o.id != operator_id);
    }

    pub fn reads_of(&self, name: &str) -> usize {
        self.reads.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn fail_reads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    async fn read(&self, name: &'static str) -> Result<(), AppError> {
        *self.reads.lock().unwrap().entry(name).or_default() += 1;
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl OccupancySource for MemorySource {
    async fn critical_positions(&self, tenant_id: Uuid) -> Result<Vec<CriticalPosition>, AppError> {
        self.read("critical_positions").await?;
        let data = self.data.lock().unwrap();
        Ok(data.critical_positions
            .iter()
            .filter(|cp| cp.tenant_id == tenant_id && cp.is_critical)
            .cloned()
            .collect())
    }

    async fn postes(&self, tenant_id: Uuid) -> Result<Vec<Poste>, AppError> {
        self.read("postes").await?;
        let data = self.data.lock().unwrap();
        Ok(data.postes.iter().filter(|p| p.tenant_id == tenant_id).cloned().collect())
    }

    async fn operators(&self, tenant_id: Uuid) -> Result<Vec<Operator>, AppError> {
        self.read("operators").await?;
        let data = self.data.lock().unwrap();
        Ok(data.operators.iter().filter(|o| o.tenant_id == tenant_id).cloned().collect())
    }

    async fn attendance_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<Attendance>, AppError> {
        self.read("attendance").await?;
        let data = self.data.lock().unwrap();
        Ok(data.attendance
            .iter()
            .filter(|a| a.date == date)
            .filter(|a| data.operators.iter().any(|o| o.id == a.operator_id && o.tenant_id == tenant_id))
            .cloned()
            .collect())
    }

    async fn backups_on(&self, tenant_id: Uuid, date: NaiveDate) -> Result<Vec<BackupAssignment>, AppError> {
        self.read("backups").await?;
        let data = self.data.lock().unwrap();
        Ok(data.backups
            .iter()
            .filter(|b| b.tenant_id == tenant_id && b.assigned_date == date)
            .cloned()
            .collect())
    }
}

/// Backend de cache fora do ar.
pub struct FailingCacheStore;

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Err(CacheError::Unavailable("backend desligado".into()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Unavailable("backend desligado".into()))
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Err(CacheError::Unavailable("backend desligado".into()))
    }
}

/// Erro de banco sintético para testar o mapeamento de violações de constraint.
#[derive(Debug)]
pub struct FakeDatabaseError {
    unique: bool,
    code: &'static str,
}

impl FakeDatabaseError {
    pub fn unique_violation() -> Self {
        Self { unique: true, code: "23505" }
    }

    pub fn foreign_key_violation() -> Self {
        Self { unique: false, code: "23503" }
    }
}

impl fmt::Display for FakeDatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "erro sintético {}", self.code)
    }
}

impl StdError for FakeDatabaseError {}

impl sqlx::error::DatabaseError for FakeDatabaseError {
    fn message(&self) -> &str {
        "erro sintético"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        if self.unique {
            sqlx::error::ErrorKind::UniqueViolation
        } else {
            sqlx::error::ErrorKind::ForeignKeyViolation
        }
    }
}

// `sqlx::Error: From<FakeDatabaseError>` vem do impl genérico do sqlx para
// qualquer `E: DatabaseError` (equivale a `sqlx::Error::Database(Box::new(e))`).
