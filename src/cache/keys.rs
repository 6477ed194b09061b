// src/cache/keys.rs

//! Chaves de cache sempre com tenant.
//!
//! `TenantKey` só se constrói com um `tenant_id`: não existe chave partilhada
//! entre tenants. Uma chave canónica por (família, tenant), mais o dia para as
//! famílias que dependem da data.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// Agregado de ocupação (tier 1).
    Occupancy,
    Operators,
    CriticalPositions,
    Postes,
    TodayAttendance,
    TodayBackups,
}

impl KeyFamily {
    pub const ALL: [KeyFamily; 6] = [
        KeyFamily::Occupancy,
        KeyFamily::Operators,
        KeyFamily::CriticalPositions,
        KeyFamily::Postes,
        KeyFamily::TodayAttendance,
        KeyFamily::TodayBackups,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            KeyFamily::Occupancy => "occupancy",
            KeyFamily::Operators => "operators",
            KeyFamily::CriticalPositions => "critical_positions",
            KeyFamily::Postes => "postes",
            KeyFamily::TodayAttendance => "attendance",
            KeyFamily::TodayBackups => "backups",
        }
    }

    /// Famílias cuja chave leva a data do dia.
    pub fn is_dated(self) -> bool {
        matches!(self, KeyFamily::TodayAttendance | KeyFamily::TodayBackups)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantKey {
    tenant_id: Uuid,
    family: KeyFamily,
    date: Option<NaiveDate>,
}

impl TenantKey {
    /// Chave de uma família sem data.
    pub fn new(tenant_id: Uuid, family: KeyFamily) -> Self {
        debug_assert!(!family.is_dated(), "família {:?} exige data", family);
        Self { tenant_id, family, date: None }
    }

    pub fn dated(tenant_id: Uuid, family: KeyFamily, date: NaiveDate) -> Self {
        Self { tenant_id, family, date: Some(date) }
    }

    pub fn family(&self) -> KeyFamily {
        self.family
    }
}

// Formato: "{familia}:{tenant}" ou "{familia}:{tenant}:{AAAA-MM-DD}"
impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "{}:{}:{}", self.family.prefix(), self.tenant_id, date.format("%Y-%m-%d")),
            None => write!(f, "{}:{}", self.family.prefix(), self.tenant_id),
        }
    }
}
