// src/cache/settings.rs

use std::{env, time::Duration};

use super::{
    keys::KeyFamily,
    store::{CacheProvider, MemoryCacheStore, NoOpCacheStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Memory,
    /// Cache desligado: todas as leituras recalculam.
    None,
}

impl CacheBackendKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" => Some(CacheBackendKind::Memory),
            "none" | "noop" | "off" => Some(CacheBackendKind::None),
            _ => None,
        }
    }
}

const TTL_VARIABLES: [(KeyFamily, &str); 6] = [
    (KeyFamily::Occupancy, "OCCUPANCY_CACHE_TTL_SECS"),
    (KeyFamily::Operators, "OPERATORS_CACHE_TTL_SECS"),
    (KeyFamily::TodayAttendance, "ATTENDANCE_CACHE_TTL_SECS"),
    (KeyFamily::TodayBackups, "BACKUPS_CACHE_TTL_SECS"),
    (KeyFamily::CriticalPositions, "CRITICAL_POSITIONS_CACHE_TTL_SECS"),
    (KeyFamily::Postes, "POSTES_CACHE_TTL_SECS"),
];

/// TTL por família e backend do cache de ocupação.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackendKind,
    pub occupancy_ttl: Duration,
    pub operators_ttl: Duration,
    pub attendance_ttl: Duration,
    pub backups_ttl: Duration,
    pub critical_positions_ttl: Duration,
    pub postes_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            occupancy_ttl: Duration::from_secs(15),
            operators_ttl: Duration::from_secs(60),
            attendance_ttl: Duration::from_secs(30),
            backups_ttl: Duration::from_secs(30),
            critical_positions_ttl: Duration::from_secs(600),
            postes_ttl: Duration::from_secs(600),
        }
    }
}

impl CacheSettings {
    /// Lê a configuração das variáveis de ambiente.
    ///
    /// - `OCCUPANCY_CACHE_BACKEND`: `memory` (padrão) ou `none`
    /// - `OCCUPANCY_CACHE_TTL_SECS` (15), `OPERATORS_CACHE_TTL_SECS` (60),
    ///   `ATTENDANCE_CACHE_TTL_SECS` (30), `BACKUPS_CACHE_TTL_SECS` (30),
    ///   `CRITICAL_POSITIONS_CACHE_TTL_SECS` (600), `POSTES_CACHE_TTL_SECS` (600)
    ///
    /// Valores inválidos ficam com o padrão (com aviso).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let backend = match lookup("OCCUPANCY_CACHE_BACKEND") {
            Some(raw) => CacheBackendKind::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "OCCUPANCY_CACHE_BACKEND desconhecido, usando 'memory'");
                defaults.backend
            }),
            None => defaults.backend,
        };

        let mut settings = Self { backend, ..defaults };
        for (family, name) in TTL_VARIABLES {
            let Some(raw) = lookup(name) else { continue };
            match raw.trim().parse::<u64>() {
                Ok(secs) => settings = settings.with_ttl(family, Duration::from_secs(secs)),
                Err(_) => tracing::warn!(variable = name, value = %raw, "TTL inválido, usando o padrão"),
            }
        }
        settings
    }

    pub fn with_ttl(mut self, family: KeyFamily, ttl: Duration) -> Self {
        match family {
            KeyFamily::Occupancy => self.occupancy_ttl = ttl,
            KeyFamily::Operators => self.operators_ttl = ttl,
            KeyFamily::TodayAttendance => self.attendance_ttl = ttl,
            KeyFamily::TodayBackups => self.backups_ttl = ttl,
            KeyFamily::CriticalPositions => self.critical_positions_ttl = ttl,
            KeyFamily::Postes => self.postes_ttl = ttl,
        }
        self
    }

    pub fn ttl_for(&self, family: KeyFamily) -> Duration {
        match family {
            KeyFamily::Occupancy => self.occupancy_ttl,
            KeyFamily::Operators => self.operators_ttl,
            KeyFamily::TodayAttendance => self.attendance_ttl,
            KeyFamily::TodayBackups => self.backups_ttl,
            KeyFamily::CriticalPositions => self.critical_positions_ttl,
            KeyFamily::Postes => self.postes_ttl,
        }
    }
}

impl CacheProvider {
    pub fn from_settings(settings: &CacheSettings) -> Self {
        match settings.backend {
            CacheBackendKind::Memory => CacheProvider::Memory(MemoryCacheStore::new()),
            CacheBackendKind::None => CacheProvider::NoOp(NoOpCacheStore),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn aggregate_ttl_is_shorter_than_reference_lists() {
        let settings = CacheSettings::default();
        assert!(settings.ttl_for(KeyFamily::Occupancy) < settings.ttl_for(KeyFamily::Operators));
        assert!(settings.ttl_for(KeyFamily::Operators) < settings.ttl_for(KeyFamily::Postes));
        assert_eq!(settings.ttl_for(KeyFamily::CriticalPositions), Duration::from_secs(600));
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let settings = CacheSettings::from_lookup(lookup_from(&[
            ("OCCUPANCY_CACHE_BACKEND", "none"),
            ("OCCUPANCY_CACHE_TTL_SECS", "5"),
            ("POSTES_CACHE_TTL_SECS", "dez"),
        ]));

        assert_eq!(settings.backend, CacheBackendKind::None);
        assert_eq!(settings.occupancy_ttl, Duration::from_secs(5));
        assert_eq!(settings.postes_ttl, Duration::from_secs(600));
    }

    #[test]
    fn unknown_backend_falls_back_to_memory() {
        let settings = CacheSettings::from_lookup(lookup_from(&[("OCCUPANCY_CACHE_BACKEND", "redis")]));
        assert_eq!(settings.backend, CacheBackendKind::Memory);
        assert_eq!(CacheProvider::from_settings(&settings).name(), "memory");
    }

    #[test]
    fn with_ttl_only_touches_one_family() {
        let settings = CacheSettings::default().with_ttl(KeyFamily::TodayBackups, Duration::from_secs(1));
        assert_eq!(settings.ttl_for(KeyFamily::TodayBackups), Duration::from_secs(1));
        assert_eq!(settings.ttl_for(KeyFamily::TodayAttendance), Duration::from_secs(30));
    }
}
