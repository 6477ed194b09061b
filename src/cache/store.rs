// src/cache/store.rs

//! Backends chave-valor com TTL.
//!
//! O cache só acelera: qualquer erro aqui é absorvido pelo coordenador,
//! que volta ao cálculo direto.

use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Backend de cache indisponível: {0}")]
    Unavailable(String),

    #[error("Lock do cache envenenado")]
    Poisoned,
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Operações mínimas: ler, gravar com TTL, apagar por chave.
/// Não há read-modify-write; apagar duas vezes é igual a apagar uma.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;

    /// Devolve `true` se a chave existia.
    async fn delete(&self, key: &str) -> CacheResult<bool>;
}

// ---
// Memória (um processo)
// ---

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove as entradas expiradas. Chamado a cada escrita.
    fn purge_expired(entries: &mut HashMap<String, Entry>, now: Instant) {
        entries.retain(|_, entry| entry.expires_at > now);
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        Self::purge_expired(&mut entries, now);
        entries.insert(key.to_string(), Entry { value, expires_at: now + ttl });
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }
}

// ---
// NoOp: nunca encontra nada, aceita todas as escritas
// ---

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCacheStore;

#[async_trait]
impl CacheStore for NoOpCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }
}

/// Backend escolhido pela configuração (`OCCUPANCY_CACHE_BACKEND`).
pub enum CacheProvider {
    Memory(MemoryCacheStore),
    NoOp(NoOpCacheStore),
}

impl CacheProvider {
    pub fn name(&self) -> &'static str {
        match self {
            CacheProvider::Memory(_) => "memory",
            CacheProvider::NoOp(_) => "none",
        }
    }
}

#[async_trait]
impl CacheStore for CacheProvider {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        match self {
            CacheProvider::Memory(store) => store.get(key).await,
            CacheProvider::NoOp(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        match self {
            CacheProvider::Memory(store) => store.set(key, value, ttl).await,
            CacheProvider::NoOp(store) => store.set(key, value, ttl).await,
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        match self {
            CacheProvider::Memory(store) => store.delete(key).await,
            CacheProvider::NoOp(store) => store.delete(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip_and_delete() {
        let store = MemoryCacheStore::new();
        store.set("k", b"v".to_vec(), Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
        assert!(store.delete("k").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), None);
        // Segunda remoção: sem erro, só não havia nada
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn memory_store_entries_expire() {
        let store = MemoryCacheStore::new();
        store.set("k", b"v".to_vec(), Duration::from_millis(20)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn writes_purge_expired_entries() {
        let store = MemoryCacheStore::new();
        store.set("old", b"1".to_vec(), Duration::from_millis(10)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        store.set("new", b"2".to_vec(), Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.entries.read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn noop_store_always_misses() {
        let provider = CacheProvider::NoOp(NoOpCacheStore);
        provider.set("k", b"v".to_vec(), Duration::from_secs(60)).await.unwrap();

        assert_eq!(provider.get("k").await.unwrap(), None);
        assert_eq!(provider.name(), "none");
    }
}
