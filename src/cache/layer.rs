// src/cache/layer.rs

//! Acesso tipado ao backend: JSON, TTL por família e contadores.
//! Nenhum erro do backend sai daqui; viram aviso e "miss".

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::{
    keys::{KeyFamily, TenantKey},
    settings::CacheSettings,
    store::CacheStore,
};
use crate::common::error::AppError;

/// Estatísticas de uso do cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Falhas do backend absorvidas (leitura, escrita ou remoção).
    pub backend_errors: u64,
}

impl CacheStats {
    /// Taxa de acerto (0.0 a 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    backend_errors: AtomicU64,
}

#[derive(Clone)]
pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
    settings: Arc<CacheSettings>,
    counters: Arc<Counters>,
}

impl CacheLayer {
    pub fn new(store: Arc<dyn CacheStore>, settings: CacheSettings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            backend_errors: self.counters.backend_errors.load(Ordering::Relaxed),
        }
    }

    /// `None` em miss, em falha do backend ou em valor ilegível.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &TenantKey) -> Option<T> {
        let rendered = key.to_string();

        let bytes = match self.store.get(&rendered).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %rendered, "cache miss");
                return None;
            }
            Err(e) => {
                self.counters.backend_errors.fetch_add(1, Ordering::Relaxed);
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(key = %rendered, error = %e, "Falha ao ler do cache, seguindo sem cache");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %rendered, "cache hit");
                Some(value)
            }
            Err(e) => {
                // Formato antigo ou corrompido: descarta e recalcula
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(key = %rendered, error = %e, "Valor ilegível no cache, descartando");
                self.delete_key(&rendered).await;
                None
            }
        }
    }

    /// Melhor esforço: uma falha só fica registada.
    pub async fn put_json<T: Serialize>(&self, key: &TenantKey, value: &T) {
        let rendered = key.to_string();
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key = %rendered, error = %e, "Falha ao serializar valor para o cache");
                return;
            }
        };

        let ttl = self.settings.ttl_for(key.family());
        if let Err(e) = self.store.set(&rendered, bytes, ttl).await {
            self.counters.backend_errors.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(key = %rendered, error = %e, "Falha ao gravar no cache");
        }
    }

    /// Lê do cache ou carrega com `load` e grava o resultado.
    /// Erros de `load` propagam e não são gravados.
    pub async fn get_or_load<T, F, Fut>(&self, key: TenantKey, load: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(cached) = self.get_json(&key).await {
            return Ok(cached);
        }

        let value = load().await?;
        self.put_json(&key, &value).await;
        Ok(value)
    }

    /// Apaga as chaves das famílias para o tenant. Famílias datadas:
    /// ontem, hoje e amanhã, por causa da virada do dia.
    /// Devolve quantas chaves existiam.
    pub async fn delete_families(&self, tenant_id: Uuid, families: &[KeyFamily], today: NaiveDate) -> usize {
        let mut removed = 0;
        for &family in families {
            for key in keys_of(tenant_id, family, today) {
                if self.delete_key(&key.to_string()).await {
                    removed += 1;
                }
            }
        }
        removed
    }

    async fn delete_key(&self, rendered: &str) -> bool {
        match self.store.delete(rendered).await {
            Ok(existed) => {
                tracing::debug!(key = %rendered, existed, "chave removida do cache");
                existed
            }
            Err(e) => {
                self.counters.backend_errors.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(key = %rendered, error = %e, "Falha ao remover chave do cache");
                false
            }
        }
    }
}

fn keys_of(tenant_id: Uuid, family: KeyFamily, today: NaiveDate) -> Vec<TenantKey> {
    if !family.is_dated() {
        return vec![TenantKey::new(tenant_id, family)];
    }
    [today.pred_opt(), Some(today), today.succ_opt()]
        .into_iter()
        .flatten()
        .map(|date| TenantKey::dated(tenant_id, family, date))
        .collect()
}
