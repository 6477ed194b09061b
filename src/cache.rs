// src/cache.rs

//! Cache do relatório de ocupação.
//!
//! - tier 1: o agregado por tenant (`occupancy:{tenant}`)
//! - tier 2: as listas de referência lidas pelo agregador
//!
//! O cache só acelera. Backend fora do ar significa recálculo direto,
//! nunca falha na leitura.

pub mod cached_source;
pub mod coordinator;
pub mod invalidation;
pub mod keys;
pub mod layer;
pub mod settings;
pub mod store;

pub use cached_source::CachedSource;
pub use coordinator::CacheCoordinator;
pub use layer::{CacheLayer, CacheStats};
pub use settings::CacheSettings;
pub use store::CacheProvider;
