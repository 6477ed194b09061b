// src/handlers.rs

use serde::{Deserialize, Deserializer};

pub mod health;
pub mod occupancy;
pub mod attendance;
pub mod backups;
pub mod postes;
pub mod operators;

/// Remove espaços das pontas antes da validação: "   " chega como "".
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}
