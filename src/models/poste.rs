// src/models/poste.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Poste (O posto de trabalho)
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Poste {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Bol")]
    pub name: String,
}

// ---
// 2. CriticalPosition (Poste x Ligne)
// ---
// A criticidade é sempre do par (poste, ligne), nunca só do poste.
// Chave única: (poste_id, ligne, tenant_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPosition {
    pub id: Uuid,
    pub poste_id: Uuid,
    #[schema(example = "Ligne 1")]
    pub ligne: String,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub is_critical: bool,
}
