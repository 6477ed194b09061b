// src/models/occupancy.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- Etiqueta de estado de uma linha ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StatusTag {
    // Operador presente: sem etiqueta
    #[serde(rename = "")]
    Normal,
    // Ausente, mas com substituto
    #[serde(rename = "COVERED")]
    Covered,
    // Ausente sem substituto, ou par vago
    #[serde(rename = "URGENT")]
    Urgent,
}

impl StatusTag {
    /// 1 normal, 2 coberto, 3 urgente.
    pub fn urgency_level(self) -> u8 {
        match self {
            StatusTag::Normal => 1,
            StatusTag::Covered => 2,
            StatusTag::Urgent => 3,
        }
    }

    pub fn from_presence(is_present: bool, has_backup: bool) -> Self {
        match (is_present, has_backup) {
            (true, _) => StatusTag::Normal,
            (false, true) => StatusTag::Covered,
            (false, false) => StatusTag::Urgent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupCoverage {
    pub backup_operator_id: Uuid,
    pub backup_operator_name: String,
    pub backup_slot: i32,
}

// ---
// OccupancyRow (Nunca persistida)
// ---
// Uma linha por operador de um par crítico, ou uma linha "vaga"
// (operator_id = None) quando ninguém está atribuído ao par.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyRow {
    pub poste_id: Uuid,
    #[schema(example = "Ligne 1")]
    pub ligne: String,
    #[schema(example = "Bol")]
    pub poste_name: String,
    pub operator_id: Option<Uuid>,
    pub operator_name: Option<String>,
    pub is_present: bool,
    pub has_backup: bool,
    // Estado do par inteiro, repetido em cada linha do par
    pub is_non_occupied: bool,
    pub status_tag: StatusTag,
    #[schema(example = 3)]
    pub urgency_level: u8,
    pub backup_assignments: Vec<BackupCoverage>,
}

impl OccupancyRow {
    pub fn vacant(poste_id: Uuid, poste_name: &str, ligne: &str) -> Self {
        Self {
            poste_id,
            ligne: ligne.to_string(),
            poste_name: poste_name.to_string(),
            operator_id: None,
            operator_name: None,
            is_present: false,
            has_backup: false,
            is_non_occupied: true,
            status_tag: StatusTag::Urgent,
            urgency_level: StatusTag::Urgent.urgency_level(),
            backup_assignments: Vec::new(),
        }
    }

    pub fn is_vacant(&self) -> bool {
        self.operator_id.is_none()
    }
}

// O resultado do agregador (cards + tabela do dashboard)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub occupied_count: usize,
    pub non_occupied_count: usize,
    pub rows: Vec<OccupancyRow>,
}

impl OccupancyReport {
    pub fn empty() -> Self {
        Self::default()
    }
}
