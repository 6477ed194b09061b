// src/models/backup.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// BackupAssignment (Substituição do dia)
// ---
// Ligada ao operador ausente, não ao poste. Única por (operator_id, assigned_date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupAssignment {
    pub id: Uuid,
    pub poste_id: Uuid,
    pub operator_id: Uuid,
    pub backup_operator_id: Uuid,
    #[schema(example = 1)]
    pub backup_slot: i32,
    pub assigned_date: NaiveDate,
    #[schema(ignore)]
    pub tenant_id: Uuid,
}
