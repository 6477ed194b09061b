// src/models/operator.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "M-0042")]
    pub matricule: String,

    // NULL quando o poste foi apagado
    pub poste_id: Option<Uuid>,
    pub ligne: String,

    pub is_capable: bool,
    // Flag do operador, independente da criticidade do posto
    pub is_critical: bool,
}

impl Operator {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
