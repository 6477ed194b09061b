// src/models/attendance.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum AttendanceStatus {
    Present,
    Absent,
}

// Uma linha por (operator_id, date). Sem linha = presente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
