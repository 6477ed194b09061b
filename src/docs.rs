// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Ocupação ---
        handlers::occupancy::get_occupancy,

        // --- Presenças ---
        handlers::attendance::toggle_attendance,

        // --- Substituições ---
        handlers::backups::assign_backup,
        handlers::backups::remove_backup,

        // --- Postes ---
        handlers::postes::list_postes,
        handlers::postes::create_poste,
        handlers::postes::rename_poste,
        handlers::postes::delete_poste,
        handlers::postes::set_critical_position,

        // --- Operadores ---
        handlers::operators::reassign_operator,
        handlers::operators::delete_operator,
    ),
    components(
        schemas(
            // --- Ocupação ---
            models::occupancy::StatusTag,
            models::occupancy::BackupCoverage,
            models::occupancy::OccupancyRow,
            models::occupancy::OccupancyReport,

            // --- Cadastro ---
            models::poste::Poste,
            models::poste::CriticalPosition,
            models::operator::Operator,
            models::attendance::AttendanceStatus,
            models::attendance::Attendance,
            models::backup::BackupAssignment,

            // --- Payloads ---
            handlers::attendance::ToggleAttendancePayload,
            handlers::backups::AssignBackupPayload,
            handlers::postes::PosteNamePayload,
            handlers::postes::SetCriticalPayload,
            handlers::operators::ReassignOperatorPayload,
        )
    ),
    tags(
        (name = "Occupancy", description = "Ocupação dos postos críticos"),
        (name = "Attendance", description = "Presenças do dia"),
        (name = "Backups", description = "Substitutos de operadores ausentes"),
        (name = "Postes", description = "Postes e criticidade por ligne"),
        (name = "Operators", description = "Atribuição de operadores")
    )
)]
pub struct ApiDoc;
