// src/cache/invalidation.rs

//! Tabela estática: tipo de entidade alterada → famílias de chaves a apagar.
//!
//! É o único sítio onde esta dependência está escrita. Um novo caminho de
//! escrita só tem de registar aqui o seu `ChangeKind`.

use super::keys::KeyFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Attendance,
    Backup,
    Poste,
    Operator,
}

impl ChangeKind {
    #[cfg(test)]
    pub const ALL: [ChangeKind; 4] = [
        ChangeKind::Attendance,
        ChangeKind::Backup,
        ChangeKind::Poste,
        ChangeKind::Operator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Attendance => "attendance",
            ChangeKind::Backup => "backup",
            ChangeKind::Poste => "poste",
            ChangeKind::Operator => "operator",
        }
    }
}

pub const INVALIDATION_TABLE: &[(ChangeKind, &[KeyFamily])] = &[
    (
        ChangeKind::Attendance,
        &[KeyFamily::Occupancy, KeyFamily::TodayAttendance],
    ),
    (
        ChangeKind::Backup,
        &[KeyFamily::Occupancy, KeyFamily::TodayBackups],
    ),
    // Poste e criticidade: as listas de operadores levam poste_id (cascata)
    (
        ChangeKind::Poste,
        &[
            KeyFamily::Occupancy,
            KeyFamily::Postes,
            KeyFamily::CriticalPositions,
            KeyFamily::Operators,
        ],
    ),
    // Apagar um operador apaga as suas presenças e substituições (cascata)
    (
        ChangeKind::Operator,
        &[
            KeyFamily::Occupancy,
            KeyFamily::Operators,
            KeyFamily::TodayAttendance,
            KeyFamily::TodayBackups,
        ],
    ),
];

/// Famílias a apagar para `kind`. `None` se o tipo não foi registado.
pub fn families_for(kind: ChangeKind) -> Option<&'static [KeyFamily]> {
    INVALIDATION_TABLE
        .iter()
        .find(|(registered, _)| *registered == kind)
        .map(|(_, families)| *families)
}
