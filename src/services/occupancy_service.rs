// src/services/occupancy_service.rs

use std::{
    cmp::Ordering,
    collections::{hash_map::Entry, HashMap, HashSet},
    sync::Arc,
};

use chrono::NaiveDate;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::OccupancySource,
    models::{
        attendance::{Attendance, AttendanceStatus},
        backup::BackupAssignment,
        occupancy::{BackupCoverage, OccupancyReport, OccupancyRow, StatusTag},
        operator::Operator,
        poste::{CriticalPosition, Poste},
    },
};

/// Agregador de ocupação dos postos críticos.
///
/// Lê as fontes no momento da chamada e não tem efeitos colaterais: para o
/// mesmo snapshot de dados devolve sempre o mesmo relatório, na mesma ordem.
#[derive(Clone)]
pub struct OccupancyService {
    source: Arc<dyn OccupancySource>,
}

// Tudo o que o agregador leu para um tenant num dado dia.
#[derive(Debug, Clone, Default)]
pub struct OccupancySnapshot {
    pub critical_positions: Vec<CriticalPosition>,
    pub postes: Vec<Poste>,
    pub operators: Vec<Operator>,
    pub attendance: Vec<Attendance>,
    pub backups: Vec<BackupAssignment>,
}

impl OccupancyService {
    pub fn new(source: Arc<dyn OccupancySource>) -> Self {
        Self { source }
    }

    pub async fn compute(&self, tenant_id: Uuid, today: NaiveDate) -> Result<OccupancyReport, AppError> {
        // 1. Pares críticos. Sem nenhum, não há mais nada a ler.
        let critical_positions = self.source.critical_positions(tenant_id).await?;
        if !critical_positions.iter().any(|cp| cp.is_critical) {
            return Ok(OccupancyReport::empty());
        }

        // 2. As outras quatro leituras são independentes: fan-out, depois junção.
        let (postes, operators, attendance, backups) = tokio::try_join!(
            self.source.postes(tenant_id),
            self.source.operators(tenant_id),
            self.source.attendance_on(tenant_id, today),
            self.source.backups_on(tenant_id, today),
        )?;

        let snapshot = OccupancySnapshot {
            critical_positions,
            postes,
            operators,
            attendance,
            backups,
        };

        let report = build_report(tenant_id, &snapshot);
        tracing::debug!(
            tenant_id = %tenant_id,
            rows = report.rows.len(),
            vacant = report.rows.iter().filter(|row| row.is_vacant()).count(),
            "Ocupação calculada"
        );
        Ok(report)
    }
}

/// Junção em memória: índices por (poste_id, ligne) e por operator_id,
/// depois uma única passagem pelos pares críticos.
///
/// Lacunas referenciais (poste apagado, substituto apagado, dados de outro
/// tenant) são ignoradas com um aviso; o lote nunca é abortado.
pub fn build_report(tenant_id: Uuid, snapshot: &OccupancySnapshot) -> OccupancyReport {
    let poste_names: HashMap<Uuid, &str> = snapshot.postes
        .iter()
        .filter(|p| p.tenant_id == tenant_id)
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    // Pares críticos únicos, pela ordem de chegada
    let mut critical_pairs: HashSet<(Uuid, &str)> = HashSet::new();
    let mut pairs: Vec<(Uuid, &str)> = Vec::new();
    for cp in &snapshot.critical_positions {
        if !cp.is_critical || cp.tenant_id != tenant_id {
            continue;
        }
        if critical_pairs.insert((cp.poste_id, cp.ligne.as_str())) {
            pairs.push((cp.poste_id, cp.ligne.as_str()));
        }
    }

    let mut operators_by_id: HashMap<Uuid, &Operator> = HashMap::new();
    let mut operators_by_pair: HashMap<(Uuid, &str), Vec<&Operator>> = HashMap::new();
    for operator in &snapshot.operators {
        if operator.tenant_id != tenant_id {
            tracing::warn!(
                %tenant_id,
                operator_id = %operator.id,
                "Operador de outro tenant na leitura; ignorado"
            );
            continue;
        }
        operators_by_id.insert(operator.id, operator);

        if let Some(poste_id) = operator.poste_id {
            let key = (poste_id, operator.ligne.as_str());
            if critical_pairs.contains(&key) {
                operators_by_pair.entry(key).or_default().push(operator);
            }
        }
    }

    // No máximo uma presença por operador e por dia
    let mut presence: HashMap<Uuid, AttendanceStatus> = HashMap::new();
    for attendance in &snapshot.attendance {
        match presence.entry(attendance.operator_id) {
            Entry::Vacant(slot) => {
                slot.insert(attendance.status);
            }
            Entry::Occupied(_) => {
                tracing::warn!(
                    %tenant_id,
                    operator_id = %attendance.operator_id,
                    "Mais de uma presença para o mesmo operador no mesmo dia; fica a primeira"
                );
            }
        }
    }

    // A substituição pertence ao operador ausente, nunca ao poste
    let mut backups_by_operator: HashMap<Uuid, Vec<&BackupAssignment>> = HashMap::new();
    for backup in snapshot.backups.iter().filter(|b| b.tenant_id == tenant_id) {
        backups_by_operator.entry(backup.operator_id).or_default().push(backup);
    }

    let mut report = OccupancyReport::empty();

    for (poste_id, ligne) in pairs {
        let Some(poste_name) = poste_names.get(&poste_id).copied() else {
            tracing::warn!(
                %tenant_id,
                %poste_id,
                ligne,
                "Posto crítico sem registo de poste; par ignorado"
            );
            continue;
        };

        let assigned = operators_by_pair
            .get(&(poste_id, ligne))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if assigned.is_empty() {
            report.rows.push(OccupancyRow::vacant(poste_id, poste_name, ligne));
            report.non_occupied_count += 1;
            continue;
        }

        let first_row = report.rows.len();
        for operator in assigned {
            // Sem linha de presença hoje = presente
            let is_present = !matches!(presence.get(&operator.id), Some(AttendanceStatus::Absent));
            let coverage = backup_coverage(
                tenant_id,
                operator,
                backups_by_operator.get(&operator.id),
                &operators_by_id,
            );
            let has_backup = !coverage.is_empty();
            let status_tag = StatusTag::from_presence(is_present, has_backup);

            report.rows.push(OccupancyRow {
                poste_id,
                ligne: ligne.to_string(),
                poste_name: poste_name.to_string(),
                operator_id: Some(operator.id),
                operator_name: Some(operator.full_name()),
                is_present,
                has_backup,
                is_non_occupied: false,
                status_tag,
                urgency_level: status_tag.urgency_level(),
                backup_assignments: coverage,
            });
        }

        // Um incremento por par, não por operador
        let pair_rows = &mut report.rows[first_row..];
        let occupied = pair_rows.iter().any(|row| row.is_present || row.has_backup);
        for row in pair_rows.iter_mut() {
            row.is_non_occupied = !occupied;
        }
        if occupied {
            report.occupied_count += 1;
        } else {
            report.non_occupied_count += 1;
        }
    }

    report.rows.sort_by(compare_rows);
    report
}

fn backup_coverage(
    tenant_id: Uuid,
    operator: &Operator,
    assignments: Option<&Vec<&BackupAssignment>>,
    operators_by_id: &HashMap<Uuid, &Operator>,
) -> Vec<BackupCoverage> {
    let Some(assignments) = assignments else {
        return Vec::new();
    };

    if assignments.len() > 1 {
        tracing::warn!(
            %tenant_id,
            operator_id = %operator.id,
            count = assignments.len(),
            "Mais de uma substituição para o mesmo operador no mesmo dia"
        );
    }

    let mut coverage: Vec<BackupCoverage> = assignments
        .iter()
        .filter_map(|assignment| match operators_by_id.get(&assignment.backup_operator_id) {
            Some(backup) => Some(BackupCoverage {
                backup_operator_id: backup.id,
                backup_operator_name: backup.full_name(),
                backup_slot: assignment.backup_slot,
            }),
            None => {
                tracing::warn!(
                    %tenant_id,
                    operator_id = %operator.id,
                    backup_operator_id = %assignment.backup_operator_id,
                    "Substituto inexistente; substituição ignorada"
                );
                None
            }
        })
        .collect();

    coverage.sort_by_key(|c| (c.backup_slot, c.backup_operator_id));
    coverage
}

/// Pares não ocupados primeiro, depois urgência, poste, ligne.
/// O operador desempata dentro do mesmo par, para a ordem ser total.
pub fn compare_rows(a: &OccupancyRow, b: &OccupancyRow) -> Ordering {
    b.is_non_occupied.cmp(&a.is_non_occupied)
        .then_with(|| b.urgency_level.cmp(&a.urgency_level))
        .then_with(|| a.poste_name.cmp(&b.poste_name))
        .then_with(|| a.ligne.cmp(&b.ligne))
        .then_with(|| a.operator_name.cmp(&b.operator_name))
        .then_with(|| a.operator_id.cmp(&b.operator_id))
}
