use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use contracts::dashboards::d402_reference_audit::{OrphanedReference, ReferenceAuditReport};
use contracts::domain::a001_employee::Employee;
use contracts::domain::a002_reference_list::ReferenceKind;

use crate::shared::data::Database;

/// Check every employee against the current reference lists
pub fn run_reference_audit(db: &Database) -> Result<ReferenceAuditReport> {
    let employees = db
        .employees()
        .list_all()
        .context("Failed to load employees for the audit")?;

    let mut lists = HashMap::new();
    for kind in ReferenceKind::ALL {
        let values = db
            .reference_list(kind)
            .list()
            .with_context(|| format!("Failed to load {}", kind.list_name()))?;
        lists.insert(kind, values);
    }

    let report = build_audit(&employees, &lists);
    if report.is_clean() {
        tracing::info!("Reference audit: {} employees, no orphans", report.employees_checked);
    } else {
        tracing::warn!(
            "Reference audit: {} orphaned references in {} employees",
            report.orphans.len(),
            report.employees_checked
        );
    }
    Ok(report)
}

/// Employees referencing values absent from their reference list.
///
/// A kind missing from `lists` is treated as an empty list.
pub fn build_audit(
    employees: &[Employee],
    lists: &HashMap<ReferenceKind, Vec<String>>,
) -> ReferenceAuditReport {
    let allowed: HashMap<ReferenceKind, HashSet<&str>> = ReferenceKind::ALL
        .iter()
        .map(|kind| {
            let values = lists
                .get(kind)
                .map(|v| v.iter().map(String::as_str).collect())
                .unwrap_or_default();
            (*kind, values)
        })
        .collect();

    let mut orphans = Vec::new();
    for employee in employees {
        for kind in ReferenceKind::ALL {
            let value = attribute(employee, kind);
            let known = allowed.get(&kind).is_some_and(|set| set.contains(value));
            if !known {
                orphans.push(OrphanedReference {
                    employee_id: employee.id.clone(),
                    number: employee.number.clone(),
                    full_name: employee.full_name.clone(),
                    kind,
                    value: value.to_string(),
                });
            }
        }
    }

    ReferenceAuditReport {
        employees_checked: employees.len(),
        orphans,
    }
}

fn attribute(employee: &Employee, kind: ReferenceKind) -> &str {
    match kind {
        ReferenceKind::Branch => &employee.branch,
        ReferenceKind::Department => &employee.department,
        ReferenceKind::Sector => &employee.sector,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::initialization::initialize_store;

    #[test]
    fn test_seeded_store_is_clean() {
        let db = Database::in_memory();
        initialize_store(&db).unwrap();

        let report = run_reference_audit(&db).unwrap();
        assert_eq!(report.employees_checked, 2);
        assert!(report.is_clean(), "{:?}", report.orphans);
    }

    #[test]
    fn test_removed_reference_is_flagged_not_cascaded() {
        let db = Database::in_memory();
        initialize_store(&db).unwrap();

        db.sectors().remove("VENDAS").unwrap();
        db.branches().remove("SÃO PAULO").unwrap();

        // the employee itself is untouched
        let employees = db.employees().list_all().unwrap();
        assert!(employees.iter().any(|e| e.sector == "VENDAS"));

        let report = run_reference_audit(&db).unwrap();
        assert_eq!(report.orphans.len(), 2);
        assert!(report.orphans.iter().all(|o| o.number == "1002"));

        let sectors: Vec<_> = report.of_kind(ReferenceKind::Sector).collect();
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].value, "VENDAS");
        assert_eq!(report.of_kind(ReferenceKind::Department).count(), 0);
    }

    #[test]
    fn test_missing_lists_flag_everything() {
        let db = Database::in_memory();
        db.employees().seed_defaults().unwrap();

        let report = run_reference_audit(&db).unwrap();
        assert_eq!(report.orphans.len(), 6);
    }
}
