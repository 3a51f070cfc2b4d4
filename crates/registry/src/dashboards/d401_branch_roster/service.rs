use std::path::Path;

use anyhow::{Context, Result};
use contracts::dashboards::d401_branch_roster::{BranchRoster, BranchRosterRequest};
use contracts::domain::a001_employee::Employee;

use crate::shared::data::Database;
use crate::shared::export::export_to_file;
use crate::shared::list_utils::{filter_list, sort_list};

/// Staffing report of one branch
pub fn get_branch_roster(db: &Database, request: &BranchRosterRequest) -> Result<BranchRoster> {
    let employees = db
        .employees()
        .list_all()
        .context("Failed to load employees for the roster")?;
    Ok(build_roster(employees, request))
}

/// Branch filter, then search, then sort
pub fn build_roster(employees: Vec<Employee>, request: &BranchRosterRequest) -> BranchRoster {
    let branch = request.branch.trim().to_uppercase();

    let of_branch: Vec<Employee> = employees
        .into_iter()
        .filter(|e| e.branch == branch)
        .collect();
    let branch_total = of_branch.len();

    let mut rows = match request.search.as_deref() {
        Some(term) => filter_list(of_branch, term),
        None => of_branch,
    };
    sort_list(&mut rows, request.sort.field, request.sort.direction);

    BranchRoster {
        branch,
        sort: request.sort,
        branch_total,
        rows,
    }
}

/// Export the rendered roster rows to CSV
pub fn export_roster_csv(roster: &BranchRoster, path: &Path) -> Result<()> {
    export_to_file(&roster.rows, path)
        .with_context(|| format!("Failed to export roster of {}", roster.branch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use contracts::domain::a001_employee::{EmployeeDto, EmployeeField, EmployeeId};
    use contracts::shared::list::{SortDirection, SortState};
    use pretty_assertions::assert_eq;

    fn employee(number: &str, name: &str, branch: &str) -> Employee {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Employee::from_dto(
            EmployeeId::new(format!("id-{}", number)),
            EmployeeDto {
                number: number.into(),
                full_name: name.into(),
                branch: branch.into(),
                login: format!("L{}", number),
                password: None,
                department: "COMERCIAL".into(),
                sector: "VENDAS".into(),
            },
            base + Duration::days(number.parse::<i64>().unwrap_or(0)),
        )
    }

    fn staff() -> Vec<Employee> {
        vec![
            employee("10", "CARLA", "MATRIZ"),
            employee("9", "ANA", "MATRIZ"),
            employee("2", "BRUNO SILVA", "MATRIZ"),
            employee("3", "DIEGO SILVA", "CURITIBA"),
        ]
    }

    fn names(roster: &BranchRoster) -> Vec<&str> {
        roster.rows.iter().map(|e| e.full_name.as_str()).collect()
    }

    #[test]
    fn test_roster_defaults_to_name_order() {
        let roster = build_roster(staff(), &BranchRosterRequest::for_branch("matriz"));

        assert_eq!(roster.branch, "MATRIZ");
        assert_eq!(roster.branch_total, 3);
        assert_eq!(names(&roster), vec!["ANA", "BRUNO SILVA", "CARLA"]);
    }

    #[test]
    fn test_roster_search_and_numeric_sort() {
        let request = BranchRosterRequest {
            branch: "MATRIZ".into(),
            search: Some(" ".into()),
            sort: SortState::new(EmployeeField::Number, SortDirection::Descending),
        };
        let roster = build_roster(staff(), &request);
        assert_eq!(names(&roster), vec!["CARLA", "ANA", "BRUNO SILVA"]);

        let request = BranchRosterRequest {
            search: Some("silva".into()),
            ..request
        };
        let roster = build_roster(staff(), &request);
        assert_eq!(names(&roster), vec!["BRUNO SILVA"]);
        assert_eq!(roster.total(), 1);
        assert_eq!(roster.branch_total, 3);
    }

    #[test]
    fn test_roster_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matriz.csv");
        let roster = build_roster(staff(), &BranchRosterRequest::for_branch("MATRIZ"));

        export_roster_csv(&roster, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("9;ANA;MATRIZ;L9;COMERCIAL;VENDAS;10/05/2024"));
    }

    #[test]
    fn test_lowercase_branch_input_reaches_roster_and_dashboard() {
        use crate::dashboards::d400_employee_summary::service::get_employee_summary;
        use crate::dashboards::d402_reference_audit::service::run_reference_audit;
        use crate::shared::config::DashboardConfig;
        use crate::system::initialization::initialize_store;
        use contracts::dashboards::d400_employee_summary::{BranchScope, EmployeeSummaryRequest};

        let db = Database::in_memory();
        initialize_store(&db).unwrap();
        db.branches().add("CURITIBA").unwrap();
        let added = db
            .employees()
            .add(EmployeeDto {
                number: "2001".into(),
                full_name: "ana lima".into(),
                branch: "curitiba".into(),
                login: "alima".into(),
                password: None,
                department: "comercial".into(),
                sector: " vendas".into(),
            })
            .unwrap()
            .value;
        assert_eq!(added.branch, "CURITIBA");

        let roster =
            get_branch_roster(&db, &BranchRosterRequest::for_branch("curitiba")).unwrap();
        assert_eq!(roster.branch_total, 1);

        let summary = get_employee_summary(
            &db,
            &EmployeeSummaryRequest {
                scope: BranchScope::from_option(Some("curitiba")),
            },
            &DashboardConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.total, 1);

        let all = get_employee_summary(
            &db,
            &EmployeeSummaryRequest {
                scope: BranchScope::All,
            },
            &DashboardConfig::default(),
        )
        .unwrap();
        let comercial = all.departments.iter().filter(|d| d.label == "COMERCIAL").count();
        assert_eq!(comercial, 1);

        assert!(run_reference_audit(&db).unwrap().is_clean());
    }

    #[test]
    fn test_empty_roster_cannot_be_exported() {
        let dir = tempfile::tempdir().unwrap();
        let roster = build_roster(staff(), &BranchRosterRequest::for_branch("RECIFE"));
        assert!(export_roster_csv(&roster, &dir.path().join("x.csv")).is_err());
    }
}
