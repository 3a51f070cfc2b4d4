use anyhow::{Context, Result};
use contracts::dashboards::d400_employee_summary::{
    BranchScope, EmployeeSummary, EmployeeSummaryRequest,
};
use contracts::domain::a001_employee::Employee;

use crate::shared::config::DashboardConfig;
use crate::shared::data::Database;
use crate::shared::list_utils::{group_and_count, top_n};

/// Get employee summary for the requested branch scope
pub fn get_employee_summary(
    db: &Database,
    request: &EmployeeSummaryRequest,
    limits: &DashboardConfig,
) -> Result<EmployeeSummary> {
    let employees = db
        .employees()
        .list_all()
        .context("Failed to load employees for the dashboard")?;

    let summary = build_summary(&employees, &request.scope, limits);
    tracing::debug!(
        "Summary for {}: {} employees, {} departments, {} sectors",
        summary.scope.label(),
        summary.total,
        summary.department_count,
        summary.sector_count
    );
    Ok(summary)
}

/// Counts and rankings over the employees in scope
pub fn build_summary(
    employees: &[Employee],
    scope: &BranchScope,
    limits: &DashboardConfig,
) -> EmployeeSummary {
    let in_scope: Vec<&Employee> = employees
        .iter()
        .filter(|e| scope.includes(&e.branch))
        .collect();

    let departments = group_and_count(&in_scope, |e| e.department.as_str());
    let sectors = group_and_count(&in_scope, |e| e.sector.as_str());

    EmployeeSummary {
        scope: scope.clone(),
        total: in_scope.len(),
        department_count: departments.len(),
        sector_count: sectors.len(),
        departments: top_n(departments, limits.top_departments),
        sectors: top_n(sectors, limits.top_sectors),
    }
}
