//! Текстовое представление таблиц и дашборда для консоли
use std::fmt::Write;

use contracts::dashboards::d400_employee_summary::{CountEntry, EmployeeSummary};
use contracts::dashboards::d402_reference_audit::ReferenceAuditReport;
use contracts::domain::a001_employee::{Employee, EmployeeField};
use contracts::domain::a002_reference_list::ReferenceKind;
use contracts::shared::list::SortState;
use contracts::system::users::SystemUser;

use crate::shared::format::{format_date, format_number, truncate};

const BAR_WIDTH: usize = 30;

fn column_width(field: EmployeeField) -> usize {
    match field {
        EmployeeField::Number => 8,
        EmployeeField::FullName => 28,
        EmployeeField::Branch => 14,
        EmployeeField::Login => 12,
        EmployeeField::Department => 22,
        EmployeeField::Sector => 16,
        EmployeeField::RegisteredAt => 10,
    }
}

fn pad(value: &str, width: usize) -> String {
    let value = truncate(value, width);
    let fill = width.saturating_sub(value.chars().count());
    format!("{}{}", value, " ".repeat(fill))
}

/// Таблица сотрудников; колонка сортировки помечена ▲/▼
pub fn employees_table(rows: &[Employee], sort: &SortState) -> String {
    let mut out = String::new();

    let header: Vec<String> = EmployeeField::ALL
        .iter()
        .map(|field| {
            let title = if *field == sort.field {
                format!("{} {}", field.label(), sort.direction.indicator())
            } else {
                field.label().to_string()
            };
            pad(&title, column_width(*field))
        })
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());

    for employee in rows {
        let cells: Vec<String> = EmployeeField::ALL
            .iter()
            .map(|field| {
                let value = match field {
                    EmployeeField::RegisteredAt => format_date(&employee.registered_at),
                    other => employee.field_value(*other),
                };
                pad(&value, column_width(*field))
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }

    let _ = write!(out, "Total: {}", format_number(rows.len()));
    out
}

/// Employee ids for commands that take one (update / delete)
pub fn employee_ids(rows: &[Employee]) -> String {
    rows.iter()
        .map(|e| format!("{}  {}  {}", e.id, e.number, e.full_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bars(out: &mut String, title: &str, entries: &[CountEntry]) {
    let _ = writeln!(out, "{}", title);
    if entries.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }

    let max = entries.iter().map(|e| e.count).max().unwrap_or(1).max(1);
    let label_width = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(28);

    for entry in entries {
        let len = (entry.count * BAR_WIDTH).div_ceil(max);
        let _ = writeln!(
            out,
            "  {}  {} {}",
            pad(&entry.label, label_width),
            "█".repeat(len),
            format_number(entry.count)
        );
    }
}

/// Dashboard: totals plus department and sector rankings
pub fn summary(summary: &EmployeeSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Branch: {}", summary.scope.label());
    let _ = writeln!(out, "Employees:   {}", format_number(summary.total));
    let _ = writeln!(out, "Departments: {}", format_number(summary.department_count));
    let _ = writeln!(out, "Sectors:     {}", format_number(summary.sector_count));
    let _ = writeln!(out);
    bars(&mut out, "By department", &summary.departments);
    let _ = writeln!(out);
    bars(&mut out, "By sector", &summary.sectors);
    out.trim_end().to_string()
}

pub fn reference_list(kind: ReferenceKind, values: &[String]) -> String {
    let mut out = format!("{} ({})", kind.list_name(), values.len());
    for value in values {
        let _ = write!(out, "\n  {}", value);
    }
    out
}

pub fn users_table(users: &[SystemUser]) -> String {
    let mut out = format!("{}  {}  {}  {}", pad("Id", 36), pad("Login", 12), pad("Role", 6), "Name");
    for user in users {
        let _ = write!(
            out,
            "\n{}  {}  {}  {}",
            pad(&user.id, 36),
            pad(&user.login, 12),
            pad(user.role.as_str(), 6),
            user.display_name
        );
    }
    out
}

pub fn audit(report: &ReferenceAuditReport) -> String {
    if report.is_clean() {
        return format!(
            "{} employees checked, every reference is valid",
            format_number(report.employees_checked)
        );
    }

    let mut out = format!(
        "{} employees checked, {} orphaned references",
        format_number(report.employees_checked),
        format_number(report.orphans.len())
    );
    for kind in ReferenceKind::ALL {
        for orphan in report.of_kind(kind) {
            let _ = write!(
                out,
                "\n  {}  {}  {} {} is not registered",
                pad(&orphan.number, 8),
                pad(&orphan.full_name, 28),
                kind.element_name(),
                orphan.value
            );
        }
    }
    out
}
