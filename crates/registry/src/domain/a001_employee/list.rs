use std::cmp::Ordering;

use contracts::domain::a001_employee::{Employee, EmployeeField};

use crate::shared::export::CsvExportable;
use crate::shared::format::format_date;
use crate::shared::list_utils::{compare_numeric, compare_text, Searchable, Sortable};

impl Searchable for Employee {
    fn matches_filter(&self, filter: &str) -> bool {
        [
            &self.full_name,
            &self.number,
            &self.branch,
            &self.department,
            &self.sector,
            &self.login,
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(filter))
    }
}

impl Sortable for Employee {
    type Field = EmployeeField;

    fn compare_by_field(&self, other: &Self, field: EmployeeField) -> Ordering {
        match field {
            EmployeeField::Number => compare_numeric(&self.number, &other.number),
            EmployeeField::RegisteredAt => self.registered_at.cmp(&other.registered_at),
            EmployeeField::FullName => compare_text(&self.full_name, &other.full_name),
            EmployeeField::Branch => compare_text(&self.branch, &other.branch),
            EmployeeField::Login => compare_text(&self.login, &other.login),
            EmployeeField::Department => compare_text(&self.department, &other.department),
            EmployeeField::Sector => compare_text(&self.sector, &other.sector),
        }
    }
}

impl CsvExportable for Employee {
    fn headers() -> Vec<&'static str> {
        EmployeeField::ALL.iter().map(|f| f.label()).collect()
    }

    fn to_csv_row(&self) -> Vec<String> {
        EmployeeField::ALL
            .iter()
            .map(|field| match field {
                EmployeeField::RegisteredAt => format_date(&self.registered_at),
                other => self.field_value(*other),
            })
            .collect()
    }
}
