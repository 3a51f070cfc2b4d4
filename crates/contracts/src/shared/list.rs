use serde::{Deserialize, Serialize};

use crate::domain::a001_employee::EmployeeField;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Индикатор для заголовка таблицы
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Текущая сортировка таблицы сотрудников
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: EmployeeField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: EmployeeField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Клик по заголовку: та же колонка меняет направление, новая сбрасывает на возрастание
    pub fn toggle(self, field: EmployeeField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(EmployeeField::FullName, SortDirection::Ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let state = SortState::default().toggle(EmployeeField::FullName);
        assert_eq!(state.direction, SortDirection::Descending);

        let state = state.toggle(EmployeeField::FullName);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_new_field_resets_to_ascending() {
        let state = SortState::new(EmployeeField::Login, SortDirection::Descending)
            .toggle(EmployeeField::Number);
        assert_eq!(state, SortState::new(EmployeeField::Number, SortDirection::Ascending));
    }
}
