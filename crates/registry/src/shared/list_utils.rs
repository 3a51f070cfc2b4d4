//! Универсальные утилиты для работы со списками (поиск, сортировка, группировка)
use std::cmp::Ordering;
use std::collections::HashMap;

use contracts::dashboards::d400_employee_summary::CountEntry;
use contracts::shared::list::SortDirection;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу (уже в нижнем регистре)
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    type Field: Copy;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: Self::Field) -> Ordering;
}

/// Фильтрует список по поисковому запросу.
///
/// Пустой запрос (или только пробелы) возвращает список без изменений.
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items;
    }

    let filter_lower = filter.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter_lower))
        .collect()
}

/// Сортирует список по указанному полю (стабильная сортировка)
pub fn sort_list<T: Sortable>(items: &mut [T], field: T::Field, direction: SortDirection) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if direction.is_ascending() {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Case-insensitive comparison used for text columns
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Numeric comparison for business keys; non-numeric values count as 0
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    parse_number(a).cmp(&parse_number(b))
}

fn parse_number(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Считает элементы по значению поля, в порядке первого появления значения
pub fn group_and_count<T, F>(items: &[T], selector: F) -> Vec<CountEntry>
where
    F: Fn(&T) -> &str,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();

    for item in items {
        let label = selector(item);
        match positions.get(label) {
            Some(&pos) => entries[pos].count += 1,
            None => {
                positions.insert(label, entries.len());
                entries.push(CountEntry::new(label, 1));
            }
        }
    }

    entries
}

/// Ранжирует по убыванию количества и оставляет первые `n`.
///
/// При равенстве сохраняется исходный порядок.
pub fn top_n(mut entries: Vec<CountEntry>, n: usize) -> Vec<CountEntry> {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(n);
    entries
}
