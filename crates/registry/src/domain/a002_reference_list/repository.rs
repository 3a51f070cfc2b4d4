use contracts::domain::a002_reference_list::{normalize_reference_name, ReferenceKind};

use crate::shared::data::{BlobStore, Collection};
use crate::shared::error::StoreResult;

/// Справочник (филиалы, отделы, сектора): множество строк в верхнем регистре.
///
/// Удаление значения не проверяет сотрудников, которые на него ссылаются.
pub struct ReferenceListRepository<'a> {
    kind: ReferenceKind,
    collection: Collection<'a, String>,
}

impl<'a> ReferenceListRepository<'a> {
    pub fn new(kind: ReferenceKind, store: &'a dyn BlobStore, key: String) -> Self {
        Self {
            kind,
            collection: Collection::new(store, key),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Stored values in insertion order; empty when never initialized
    pub fn list(&self) -> StoreResult<Vec<String>> {
        self.collection.load_or_empty()
    }

    pub fn contains(&self, value: &str) -> StoreResult<bool> {
        Ok(self.list()?.iter().any(|v| v == value))
    }

    /// Adds the normalized name; `false` when it is empty or already present
    pub fn add(&self, name: &str) -> StoreResult<bool> {
        let value = normalize_reference_name(name);
        if value.is_empty() {
            return Ok(false);
        }

        let mut values = self.list()?;
        if values.contains(&value) {
            tracing::debug!("{} already contains {}", self.kind, value);
            return Ok(false);
        }

        values.push(value.clone());
        self.collection.save(&values)?;
        tracing::info!("{} += {}", self.kind, value);
        Ok(true)
    }

    /// Removes exact matches; a missing value is a silent no-op
    pub fn remove(&self, name: &str) -> StoreResult<()> {
        let Some(values) = self.collection.load()? else {
            return Ok(());
        };
        let before = values.len();
        let remaining: Vec<String> = values.into_iter().filter(|v| v != name).collect();
        self.collection.save(&remaining)?;

        if remaining.len() < before {
            tracing::info!("{} -= {}", self.kind, name);
        }
        Ok(())
    }

    /// Write the default values if the list was never initialized
    pub fn seed_defaults(&self) -> StoreResult<bool> {
        if self.collection.exists()? {
            return Ok(false);
        }
        let defaults: Vec<String> = self.kind.defaults().iter().map(|v| v.to_string()).collect();
        self.collection.save(&defaults)?;
        tracing::info!("Seeded {} default {}", defaults.len(), self.kind);
        Ok(true)
    }

    /// Replace the whole list (backup import)
    pub fn replace_all(&self, values: &[String]) -> StoreResult<()> {
        self.collection.save(values)
    }
}

#[cfg(test)]
mod tests {
    use crate::shared::data::{BlobStore, Database};
    use crate::shared::error::StoreError;
    use contracts::domain::a002_reference_list::ReferenceKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_empty_until_seeded() {
        let db = Database::in_memory();
        assert!(db.branches().list().unwrap().is_empty());

        assert!(db.branches().seed_defaults().unwrap());
        assert_eq!(db.branches().list().unwrap().len(), 6);
        assert!(!db.branches().seed_defaults().unwrap());
    }

    #[test]
    fn test_add_is_idempotent_under_normalization() {
        let db = Database::in_memory();
        let sectors = db.sectors();

        assert!(sectors.add("Vendas").unwrap());
        assert!(!sectors.add("VENDAS").unwrap());
        assert!(!sectors.add("  vendas ").unwrap());

        assert_eq!(sectors.list().unwrap(), vec!["VENDAS".to_string()]);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let db = Database::in_memory();
        assert!(!db.departments().add("   ").unwrap());
        assert!(db.departments().list().unwrap().is_empty());
    }

    #[test]
    fn test_remove_is_exact_match_and_silent_when_missing() {
        let db = Database::in_memory();
        let branches = db.branches();
        branches.seed_defaults().unwrap();

        branches.remove("curitiba").unwrap();
        assert!(branches.contains("CURITIBA").unwrap());

        branches.remove("CURITIBA").unwrap();
        assert!(!branches.contains("CURITIBA").unwrap());

        branches.remove("NOWHERE").unwrap();
        assert_eq!(branches.list().unwrap().len(), 5);
    }

    #[test]
    fn test_remove_on_uninitialized_list_does_not_create_it() {
        let db = Database::in_memory();
        db.sectors().remove("VENDAS").unwrap();
        assert!(db.store().get(&db.keys().reference_list(ReferenceKind::Sector)).unwrap().is_none());
    }

    #[test]
    fn test_lists_are_independent() {
        let db = Database::in_memory();
        db.departments().add("RH").unwrap();
        assert!(db.sectors().list().unwrap().is_empty());
        assert!(!db.branches().contains("RH").unwrap());
    }

    #[test]
    fn test_corrupt_list_is_reported() {
        let db = Database::in_memory();
        db.store()
            .set(&db.keys().reference_list(ReferenceKind::Branch), "[1, 2]")
            .unwrap();
        assert!(matches!(db.branches().add("X"), Err(StoreError::CorruptStore { .. })));
    }
}
