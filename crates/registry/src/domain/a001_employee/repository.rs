use contracts::domain::a001_employee::Employee;

use crate::shared::data::{BlobStore, Collection};
use crate::shared::error::StoreResult;

/// Raw access to the employee collection
pub struct EmployeeRepository<'a> {
    collection: Collection<'a, Employee>,
}

impl<'a> EmployeeRepository<'a> {
    pub fn new(store: &'a dyn BlobStore, key: String) -> Self {
        Self {
            collection: Collection::new(store, key),
        }
    }

    pub fn key(&self) -> &str {
        self.collection.key()
    }

    /// All employees in stored order; empty when never initialized
    pub fn list_all(&self) -> StoreResult<Vec<Employee>> {
        self.collection.load_or_empty()
    }

    pub fn is_initialized(&self) -> StoreResult<bool> {
        self.collection.exists()
    }

    pub fn save_all(&self, employees: &[Employee]) -> StoreResult<()> {
        self.collection.save(employees)
    }
}
