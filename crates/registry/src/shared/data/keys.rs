use contracts::domain::a001_employee::Employee;
use contracts::domain::a002_reference_list::ReferenceKind;
use contracts::domain::common::AggregateRoot;
use contracts::system::users::SystemUser;

pub const DEFAULT_NAMESPACE: &str = "k_system";

/// Ключи коллекций в blob store, построенные от пространства имён.
///
/// С пространством имён по умолчанию ключи совпадают с теми, под которыми
/// данные уже лежат в существующих хранилищах.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self, collection: &str) -> String {
        format!("{}_{}", self.namespace, collection)
    }

    pub fn employees(&self) -> String {
        self.key(Employee::collection_name())
    }

    pub fn reference_list(&self, kind: ReferenceKind) -> String {
        self.key(kind.collection_name())
    }

    pub fn system_users(&self) -> String {
        self.key(SystemUser::collection_name())
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
