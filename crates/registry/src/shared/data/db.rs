use std::path::Path;

use contracts::domain::a002_reference_list::ReferenceKind;

use super::blob_store::{BlobStore, FileBlobStore, MemoryBlobStore};
use super::keys::StorageKeys;
use crate::domain::a001_employee::service::EmployeeService;
use crate::domain::a002_reference_list::repository::ReferenceListRepository;
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::error::StoreResult;
use crate::shared::ids::{IdGenerator, UuidGenerator};
use crate::system::users::service::SystemUserService;

/// Точка доступа ко всем коллекциям реестра.
///
/// Хранилище, пространство имён ключей, часы и генератор ID передаются
/// при создании, глобального состояния нет.
pub struct Database {
    store: Box<dyn BlobStore>,
    keys: StorageKeys,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Database {
    pub fn new(store: Box<dyn BlobStore>, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        }
    }

    /// Ephemeral database with the default namespace
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBlobStore::new()), StorageKeys::default())
    }

    /// Database backed by `<dir>/<key>.json` files
    pub fn open_dir(dir: &Path, namespace: &str) -> StoreResult<Self> {
        let store = FileBlobStore::open(dir)?;
        tracing::info!(
            "Registry store: {} (namespace {})",
            store.dir().display(),
            namespace
        );
        Ok(Self::new(Box::new(store), StorageKeys::new(namespace)))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn store(&self) -> &dyn BlobStore {
        self.store.as_ref()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn employees(&self) -> EmployeeService<'_> {
        EmployeeService::new(
            self.store(),
            self.keys.employees(),
            self.clock.as_ref(),
            self.ids.as_ref(),
        )
    }

    pub fn reference_list(&self, kind: ReferenceKind) -> ReferenceListRepository<'_> {
        ReferenceListRepository::new(kind, self.store(), self.keys.reference_list(kind))
    }

    pub fn branches(&self) -> ReferenceListRepository<'_> {
        self.reference_list(ReferenceKind::Branch)
    }

    pub fn departments(&self) -> ReferenceListRepository<'_> {
        self.reference_list(ReferenceKind::Department)
    }

    pub fn sectors(&self) -> ReferenceListRepository<'_> {
        self.reference_list(ReferenceKind::Sector)
    }

    pub fn system_users(&self) -> SystemUserService<'_> {
        SystemUserService::new(
            self.store(),
            self.keys.system_users(),
            self.clock.as_ref(),
            self.ids.as_ref(),
        )
    }
}
