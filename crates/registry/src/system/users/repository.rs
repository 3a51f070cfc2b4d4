use contracts::system::users::SystemUser;

use crate::shared::data::{BlobStore, Collection};
use crate::shared::error::StoreResult;

/// Raw access to the system user collection
pub struct SystemUserRepository<'a> {
    collection: Collection<'a, SystemUser>,
}

impl<'a> SystemUserRepository<'a> {
    pub fn new(store: &'a dyn BlobStore, key: String) -> Self {
        Self {
            collection: Collection::new(store, key),
        }
    }

    /// List all users
    pub fn list_all(&self) -> StoreResult<Vec<SystemUser>> {
        self.collection.load_or_empty()
    }

    /// Get user by login (exact match on the normalized login)
    pub fn get_by_login(&self, login: &str) -> StoreResult<Option<SystemUser>> {
        Ok(self.list_all()?.into_iter().find(|u| u.login == login))
    }

    /// Count total users
    pub fn count_users(&self) -> StoreResult<usize> {
        Ok(self.list_all()?.len())
    }

    pub fn save_all(&self, users: &[SystemUser]) -> StoreResult<()> {
        self.collection.save(users)
    }
}
