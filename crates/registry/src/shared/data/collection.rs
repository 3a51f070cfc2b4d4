use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::blob_store::BlobStore;
use crate::shared::error::{StoreError, StoreResult};

/// Typed view over one key of the blob store holding a JSON array.
///
/// Every write replaces the whole array; there is no locking, so two
/// interleaved read-modify-write cycles on the same key lose the earlier one.
pub struct Collection<'a, T> {
    store: &'a dyn BlobStore,
    key: String,
    _marker: PhantomData<T>,
}

impl<'a, T> Collection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a dyn BlobStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// `None` when the key was never written
    pub fn load(&self) -> StoreResult<Option<Vec<T>>> {
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let items = serde_json::from_str::<Vec<T>>(&text).map_err(|source| {
            tracing::error!("Corrupt data under {}: {}", self.key, source);
            StoreError::CorruptStore {
                key: self.key.clone(),
                source,
            }
        })?;
        tracing::debug!("Loaded {} items from {}", items.len(), self.key);
        Ok(Some(items))
    }

    pub fn load_or_empty(&self) -> StoreResult<Vec<T>> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn exists(&self) -> StoreResult<bool> {
        Ok(self.store.get(&self.key)?.is_some())
    }

    pub fn save(&self, items: &[T]) -> StoreResult<()> {
        let text = serde_json::to_string(items).map_err(|source| StoreError::CorruptStore {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryBlobStore;

    #[test]
    fn test_absent_key_loads_as_none() {
        let store = MemoryBlobStore::new();
        let collection: Collection<'_, String> = Collection::new(&store, "k");

        assert!(collection.load().unwrap().is_none());
        assert!(collection.load_or_empty().unwrap().is_empty());
        assert!(!collection.exists().unwrap());
    }

    #[test]
    fn test_malformed_text_is_corrupt_store() {
        let store = MemoryBlobStore::new();
        store.set("k", "{not json").unwrap();
        let collection: Collection<'_, String> = Collection::new(&store, "k");

        let err = collection.load().unwrap_err();
        assert!(matches!(err, StoreError::CorruptStore { ref key, .. } if key == "k"));
    }

    #[test]
    fn test_wrong_shape_is_corrupt_store() {
        let store = MemoryBlobStore::new();
        store.set("k", r#"{"a": 1}"#).unwrap();
        let collection: Collection<'_, String> = Collection::new(&store, "k");

        assert!(matches!(
            collection.load_or_empty(),
            Err(StoreError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_save_replaces_whole_array() {
        let store = MemoryBlobStore::new();
        let collection: Collection<'_, String> = Collection::new(&store, "k");

        collection.save(&["A".to_string(), "B".to_string()]).unwrap();
        collection.save(&["C".to_string()]).unwrap();

        assert_eq!(store.raw("k").as_deref(), Some(r#"["C"]"#));
    }
}
