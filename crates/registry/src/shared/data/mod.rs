pub mod blob_store;
pub mod collection;
pub mod db;
pub mod keys;

pub use blob_store::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use collection::Collection;
pub use db::Database;
pub use keys::StorageKeys;
