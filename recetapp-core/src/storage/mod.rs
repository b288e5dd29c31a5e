//! Key-value persistence for the local stores.
//!
//! Each persisted aggregate (favorites, fridges, theme) lives under its own
//! key as a whole-document snapshot:
//! - `@favorites`: JSON array of meal previews
//! - `@my_fridges`: JSON array of fridges with their ingredients
//! - `@recetapp:theme`: the bare theme literal (`light`, `dark` or `auto`)
//!
//! Reads treat any failure as "absent"; writes go through a per-key
//! [`SnapshotWriter`] so they reach storage in mutation order.

mod error;
mod file;
mod key;
mod memory;
mod snapshot;
mod writer;

use async_trait::async_trait;

pub use error::StorageError;
pub use file::FileStore;
pub use key::StoreKey;
pub use memory::MemoryStore;
pub use snapshot::{load_raw, load_snapshot};
pub use writer::SnapshotWriter;

/// Durable string-keyed storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
