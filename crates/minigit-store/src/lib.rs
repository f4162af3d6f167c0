//! Content-addressed object storage.
//!
//! Objects are opaque byte strings keyed by their [`ObjectId`]. The store does
//! not hash; callers compute the id and hand both over. Nothing is ever
//! deleted.

mod loose;
mod memory;

pub use loose::LooseObjectStore;
pub use memory::MemoryObjectStore;

use std::path::PathBuf;

use minigit_hash::ObjectId;

/// A place to keep objects.
pub trait ObjectStore: Send + Sync {
    /// Store `content` under `oid`, replacing whatever was there.
    fn put(&self, oid: &ObjectId, content: &[u8]) -> Result<(), StoreError>;

    /// Fetch the content stored under `oid`.
    fn get(&self, oid: &ObjectId) -> Result<Vec<u8>, StoreError>;

    /// Whether an object exists under `oid`.
    fn contains(&self, oid: &ObjectId) -> bool;
}

/// Errors from object storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
