//! Object database for minigit.
//!
//! Wraps a pluggable [`ObjectStore`] with the hashing and encoding rules for
//! each kind of object: blobs are stored as-is, flat file maps are encoded
//! into a hierarchy of tree objects, and commits are serialized to their
//! header/message text. Every write hashes the exact bytes it persists.

mod commit_codec;
mod tree_codec;

use std::path::Path;
use std::sync::Arc;

use minigit_hash::{Hasher, ObjectId};
use minigit_store::{LooseObjectStore, ObjectStore};
use tracing::debug;

pub use error::OdbError;

mod error {
    use bstr::BString;

    #[derive(Debug, thiserror::Error)]
    pub enum OdbError {
        #[error("cannot encode tree for '{path}': {reason}")]
        TreeEncode { path: BString, reason: String },

        #[error(transparent)]
        Store(#[from] minigit_store::StoreError),

        #[error(transparent)]
        Object(#[from] minigit_object::ObjectError),

        #[error(transparent)]
        Hash(#[from] minigit_hash::HashError),
    }
}

/// Shared entry point for reading and writing objects.
///
/// Cloning is cheap; clones share the underlying store.
#[derive(Clone)]
pub struct ObjectDatabase {
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for ObjectDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectDatabase").finish_non_exhaustive()
    }
}

impl ObjectDatabase {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Open a database backed by loose files under `objects_dir`.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(LooseObjectStore::open(objects_dir)))
    }

    /// Hash `content`, store it and return its id.
    pub fn write_raw(&self, content: &[u8]) -> Result<ObjectId, OdbError> {
        let oid = Hasher::digest(content)?;
        self.store.put(&oid, content)?;
        Ok(oid)
    }

    /// Read the raw bytes of any object.
    pub fn read_raw(&self, oid: &ObjectId) -> Result<Vec<u8>, OdbError> {
        Ok(self.store.get(oid)?)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.store.contains(oid)
    }

    /// Store file content as a blob.
    pub fn write_blob(&self, content: &[u8]) -> Result<ObjectId, OdbError> {
        let oid = self.write_raw(content)?;
        debug!(%oid, bytes = content.len(), "stored blob");
        Ok(oid)
    }

    pub fn read_blob(&self, oid: &ObjectId) -> Result<Vec<u8>, OdbError> {
        self.read_raw(oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minigit_store::{MemoryObjectStore, StoreError};

    #[test]
    fn blob_id_is_content_hash() {
        let odb = ObjectDatabase::new(Arc::new(MemoryObjectStore::new()));
        let oid = odb.write_blob(b"hello world").unwrap();
        assert_eq!(oid.to_hex(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(odb.read_blob(&oid).unwrap(), b"hello world");
    }

    #[test]
    fn missing_blob_surfaces_not_found() {
        let odb = ObjectDatabase::new(Arc::new(MemoryObjectStore::new()));
        let oid = ObjectId::from_bytes(&[3; 20]).unwrap();
        assert!(matches!(
            odb.read_blob(&oid),
            Err(OdbError::Store(StoreError::NotFound(id))) if id == oid
        ));
    }

    #[test]
    fn clones_share_the_store() {
        let odb = ObjectDatabase::new(Arc::new(MemoryObjectStore::new()));
        let other = odb.clone();
        let oid = odb.write_blob(b"shared").unwrap();
        assert!(other.contains(&oid));
    }
}
