use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use minigit_hash::ObjectId;

use crate::{ObjectStore, StoreError};

/// An in-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct objects held.
    pub fn len(&self) -> usize {
        self.objects.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total `put` calls so far, including overwrites.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put(&self, oid: &ObjectId, content: &[u8]) -> Result<(), StoreError> {
        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        objects.insert(*oid, content.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get(&self, oid: &ObjectId) -> Result<Vec<u8>, StoreError> {
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        objects.get(oid).cloned().ok_or(StoreError::NotFound(*oid))
    }

    fn contains(&self, oid: &ObjectId) -> bool {
        self.objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(oid)
    }
}
