use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use minigit_hash::ObjectId;

use crate::error::RefError;
use crate::name::BranchName;
use crate::store::RefStore;

/// In-memory refs, for tests and embedding.
#[derive(Debug)]
pub struct MemoryRefStore {
    state: Mutex<State>,
    writes: AtomicUsize,
}

#[derive(Debug)]
struct State {
    head: String,
    branches: BTreeMap<String, ObjectId>,
}

impl MemoryRefStore {
    /// A store whose HEAD names `head` and which has no branches.
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(State {
                head: head.into(),
                branches: BTreeMap::new(),
            }),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of ref updates so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }
}

impl Default for MemoryRefStore {
    fn default() -> Self {
        Self::new("main")
    }
}

impl RefStore for MemoryRefStore {
    fn branch_exists(&self, branch: &str) -> Result<bool, RefError> {
        Ok(self.with_state(|s| s.branches.contains_key(branch)))
    }

    fn branch_tip(&self, branch: &str) -> Result<Option<ObjectId>, RefError> {
        Ok(self.with_state(|s| s.branches.get(branch).copied()))
    }

    fn current_branch(&self) -> Result<String, RefError> {
        Ok(self.with_state(|s| s.head.clone()))
    }

    fn advance(&self, branch: &str, commit: &ObjectId) -> Result<(), RefError> {
        let name = BranchName::new(branch)?;
        self.with_state(|s| {
            s.branches.insert(name.to_string(), *commit);
            s.head = name.to_string();
        });
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn set_branch(&self, branch: &str, commit: &ObjectId) -> Result<(), RefError> {
        let name = BranchName::new(branch)?;
        self.with_state(|s| s.branches.insert(name.to_string(), *commit));
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn set_head(&self, branch: &str) -> Result<(), RefError> {
        let name = BranchName::new(branch)?;
        self.with_state(|s| s.head = name.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn list_branches(&self) -> Result<Vec<String>, RefError> {
        Ok(self.with_state(|s| s.branches.keys().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_branch_and_head() {
        let refs = MemoryRefStore::new("main");
        let oid = ObjectId::from_bytes(&[1; 20]).unwrap();
        assert_eq!(refs.head_commit().unwrap(), None);

        refs.advance("topic", &oid).unwrap();
        assert_eq!(refs.current_branch().unwrap(), "topic");
        assert_eq!(refs.head_commit().unwrap(), Some(oid));
        assert_eq!(refs.write_count(), 1);
    }
}
