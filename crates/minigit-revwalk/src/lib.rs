//! Revision walking over the commit parent graph.
//!
//! Commits are loaded on demand from the object database by id; nothing is
//! cached between calls.

mod merge_base;
mod walk;

pub use merge_base::find_common_ancestor;
pub use walk::FirstParentWalk;

use minigit_hash::ObjectId;

/// Errors produced by revision walking operations.
#[derive(Debug, thiserror::Error)]
pub enum RevWalkError {
    #[error("commit not found: {0}")]
    CommitNotFound(ObjectId),

    #[error(transparent)]
    Odb(#[from] minigit_odb::OdbError),
}

/// Load a commit, mapping a missing object to [`RevWalkError::CommitNotFound`].
pub(crate) fn read_commit(
    odb: &minigit_odb::ObjectDatabase,
    oid: &ObjectId,
) -> Result<minigit_object::Commit, RevWalkError> {
    use minigit_odb::OdbError;
    use minigit_store::StoreError;

    match odb.decode_commit(oid) {
        Ok(commit) => Ok(commit),
        Err(OdbError::Store(StoreError::NotFound(_))) => Err(RevWalkError::CommitNotFound(*oid)),
        Err(e) => Err(e.into()),
    }
}
