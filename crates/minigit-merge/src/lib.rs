//! Merge engine: reconciles two branches against their common ancestor.
//!
//! Snapshots are compared as flat path maps, one path at a time. Where only
//! one side changed a path that side wins; where both changed it differently
//! the path is a conflict and the current branch's version is kept. A clean
//! merge is recorded as a two-parent commit. A conflicted one is left in the
//! working tree and staging area for the user to resolve.

mod engine;
pub mod three_way;

pub use engine::MergeEngine;
pub use three_way::{merge_file_maps, FileMapMerge};

use bstr::BString;
use minigit_hash::ObjectId;
use minigit_index::StagingArea;

/// How a merge ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both branches already point at the same commit. Nothing was written.
    AlreadyUpToDate,
    /// A merge commit was created and the current branch advanced to it.
    Merged {
        commit: ObjectId,
        tree: Option<ObjectId>,
    },
    /// Conflicting changes; no commit was made. The working tree and staging
    /// area hold the merged snapshot with the current branch's version of
    /// each conflicted path.
    Conflicted { conflicts: Vec<ConflictEntry> },
}

impl MergeOutcome {
    pub fn is_clean(&self) -> bool {
        !matches!(self, Self::Conflicted { .. })
    }
}

/// Result of [`MergeEngine::merge`]: the outcome and the staging area to
/// carry forward.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub outcome: MergeOutcome,
    pub staging: StagingArea,
}

/// A path both sides changed differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    pub path: BString,
    /// Common ancestor's version (`None` if absent there).
    pub base: Option<ObjectId>,
    /// Current branch's version.
    pub ours: Option<ObjectId>,
    /// Merged branch's version.
    pub theirs: Option<ObjectId>,
}

/// Error types for merge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("current branch '{0}' has no commits yet")]
    EmptyHistory(String),

    #[error("no common ancestor between {current} and {incoming}")]
    NoCommonAncestor {
        current: ObjectId,
        incoming: ObjectId,
    },

    #[error(transparent)]
    Odb(#[from] minigit_odb::OdbError),

    #[error(transparent)]
    Ref(#[from] minigit_ref::RefError),

    #[error(transparent)]
    Index(#[from] minigit_index::IndexError),

    #[error(transparent)]
    RevWalk(#[from] minigit_revwalk::RevWalkError),

    #[error(transparent)]
    Repo(#[from] minigit_repository::RepoError),
}
