//! minigit object model: tree records and commit text.
//!
//! Objects are stored as plain text with no type header. A tree is a list of
//! `<mode> <kind> <hash> <name>` lines; a commit is a block of `key value`
//! header lines, a blank line, then the message. Blobs are raw bytes and need
//! no model of their own.

mod commit;
mod tree;

pub use commit::Commit;
pub use tree::{EntryKind, FileMode, Tree, TreeEntry};

use std::collections::BTreeMap;

use bstr::BString;
use minigit_hash::{HashError, ObjectId};

/// A snapshot as a flat mapping of `/`-separated paths to blob hashes.
///
/// This is the working representation for staging, committing and merging;
/// trees exist only as its persisted, hierarchical encoding.
pub type FileMap = BTreeMap<BString, ObjectId>;

/// Errors produced by object operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("invalid commit header '{header}': {reason}")]
    InvalidCommitHeader { header: &'static str, reason: String },

    #[error(transparent)]
    Hash(#[from] HashError),
}
