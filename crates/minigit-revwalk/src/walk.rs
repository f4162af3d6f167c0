//! First-parent history walk.

use minigit_hash::ObjectId;
use minigit_object::Commit;
use minigit_odb::ObjectDatabase;

use crate::{read_commit, RevWalkError};

/// Iterates from a commit back through first parents to the root.
///
/// Stops after the first error.
pub struct FirstParentWalk<'a> {
    odb: &'a ObjectDatabase,
    next: Option<ObjectId>,
}

impl<'a> FirstParentWalk<'a> {
    pub fn new(odb: &'a ObjectDatabase, start: Option<ObjectId>) -> Self {
        Self { odb, next: start }
    }
}

impl Iterator for FirstParentWalk<'_> {
    type Item = Result<(ObjectId, Commit), RevWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;
        match read_commit(self.odb, &oid) {
            Ok(commit) => {
                self.next = commit.parents.first().copied();
                Some(Ok((oid, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
