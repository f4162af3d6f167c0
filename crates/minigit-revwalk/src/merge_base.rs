//! Common-ancestor search.
//!
//! Two breadth-first searches run in lockstep, one from each tip. Each keeps
//! its own queue and its own set of reached commits. A commit dequeued by one
//! side that the other side has already reached is a common ancestor.
//!
//! The answer is *a* common ancestor, not necessarily the lowest one: with
//! uneven branch lengths the first meeting point can sit below a closer
//! shared commit.

use std::collections::{HashSet, VecDeque};

use minigit_hash::ObjectId;
use minigit_odb::ObjectDatabase;
use tracing::{debug, trace};

use crate::{read_commit, RevWalkError};

/// One side of the search.
struct Frontier {
    queue: VecDeque<ObjectId>,
    reached: HashSet<ObjectId>,
}

impl Frontier {
    fn new(tip: ObjectId) -> Self {
        Self {
            queue: VecDeque::from([tip]),
            reached: HashSet::from([tip]),
        }
    }

    fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }

    /// Dequeue one commit. If `other` has reached it, it is the answer;
    /// otherwise its unseen parents join this side's queue.
    fn step(
        &mut self,
        odb: &ObjectDatabase,
        other: &Frontier,
    ) -> Result<Option<ObjectId>, RevWalkError> {
        let Some(oid) = self.queue.pop_front() else {
            return Ok(None);
        };
        if other.reached.contains(&oid) {
            return Ok(Some(oid));
        }
        let commit = read_commit(odb, &oid)?;
        for parent in commit.parents {
            if self.reached.insert(parent) {
                self.queue.push_back(parent);
            }
        }
        trace!(%oid, queued = self.queue.len(), "expanded commit");
        Ok(None)
    }
}

/// Find a commit reachable from both `a` and `b`.
///
/// Returns `None` when the histories share nothing.
pub fn find_common_ancestor(
    odb: &ObjectDatabase,
    a: &ObjectId,
    b: &ObjectId,
) -> Result<Option<ObjectId>, RevWalkError> {
    let mut side_a = Frontier::new(*a);
    let mut side_b = Frontier::new(*b);

    while !(side_a.is_drained() && side_b.is_drained()) {
        if let Some(found) = side_a.step(odb, &side_b)? {
            debug!(%a, %b, ancestor = %found, "found common ancestor");
            return Ok(Some(found));
        }
        if let Some(found) = side_b.step(odb, &side_a)? {
            debug!(%a, %b, ancestor = %found, "found common ancestor");
            return Ok(Some(found));
        }
    }

    debug!(%a, %b, "no common ancestor");
    Ok(None)
}
