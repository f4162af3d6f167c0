use minigit_hash::ObjectId;

use crate::error::RefError;

/// Branches and HEAD.
///
/// Branch arguments are short names (`main`, not `refs/heads/main`).
pub trait RefStore {
    /// Whether `branch` exists.
    fn branch_exists(&self, branch: &str) -> Result<bool, RefError>;

    /// The commit `branch` points at, or `None` if there is no such branch.
    fn branch_tip(&self, branch: &str) -> Result<Option<ObjectId>, RefError>;

    /// The branch HEAD names. It need not exist yet (an unborn branch).
    fn current_branch(&self) -> Result<String, RefError>;

    /// The commit at the tip of the current branch, if it has one.
    fn head_commit(&self) -> Result<Option<ObjectId>, RefError> {
        let branch = self.current_branch()?;
        self.branch_tip(&branch)
    }

    /// Point `branch` at `commit` and make it the current branch.
    fn advance(&self, branch: &str, commit: &ObjectId) -> Result<(), RefError>;

    /// Point `branch` at `commit`, leaving HEAD alone.
    fn set_branch(&self, branch: &str, commit: &ObjectId) -> Result<(), RefError>;

    /// Make `branch` the current branch without touching any tip.
    fn set_head(&self, branch: &str) -> Result<(), RefError>;

    /// All branch names, sorted.
    fn list_branches(&self) -> Result<Vec<String>, RefError>;
}
