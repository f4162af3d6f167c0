pub(crate) mod loose;

use std::path::{Path, PathBuf};

use minigit_hash::ObjectId;
use tracing::info;

use crate::error::RefError;
use crate::name::BranchName;
use crate::store::RefStore;

use self::loose::RefContent;

/// Refs stored as files in the repository metadata directory.
///
/// - `HEAD` holds `ref: refs/heads/<branch>`
/// - `refs/heads/<branch>` holds the tip commit's hex id and a newline
#[derive(Debug, Clone)]
pub struct FilesRefStore {
    git_dir: PathBuf,
}

impl FilesRefStore {
    /// Create a ref store rooted at the metadata directory (`.minigit`).
    pub fn new(git_dir: impl AsRef<Path>) -> Self {
        Self {
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn head_path(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }

    fn heads_dir(&self) -> PathBuf {
        self.git_dir.join("refs").join("heads")
    }

    fn branch_path(&self, branch: &BranchName) -> PathBuf {
        self.git_dir.join(branch.full_name())
    }
}

impl RefStore for FilesRefStore {
    fn branch_exists(&self, branch: &str) -> Result<bool, RefError> {
        Ok(self.branch_tip(branch)?.is_some())
    }

    fn branch_tip(&self, branch: &str) -> Result<Option<ObjectId>, RefError> {
        let Ok(name) = BranchName::new(branch) else {
            return Ok(None);
        };
        match loose::read_ref_file(&self.branch_path(&name))? {
            Some(RefContent::Direct(oid)) => Ok(Some(oid)),
            Some(RefContent::Symbolic(target)) => Err(RefError::Parse(format!(
                "branch '{branch}' is a symbolic ref to '{target}'"
            ))),
            None => Ok(None),
        }
    }

    fn current_branch(&self) -> Result<String, RefError> {
        match loose::read_ref_file(&self.head_path())? {
            Some(RefContent::Symbolic(target)) => target
                .strip_prefix("refs/heads/")
                .map(str::to_string)
                .ok_or_else(|| RefError::Parse(format!("HEAD points outside refs/heads: {target}"))),
            Some(RefContent::Direct(oid)) => {
                Err(RefError::Parse(format!("HEAD is detached at {oid}")))
            }
            None => Err(RefError::NotFound("HEAD".into())),
        }
    }

    fn advance(&self, branch: &str, commit: &ObjectId) -> Result<(), RefError> {
        let name = BranchName::new(branch)?;
        loose::write_direct(&self.branch_path(&name), commit)?;
        loose::write_symbolic(&self.head_path(), &name.full_name())?;
        info!(branch = %name, %commit, "advanced branch");
        Ok(())
    }

    fn set_branch(&self, branch: &str, commit: &ObjectId) -> Result<(), RefError> {
        let name = BranchName::new(branch)?;
        loose::write_direct(&self.branch_path(&name), commit)?;
        info!(branch = %name, %commit, "updated branch");
        Ok(())
    }

    fn set_head(&self, branch: &str) -> Result<(), RefError> {
        let name = BranchName::new(branch)?;
        loose::write_symbolic(&self.head_path(), &name.full_name())
    }

    fn list_branches(&self) -> Result<Vec<String>, RefError> {
        loose::list_heads(&self.heads_dir())
    }
}
