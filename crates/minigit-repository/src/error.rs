use std::path::PathBuf;

use bstr::BString;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a minigit repository (or any of the parent directories): {0}")]
    NotFound(PathBuf),

    #[error("invalid repository directory: {path}: {reason}")]
    InvalidGitDir { path: PathBuf, reason: String },

    #[error("pathspec '{0}' did not match any files")]
    PathNotFound(PathBuf),

    #[error("path is outside the repository: {0}")]
    OutsideRepository(PathBuf),

    #[error("path cannot be represented on this platform: {0}")]
    InvalidPath(BString),

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("branch already exists: {0}")]
    BranchExists(String),

    #[error("current branch has no commits yet")]
    UnbornBranch,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Odb(#[from] minigit_odb::OdbError),

    #[error(transparent)]
    Ref(#[from] minigit_ref::RefError),

    #[error(transparent)]
    Index(#[from] minigit_index::IndexError),
}

impl RepoError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| RepoError::Io { path, source }
    }
}
