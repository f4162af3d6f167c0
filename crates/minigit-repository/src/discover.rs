use std::path::{Path, PathBuf};

use crate::env::EnvOverrides;
use crate::{RepoError, GIT_DIR_NAME};

/// Where a repository lives.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub git_dir: PathBuf,
    pub work_tree: PathBuf,
}

/// Whether `dir` looks like a metadata directory.
fn is_git_dir(dir: &Path) -> bool {
    dir.join("HEAD").is_file() && dir.join("objects").is_dir()
}

/// Find the repository containing `start`.
///
/// With `MINIGIT_DIR` set that directory is used as-is and `start` is the
/// working tree. Otherwise walk up from `start` to the nearest directory
/// holding `.minigit/`.
pub(crate) fn discover(start: &Path, env: &EnvOverrides) -> Result<Layout, RepoError> {
    let start = std::fs::canonicalize(start).map_err(|_| RepoError::NotFound(start.to_path_buf()))?;

    if let Some(git_dir) = &env.git_dir {
        let git_dir = if git_dir.is_absolute() {
            git_dir.clone()
        } else {
            start.join(git_dir)
        };
        if !is_git_dir(&git_dir) {
            return Err(RepoError::InvalidGitDir {
                path: git_dir,
                reason: "MINIGIT_DIR does not point at a repository".into(),
            });
        }
        return Ok(Layout {
            git_dir,
            work_tree: start,
        });
    }

    let mut current = start.as_path();
    loop {
        let candidate = current.join(GIT_DIR_NAME);
        if is_git_dir(&candidate) {
            return Ok(Layout {
                git_dir: candidate,
                work_tree: current.to_path_buf(),
            });
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(RepoError::NotFound(start)),
        }
    }
}

/// Open the repository at `path`, either the working tree root or the
/// metadata directory itself.
pub(crate) fn open(path: &Path) -> Result<Layout, RepoError> {
    let path = std::fs::canonicalize(path).map_err(|_| RepoError::NotFound(path.to_path_buf()))?;

    if path.file_name().is_some_and(|n| n == GIT_DIR_NAME) && is_git_dir(&path) {
        let work_tree = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| RepoError::NotFound(path.clone()))?;
        return Ok(Layout {
            git_dir: path,
            work_tree,
        });
    }

    let git_dir = path.join(GIT_DIR_NAME);
    if is_git_dir(&git_dir) {
        Ok(Layout {
            git_dir,
            work_tree: path,
        })
    } else {
        Err(RepoError::NotFound(path))
    }
}
