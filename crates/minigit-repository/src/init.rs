use std::fs;
use std::path::Path;

use tracing::info;

use crate::{RepoError, GIT_DIR_NAME};

/// Create the metadata directory layout under `work_tree`:
/// - HEAD (pointing to `refs/heads/main`)
/// - config (empty)
/// - objects/
/// - refs/heads/
///
/// Running it on an existing repository changes nothing.
pub(crate) fn init_repository(work_tree: &Path) -> Result<(), RepoError> {
    let git_dir = work_tree.join(GIT_DIR_NAME);
    if git_dir.join("HEAD").is_file() {
        return Ok(());
    }

    for dir in [git_dir.join("objects"), git_dir.join("refs").join("heads")] {
        fs::create_dir_all(&dir).map_err(RepoError::io(&dir))?;
    }

    let head = git_dir.join("HEAD");
    fs::write(&head, "ref: refs/heads/main\n").map_err(RepoError::io(&head))?;

    let config = git_dir.join("config");
    fs::write(&config, "").map_err(RepoError::io(&config))?;

    info!(path = %git_dir.display(), "initialized repository");
    Ok(())
}
