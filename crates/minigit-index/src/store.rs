use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::debug;

use crate::{IndexError, StagingArea};

/// Where the staging area lives between commands.
pub trait IndexStore {
    fn load(&self) -> Result<StagingArea, IndexError>;
    fn save(&self, staging: &StagingArea) -> Result<(), IndexError>;
}

/// The `.minigit/index` file.
#[derive(Debug, Clone)]
pub struct FileIndexStore {
    path: PathBuf,
}

impl FileIndexStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStore for FileIndexStore {
    fn load(&self) -> Result<StagingArea, IndexError> {
        StagingArea::read_from(&self.path)
    }

    fn save(&self, staging: &StagingArea) -> Result<(), IndexError> {
        staging.write_to(&self.path)?;
        debug!(path = %self.path.display(), entries = staging.len(), "saved index");
        Ok(())
    }
}

/// An in-process index, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    staging: Mutex<StagingArea>,
    saves: AtomicUsize,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl IndexStore for MemoryIndexStore {
    fn load(&self) -> Result<StagingArea, IndexError> {
        Ok(self.staging.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, staging: &StagingArea) -> Result<(), IndexError> {
        *self.staging.lock().unwrap_or_else(|e| e.into_inner()) = staging.clone();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
