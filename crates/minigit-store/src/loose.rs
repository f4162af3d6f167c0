use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minigit_hash::ObjectId;
use tracing::debug;

use crate::{ObjectStore, StoreError};

/// Objects as plain files under `objects/XX/YYYY...`.
///
/// `XX` is the first two hex characters of the id and `YYYY...` the
/// remaining 38. Content is stored uncompressed, exactly as given.
#[derive(Debug, Clone)]
pub struct LooseObjectStore {
    objects_dir: PathBuf,
}

impl LooseObjectStore {
    /// Open the store rooted at `objects_dir`. The directory need not exist yet.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Get the file path for a given id.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        let (dir, file) = oid.shard();
        self.objects_dir.join(dir).join(file)
    }
}

impl ObjectStore for LooseObjectStore {
    fn put(&self, oid: &ObjectId, content: &[u8]) -> Result<(), StoreError> {
        let path = self.object_path(oid);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, content).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(%oid, bytes = content.len(), "wrote object");
        Ok(())
    }

    fn get(&self, oid: &ObjectId) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(oid);
        match fs::read(&path) {
            Ok(data) => {
                debug!(%oid, bytes = data.len(), "read object");
                Ok(data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(*oid)),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }
}
