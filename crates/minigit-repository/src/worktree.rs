//! The working directory: the checked-out files next to `.minigit/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bstr::{BString, ByteSlice, ByteVec};
use minigit_object::FileMap;
use minigit_odb::ObjectDatabase;
use tracing::debug;
use walkdir::WalkDir;

use crate::RepoError;

/// Files a repository's snapshots are checked out to.
///
/// Paths are repository-relative and `/`-separated.
pub trait WorkingTree {
    /// Every regular file, excluding the metadata directory.
    fn list_files(&self) -> Result<Vec<BString>, RepoError>;

    fn read_file(&self, path: &BString) -> Result<Vec<u8>, RepoError>;

    /// Write `content` to `path`, creating parent directories.
    fn write_file(&self, path: &BString, content: &[u8]) -> Result<(), RepoError>;

    /// Delete every file whose path is not a key of `keep`, then remove
    /// directories left empty.
    fn remove_untracked(&self, keep: &FileMap) -> Result<(), RepoError>;
}

/// Make the working tree hold exactly `files`.
pub fn checkout_files(
    worktree: &dyn WorkingTree,
    odb: &ObjectDatabase,
    files: &FileMap,
) -> Result<(), RepoError> {
    worktree.remove_untracked(files)?;
    for (path, oid) in files {
        let content = odb.read_blob(oid)?;
        worktree.write_file(path, &content)?;
    }
    debug!(files = files.len(), "checked out files");
    Ok(())
}

/// A working tree on disk.
#[derive(Debug, Clone)]
pub struct FsWorkingTree {
    root: PathBuf,
    git_dir: PathBuf,
}

impl FsWorkingTree {
    /// `git_dir` is skipped when listing and cleaning.
    pub fn new(root: impl Into<PathBuf>, git_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            git_dir: git_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a repository-relative path.
    pub fn full_path(&self, path: &BString) -> Result<PathBuf, RepoError> {
        let rel = path
            .to_path()
            .map_err(|_| RepoError::InvalidPath(path.clone()))?;
        Ok(self.root.join(rel))
    }

    /// Repository-relative form of `path`, which must lie under the root.
    pub fn relative_path(&self, path: &Path) -> Result<BString, RepoError> {
        let rel = path
            .strip_prefix(&self.root)
            .map_err(|_| RepoError::OutsideRepository(path.to_path_buf()))?;
        let mut out = BString::default();
        for component in rel.components() {
            match component {
                Component::Normal(part) => {
                    if !out.is_empty() {
                        out.push(b'/');
                    }
                    out.extend_from_slice(&<Vec<u8>>::from_os_str_lossy(part));
                }
                Component::CurDir => {}
                _ => return Err(RepoError::OutsideRepository(path.to_path_buf())),
            }
        }
        Ok(out)
    }

    /// Regular files under `dir`, skipping the metadata directory.
    pub fn files_under(&self, dir: &Path) -> Result<Vec<BString>, RepoError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.path() != self.git_dir);
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(self.relative_path(entry.path())?);
            }
        }
        Ok(files)
    }
}

impl WorkingTree for FsWorkingTree {
    fn list_files(&self) -> Result<Vec<BString>, RepoError> {
        self.files_under(&self.root)
    }

    fn read_file(&self, path: &BString) -> Result<Vec<u8>, RepoError> {
        let full = self.full_path(path)?;
        fs::read(&full).map_err(RepoError::io(full))
    }

    fn write_file(&self, path: &BString, content: &[u8]) -> Result<(), RepoError> {
        let full = self.full_path(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(RepoError::io(parent))?;
        }
        fs::write(&full, content).map_err(RepoError::io(full))
    }

    fn remove_untracked(&self, keep: &FileMap) -> Result<(), RepoError> {
        for path in self.list_files()? {
            if !keep.contains_key(&path) {
                let full = self.full_path(&path)?;
                fs::remove_file(&full).map_err(RepoError::io(&full))?;
                debug!(path = %path, "removed file");
            }
        }

        // Children come before their parents, so nested empty
        // directories collapse in one pass.
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_entry(|e| e.path() != self.git_dir);
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let dir = entry.path();
            let is_empty = fs::read_dir(dir)
                .map_err(RepoError::io(dir))?
                .next()
                .is_none();
            if is_empty {
                fs::remove_dir(dir).map_err(RepoError::io(dir))?;
            }
        }
        Ok(())
    }
}

/// An in-memory working tree, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryWorkingTree {
    files: Mutex<BTreeMap<BString, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryWorkingTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current contents.
    pub fn files(&self) -> BTreeMap<BString, Vec<u8>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of mutating calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl WorkingTree for MemoryWorkingTree {
    fn list_files(&self) -> Result<Vec<BString>, RepoError> {
        Ok(self.files().into_keys().collect())
    }

    fn read_file(&self, path: &BString) -> Result<Vec<u8>, RepoError> {
        self.files()
            .remove(path)
            .ok_or_else(|| RepoError::PathNotFound(PathBuf::from(path.to_str_lossy().into_owned())))
    }

    fn write_file(&self, path: &BString, content: &[u8]) -> Result<(), RepoError> {
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.insert(path.clone(), content.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn remove_untracked(&self, keep: &FileMap) -> Result<(), RepoError> {
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.retain(|path, _| keep.contains_key(path));
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, FsWorkingTree) {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".minigit");
        fs::create_dir_all(git_dir.join("objects")).unwrap();
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        let wt = FsWorkingTree::new(dir.path(), git_dir);
        (dir, wt)
    }

    #[test]
    fn list_skips_metadata_dir() {
        let (_dir, wt) = setup();
        wt.write_file(&"b.txt".into(), b"b").unwrap();
        wt.write_file(&"src/a.rs".into(), b"a").unwrap();
        assert_eq!(wt.list_files().unwrap(), vec![BString::from("b.txt"), BString::from("src/a.rs")]);
    }

    #[test]
    fn remove_untracked_prunes_empty_dirs() {
        let (dir, wt) = setup();
        wt.write_file(&"keep.txt".into(), b"k").unwrap();
        wt.write_file(&"gone/deep/x.txt".into(), b"x").unwrap();
        wt.write_file(&"mixed/keep.txt".into(), b"k").unwrap();
        wt.write_file(&"mixed/drop.txt".into(), b"d").unwrap();

        let mut keep = FileMap::new();
        let oid = minigit_hash::ObjectId::from_bytes(&[1; 20]).unwrap();
        keep.insert("keep.txt".into(), oid);
        keep.insert("mixed/keep.txt".into(), oid);
        wt.remove_untracked(&keep).unwrap();

        assert!(!dir.path().join("gone").exists());
        assert!(!dir.path().join("mixed/drop.txt").exists());
        assert!(dir.path().join("mixed/keep.txt").exists());
        assert!(dir.path().join(".minigit/HEAD").exists());
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let (dir, wt) = setup();
        let rel = wt.relative_path(&dir.path().join("a").join("b.txt")).unwrap();
        assert_eq!(rel, "a/b.txt");
        assert!(wt.relative_path(Path::new("/elsewhere/x")).is_err());
    }
}
