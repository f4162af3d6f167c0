//! Staging area (index) for minigit.
//!
//! The staging area records which blob each path will have in the next
//! commit. It is a plain value: commands load it, transform it and hand the
//! result back to an [`IndexStore`] to persist. On disk it is the text file
//! `.minigit/index`, one `<path> <hash>` line per entry.

mod read;
mod store;
mod write;

use std::path::Path;

use bstr::{BStr, BString};
use minigit_hash::ObjectId;
use minigit_object::FileMap;

pub use error::IndexError;
pub use store::{FileIndexStore, IndexStore, MemoryIndexStore};

mod error {
    use std::path::PathBuf;

    #[derive(Debug, thiserror::Error)]
    pub enum IndexError {
        #[error("i/o error on {path}: {source}")]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
    }
}

/// The staged snapshot: path to blob id, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingArea {
    entries: FileMap,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse index file content. Unusable lines are skipped.
    pub fn parse(data: &[u8]) -> Self {
        read::parse_index(data)
    }

    /// Serialize to index file content.
    pub fn serialize(&self) -> Vec<u8> {
        write::serialize_index(self)
    }

    /// Read an index file. A missing file is an empty staging area.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        read::read_index(path.as_ref())
    }

    /// Replace the index file at `path` with this staging area.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), IndexError> {
        write::write_index(self, path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &BStr) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    /// Stage `oid` at `path`, replacing any previous entry.
    pub fn add(&mut self, path: impl Into<BString>, oid: ObjectId) {
        self.entries.insert(path.into(), oid);
    }

    /// Unstage `path`. Returns the entry it had, if any.
    pub fn remove(&mut self, path: &BStr) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BString, &ObjectId)> {
        self.entries.iter()
    }

    /// The staged snapshot as a flat file map.
    pub fn files(&self) -> &FileMap {
        &self.entries
    }

    pub fn into_files(self) -> FileMap {
        self.entries
    }
}

impl From<FileMap> for StagingArea {
    fn from(entries: FileMap) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use bstr::ByteSlice;

    use super::*;

    fn oid(n: u8) -> ObjectId {
        ObjectId::from_bytes(&[n; 20]).unwrap()
    }

    #[test]
    fn add_replaces_existing_entry() {
        let mut staging = StagingArea::new();
        staging.add("a.txt", oid(1));
        staging.add("a.txt", oid(2));
        assert_eq!(staging.len(), 1);
        assert_eq!(staging.get(b"a.txt".as_bstr()), Some(&oid(2)));
    }

    #[test]
    fn remove_entry() {
        let mut staging = StagingArea::new();
        staging.add("a.txt", oid(1));
        assert_eq!(staging.remove(b"a.txt".as_bstr()), Some(oid(1)));
        assert!(staging.is_empty());
        assert_eq!(staging.remove(b"a.txt".as_bstr()), None);
    }

    #[test]
    fn from_file_map() {
        let mut files = FileMap::new();
        files.insert("x/y".into(), oid(4));
        let staging = StagingArea::from(files.clone());
        assert_eq!(staging.files(), &files);
        assert_eq!(staging.into_files(), files);
    }
}
