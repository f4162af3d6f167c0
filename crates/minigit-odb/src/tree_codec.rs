use std::collections::{BTreeMap, BTreeSet, HashMap};

use bstr::{BStr, BString, ByteSlice};
use minigit_hash::ObjectId;
use minigit_object::{EntryKind, FileMap, Tree, TreeEntry};
use tracing::{debug, trace};

use crate::{ObjectDatabase, OdbError};

/// Direct contents of one directory while encoding.
#[derive(Default)]
struct DirListing {
    files: BTreeMap<BString, ObjectId>,
    subdirs: BTreeSet<BString>,
}

/// Split `a/b/c` into (`a/b`, `c`). Top-level names have an empty parent.
fn split_parent(path: &BStr) -> (&BStr, &BStr) {
    match path.rfind_byte(b'/') {
        Some(pos) => (path[..pos].as_bstr(), path[pos + 1..].as_bstr()),
        None => (b"".as_bstr(), path),
    }
}

fn join_path(base: &BStr, name: &BStr) -> BString {
    if base.is_empty() {
        return name.to_owned();
    }
    let mut full = base.to_owned();
    full.push(b'/');
    full.extend_from_slice(name);
    full
}

impl ObjectDatabase {
    /// Encode a flat path map into tree objects and return the root tree.
    ///
    /// Directories are written deepest first so each parent can reference
    /// its finished children. An empty map writes nothing and yields `None`.
    pub fn encode_tree(&self, files: &FileMap) -> Result<Option<ObjectId>, OdbError> {
        if files.is_empty() {
            return Ok(None);
        }

        // The root directory is keyed by the empty path.
        let mut dirs: HashMap<BString, DirListing> = HashMap::new();
        for (path, oid) in files {
            let (parent, name) = split_parent(path.as_bstr());
            dirs.entry(parent.to_owned())
                .or_default()
                .files
                .insert(name.to_owned(), *oid);

            let mut dir = parent;
            while !dir.is_empty() {
                let (grandparent, dir_name) = split_parent(dir);
                dirs.entry(grandparent.to_owned())
                    .or_default()
                    .subdirs
                    .insert(dir_name.to_owned());
                dir = grandparent;
            }
        }

        let mut order: Vec<BString> = dirs.keys().cloned().collect();
        order.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut written: HashMap<BString, ObjectId> = HashMap::with_capacity(order.len());
        for dir in order {
            let listing = &dirs[&dir];
            let mut tree = Tree::new();
            for (name, oid) in &listing.files {
                tree.entries.push(TreeEntry::blob(name.clone(), *oid));
            }
            for name in &listing.subdirs {
                let child = join_path(dir.as_bstr(), name.as_bstr());
                let oid = written.get(&child).ok_or_else(|| OdbError::TreeEncode {
                    path: child.clone(),
                    reason: "subdirectory was not written before its parent".into(),
                })?;
                tree.entries.push(TreeEntry::tree(name.clone(), *oid));
            }

            let oid = self.write_raw(&tree.serialize_content())?;
            trace!(dir = %dir, %oid, entries = tree.len(), "wrote tree");
            written.insert(dir, oid);
        }

        let root = written.get(b"".as_bstr()).copied();
        debug!(root = ?root, trees = written.len(), files = files.len(), "encoded tree");
        Ok(root)
    }

    /// Decode the tree at `oid` into a flat path map.
    pub fn decode_tree(&self, oid: &ObjectId) -> Result<FileMap, OdbError> {
        let mut files = FileMap::new();
        self.decode_tree_into(oid, b"".as_bstr(), &mut files)?;
        debug!(%oid, files = files.len(), "decoded tree");
        Ok(files)
    }

    /// Decode the tree at `oid`, prefixing every path with `base`.
    pub fn decode_tree_at(&self, oid: &ObjectId, base: &BStr) -> Result<FileMap, OdbError> {
        let mut files = FileMap::new();
        self.decode_tree_into(oid, base, &mut files)?;
        Ok(files)
    }

    /// Decode an optional root tree; `None` is the empty snapshot.
    pub fn decode_snapshot(&self, root: Option<&ObjectId>) -> Result<FileMap, OdbError> {
        match root {
            Some(oid) => self.decode_tree(oid),
            None => Ok(FileMap::new()),
        }
    }

    fn decode_tree_into(
        &self,
        oid: &ObjectId,
        base: &BStr,
        files: &mut FileMap,
    ) -> Result<(), OdbError> {
        let tree = Tree::parse(&self.read_raw(oid)?);
        for entry in tree.entries {
            let path = join_path(base, entry.name.as_bstr());
            match entry.kind {
                EntryKind::Blob => {
                    files.insert(path, entry.oid);
                }
                EntryKind::Tree => self.decode_tree_into(&entry.oid, path.as_bstr(), files)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use minigit_store::{MemoryObjectStore, ObjectStore};

    use super::*;

    fn oid(n: u8) -> ObjectId {
        ObjectId::from_bytes(&[n; 20]).unwrap()
    }

    fn map(entries: &[(&str, u8)]) -> FileMap {
        entries
            .iter()
            .map(|(p, n)| (BString::from(*p), oid(*n)))
            .collect()
    }

    fn memory_odb() -> (Arc<MemoryObjectStore>, ObjectDatabase) {
        let store = Arc::new(MemoryObjectStore::new());
        let odb = ObjectDatabase::new(store.clone());
        (store, odb)
    }

    #[test]
    fn split_parent_cases() {
        assert_eq!(split_parent(b"a".as_bstr()), (b"".as_bstr(), b"a".as_bstr()));
        assert_eq!(split_parent(b"a/b/c".as_bstr()), (b"a/b".as_bstr(), b"c".as_bstr()));
    }

    #[test]
    fn empty_map_writes_nothing() {
        let (store, odb) = memory_odb();
        assert_eq!(odb.encode_tree(&FileMap::new()).unwrap(), None);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn root_lists_blobs_then_trees() {
        let (store, odb) = memory_odb();
        let root = odb
            .encode_tree(&map(&[("z.txt", 1), ("lib/a.rs", 2), ("a.txt", 3)]))
            .unwrap()
            .unwrap();
        let text = String::from_utf8(store.get(&root).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("100644 blob ") && lines[0].ends_with(" a.txt"));
        assert!(lines[1].ends_with(" z.txt"));
        assert!(lines[2].starts_with("40000 tree ") && lines[2].ends_with(" lib"));
    }

    #[test]
    fn directory_with_only_subdirectories_gets_a_tree() {
        let (_, odb) = memory_odb();
        let files = map(&[("a/b/c.txt", 1)]);
        let root = odb.encode_tree(&files).unwrap().unwrap();
        assert_eq!(odb.decode_tree(&root).unwrap(), files);
    }

    #[test]
    fn one_character_directory_at_root() {
        let (_, odb) = memory_odb();
        let files = map(&[("a/x", 1), ("b", 2), ("c/d/e", 3)]);
        let root = odb.encode_tree(&files).unwrap().unwrap();
        assert_eq!(odb.decode_tree(&root).unwrap(), files);
    }

    #[test]
    fn same_content_same_root() {
        let (_, odb) = memory_odb();
        let files = map(&[("src/main.rs", 1), ("README", 2)]);
        assert_eq!(odb.encode_tree(&files).unwrap(), odb.encode_tree(&files).unwrap());
    }

    #[test]
    fn identical_subtrees_share_an_object() {
        let (store, odb) = memory_odb();
        odb.encode_tree(&map(&[("x/f", 1), ("y/f", 1)])).unwrap();
        // x, y and the root; x and y hash to the same object.
        assert_eq!(store.write_count(), 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn decode_at_prefixes_paths() {
        let (_, odb) = memory_odb();
        let root = odb.encode_tree(&map(&[("f", 1)])).unwrap().unwrap();
        let files = odb.decode_tree_at(&root, b"sub/dir".as_bstr()).unwrap();
        assert_eq!(files, map(&[("sub/dir/f", 1)]));
    }

    #[test]
    fn decode_skips_malformed_lines() {
        let (_, odb) = memory_odb();
        let content = format!("bogus line\n100644 blob {} ok\n100644 blob 1234 short\n", oid(5));
        let root = odb.write_raw(content.as_bytes()).unwrap();
        assert_eq!(odb.decode_tree(&root).unwrap(), map(&[("ok", 5)]));
    }

    #[test]
    fn missing_subtree_is_fatal() {
        let (_, odb) = memory_odb();
        let content = format!("40000 tree {} gone\n", oid(9));
        let root = odb.write_raw(content.as_bytes()).unwrap();
        assert!(matches!(odb.decode_tree(&root), Err(OdbError::Store(_))));
    }

    #[test]
    fn empty_snapshot_decodes_empty() {
        let (_, odb) = memory_odb();
        assert!(odb.decode_snapshot(None).unwrap().is_empty());
    }
}
