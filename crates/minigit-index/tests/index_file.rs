use bstr::ByteSlice;
use minigit_hash::Hasher;
use minigit_index::{FileIndexStore, IndexStore, MemoryIndexStore, StagingArea};

#[test]
fn save_then_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileIndexStore::new(dir.path().join("index"));

    let mut staging = store.load().unwrap();
    assert!(staging.is_empty());

    staging.add("README.md", Hasher::digest(b"readme").unwrap());
    staging.add("src/main.rs", Hasher::digest(b"fn main() {}").unwrap());
    store.save(&staging).unwrap();

    assert_eq!(store.load().unwrap(), staging);
    let text = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("README.md "));
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileIndexStore::new(dir.path().join("index"));

    let mut staging = StagingArea::new();
    staging.add("old.txt", Hasher::digest(b"old").unwrap());
    store.save(&staging).unwrap();

    let mut replacement = StagingArea::new();
    replacement.add("new.txt", Hasher::digest(b"new").unwrap());
    store.save(&replacement).unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.get(b"old.txt".as_bstr()).is_none());
    assert!(loaded.get(b"new.txt".as_bstr()).is_some());
}

#[test]
fn save_to_missing_directory_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("index");
    let store = FileIndexStore::new(&path);
    let err = store.save(&StagingArea::new()).unwrap_err();
    assert!(err.to_string().contains("no-such-dir"));
}

#[test]
fn memory_store_counts_saves() {
    let store = MemoryIndexStore::new();
    let mut staging = StagingArea::new();
    staging.add("a", Hasher::digest(b"a").unwrap());
    store.save(&staging).unwrap();
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.load().unwrap(), staging);
}

#[test]
fn paths_with_spaces_survive_serialize() {
    let mut staging = StagingArea::new();
    staging.add("my notes.txt", Hasher::digest(b"notes").unwrap());
    staging.add("plain.txt", Hasher::digest(b"plain").unwrap());

    let reparsed = StagingArea::parse(&staging.serialize());
    assert_eq!(reparsed, staging);
    assert!(reparsed.get(b"my notes.txt".as_bstr()).is_some());
}
