//! Index file reading.

use std::io;
use std::path::Path;

use bstr::{BString, ByteSlice};
use minigit_hash::ObjectId;
use tracing::warn;

use crate::{IndexError, StagingArea};

pub(crate) fn read_index(path: &Path) -> Result<StagingArea, IndexError> {
    match std::fs::read(path) {
        Ok(data) => Ok(parse_index(&data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StagingArea::new()),
        Err(source) => Err(IndexError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Each line is split at its last space into path and hash, so paths may
/// contain spaces. Lines end at `\n` only.
pub(crate) fn parse_index(data: &[u8]) -> StagingArea {
    let mut staging = StagingArea::new();
    for (lineno, line) in data.split_str("\n").enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((path, oid)) => staging.add(path, oid),
            None => warn!(line = lineno + 1, entry = %line.as_bstr(), "skipping bad index line"),
        }
    }
    staging
}

fn parse_line(line: &[u8]) -> Option<(BString, ObjectId)> {
    let space = line.rfind_byte(b' ')?;
    let path = &line[..space];
    if path.is_empty() {
        return None;
    }
    let hex = std::str::from_utf8(&line[space + 1..]).ok()?;
    let oid = ObjectId::from_hex(hex).ok()?;
    Some((BString::from(path), oid))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed";

    #[test]
    fn parse_good_lines() {
        let data = format!("a.txt {HASH}\nsrc/lib.rs {HASH}\n");
        let staging = parse_index(data.as_bytes());
        assert_eq!(staging.len(), 2);
        assert!(staging.get(b"src/lib.rs".as_bstr()).is_some());
    }

    #[test]
    fn skip_lines_without_space_or_bad_hash() {
        let data = format!("nospace\nbad.txt 1234\n {HASH}\nok {HASH}\n");
        let staging = parse_index(data.as_bytes());
        assert_eq!(staging.len(), 1);
        assert!(staging.get(b"ok".as_bstr()).is_some());
    }

    #[test]
    fn paths_with_spaces_read_back() {
        let data = format!("my notes.txt {HASH}\ndocs/two words/a b.md {HASH}\n");
        let staging = parse_index(data.as_bytes());
        assert_eq!(staging.len(), 2);
        assert!(staging.get(b"my notes.txt".as_bstr()).is_some());
        assert!(staging.get(b"docs/two words/a b.md".as_bstr()).is_some());
    }

    #[test]
    fn carriage_return_stays_in_path() {
        let data = format!("name\r {HASH}\n");
        let staging = parse_index(data.as_bytes());
        assert!(staging.get(b"name\r".as_bstr()).is_some());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let staging = read_index(&dir.path().join("index")).unwrap();
        assert!(staging.is_empty());
    }
}
