use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use minigit_hash::ObjectId;

use crate::error::RefError;

/// Contents of a ref file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RefContent {
    /// A commit id.
    Direct(ObjectId),
    /// `ref: <target>`, naming another ref.
    Symbolic(String),
}

/// Read a ref file. Returns `None` if it does not exist.
pub(crate) fn read_ref_file(path: &Path) -> Result<Option<RefContent>, RefError> {
    let contents = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RefError::IoPath {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let trimmed = contents.trim();
    if let Some(target) = trimmed.strip_prefix(b"ref: ") {
        let target = std::str::from_utf8(target.trim())
            .map_err(|_| RefError::Parse("invalid UTF-8 in symbolic ref target".into()))?;
        Ok(Some(RefContent::Symbolic(target.to_string())))
    } else {
        let hex = std::str::from_utf8(trimmed)
            .map_err(|_| RefError::Parse(format!("invalid UTF-8 in {}", path.display())))?;
        Ok(Some(RefContent::Direct(ObjectId::from_hex(hex)?)))
    }
}

/// Write `<hash>\n` to `path`, creating parent directories.
pub(crate) fn write_direct(path: &Path, oid: &ObjectId) -> Result<(), RefError> {
    write_file(path, format!("{}\n", oid.to_hex()).as_bytes())
}

/// Write `ref: <target>\n` to `path`.
pub(crate) fn write_symbolic(path: &Path, target: &str) -> Result<(), RefError> {
    write_file(path, format!("ref: {target}\n").as_bytes())
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), RefError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| RefError::IoPath {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| RefError::IoPath {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect branch names under `heads_dir`, descending into namespaces.
pub(crate) fn list_heads(heads_dir: &Path) -> Result<Vec<String>, RefError> {
    let mut names = Vec::new();
    collect(heads_dir, "", &mut names)?;
    names.sort();
    Ok(names)
}

fn collect(dir: &Path, prefix: &str, names: &mut Vec<String>) -> Result<(), RefError> {
    let io_err = |path: PathBuf| move |source: io::Error| RefError::IoPath { path, source };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(io_err(dir.to_path_buf())(source)),
    };
    for entry in entries {
        let entry = entry.map_err(io_err(dir.to_path_buf()))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let full = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type().map_err(io_err(entry.path()))?;
        if file_type.is_dir() {
            collect(&entry.path(), &full, names)?;
        } else if file_type.is_file() {
            names.push(full);
        }
    }
    Ok(())
}
