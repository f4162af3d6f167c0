//! Index file writing.

use std::path::Path;

use crate::{IndexError, StagingArea};

/// The whole file is rewritten on every save.
pub(crate) fn write_index(staging: &StagingArea, path: &Path) -> Result<(), IndexError> {
    std::fs::write(path, serialize_index(staging)).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn serialize_index(staging: &StagingArea) -> Vec<u8> {
    let mut buf = Vec::new();
    for (path, oid) in staging.iter() {
        buf.extend_from_slice(path);
        buf.push(b' ');
        buf.extend_from_slice(oid.to_hex().as_bytes());
        buf.push(b'\n');
    }
    buf
}
