use std::cmp::Ordering;

use bstr::{BString, ByteSlice};
use minigit_hash::ObjectId;
use tracing::warn;

/// File mode recorded on a tree entry.
///
/// Only two modes are ever written; anything else read back from a tree is
/// preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Regular file (100644)
    Regular,
    /// Subdirectory (40000)
    Tree,
    /// Unknown mode (preserved for round-trip)
    Unknown(u32),
}

impl FileMode {
    /// Parse from octal ASCII bytes (e.g., `b"100644"`).
    pub fn from_bytes(s: &[u8]) -> Option<Self> {
        parse_octal(s).map(Self::from_raw)
    }

    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0o100644 => Self::Regular,
            0o40000 => Self::Tree,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(&self) -> u32 {
        match self {
            Self::Regular => 0o100644,
            Self::Tree => 0o40000,
            Self::Unknown(v) => *v,
        }
    }

    /// Octal ASCII form, no leading zeros (`40000` for trees).
    pub fn as_bytes(&self) -> BString {
        BString::from(format!("{:o}", self.raw()))
    }
}

fn parse_octal(s: &[u8]) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut val: u32 = 0;
    for &b in s {
        if !(b'0'..=b'7').contains(&b) {
            return None;
        }
        val = val.checked_mul(8)?.checked_add(u32::from(b - b'0'))?;
    }
    Some(val)
}

/// What a tree entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Blob,
    Tree,
}

impl EntryKind {
    pub fn from_bytes(s: &[u8]) -> Option<Self> {
        match s {
            b"blob" => Some(Self::Blob),
            b"tree" => Some(Self::Tree),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Blob => b"blob",
            Self::Tree => b"tree",
        }
    }

    /// The mode written for entries of this kind.
    pub fn default_mode(&self) -> FileMode {
        match self {
            Self::Blob => FileMode::Regular,
            Self::Tree => FileMode::Tree,
        }
    }
}

/// A single record in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub kind: EntryKind,
    pub oid: ObjectId,
    pub name: BString,
}

impl TreeEntry {
    pub fn blob(name: impl Into<BString>, oid: ObjectId) -> Self {
        Self {
            mode: FileMode::Regular,
            kind: EntryKind::Blob,
            oid,
            name: name.into(),
        }
    }

    pub fn tree(name: impl Into<BString>, oid: ObjectId) -> Self {
        Self {
            mode: FileMode::Tree,
            kind: EntryKind::Tree,
            oid,
            name: name.into(),
        }
    }

    /// Parse one `<mode> <kind> <40-hex> <name>` record.
    ///
    /// Returns `None` for anything that does not fit that shape.
    fn parse_line(line: &[u8]) -> Option<Self> {
        let first = line.find_byte(b' ')?;
        let second = first + 1 + line[first + 1..].find_byte(b' ')?;

        let mode = FileMode::from_bytes(&line[..first])?;
        let kind = EntryKind::from_bytes(&line[first + 1..second])?;

        let hash_start = second + 1;
        let hash_end = hash_start + ObjectId::HEX_LEN;
        let hex = std::str::from_utf8(line.get(hash_start..hash_end)?).ok()?;
        let oid = ObjectId::from_hex(hex).ok()?;

        if line.get(hash_end) != Some(&b' ') {
            return None;
        }
        let name = &line[hash_end + 1..];
        if name.is_empty() {
            return None;
        }

        Some(Self {
            mode,
            kind,
            oid,
            name: BString::from(name),
        })
    }
}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical record order: blobs before subtrees, each group by name.
impl Ord for TreeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// A tree object: the listing of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree content.
    ///
    /// Parsing is lenient: a line that is not a well-formed record is logged
    /// and skipped, never fatal.
    pub fn parse(content: &[u8]) -> Self {
        let mut entries = Vec::new();
        for (lineno, line) in content.split_str("\n").enumerate() {
            if line.is_empty() {
                continue;
            }
            match TreeEntry::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => warn!(
                    line = lineno + 1,
                    record = %line.as_bstr(),
                    "skipping malformed tree record"
                ),
            }
        }
        Self { entries }
    }

    /// Serialize to text, one record per line in canonical order.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut sorted = self.entries.clone();
        sorted.sort();

        let mut out = Vec::new();
        for entry in &sorted {
            out.extend_from_slice(&entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.kind.as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.oid.to_hex().as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(b'\n');
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
