use bstr::{BString, ByteSlice};
use minigit_hash::ObjectId;

use crate::ObjectError;

/// A commit object.
///
/// The on-disk form carries a single save-time timestamp on both the author
/// and committer lines; `timestamp` holds whatever was recovered on parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Root tree, `None` for a commit over an empty snapshot.
    pub tree: Option<ObjectId>,
    /// Parent commits in order (empty for a root commit, two for a merge).
    pub parents: Vec<ObjectId>,
    /// Author identity, `Name <email>`.
    pub author: BString,
    /// Committer identity, `Name <email>`.
    pub committer: BString,
    /// Unix seconds.
    pub timestamp: i64,
    pub message: BString,
}

impl Commit {
    /// Parse commit content.
    ///
    /// `fallback_time` is used when neither the author nor the committer line
    /// yields a timestamp.
    pub fn parse(content: &[u8], fallback_time: i64) -> Result<Self, ObjectError> {
        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = BString::default();
        let mut committer = BString::default();
        let mut author_time = None;
        let mut committer_time = None;

        let (headers, body) = match content.find(b"\n\n") {
            Some(pos) => (&content[..pos + 1], &content[pos + 2..]),
            None => (content, &b""[..]),
        };

        for line in headers.lines() {
            if let Some(value) = line.strip_prefix(b"tree ") {
                tree = parse_hash_field(value, "tree")?;
            } else if let Some(value) = line.strip_prefix(b"parent ") {
                let parent = parse_hash_field(value, "parent")?.ok_or(
                    ObjectError::InvalidCommitHeader {
                        header: "parent",
                        reason: "missing hash".into(),
                    },
                )?;
                parents.push(parent);
            } else if let Some(value) = line.strip_prefix(b"author ") {
                let (identity, time) = split_signature(value);
                author = identity;
                author_time = time;
            } else if let Some(value) = line.strip_prefix(b"committer ") {
                let (identity, time) = split_signature(value);
                committer = identity;
                committer_time = time;
            }
        }

        let message = BString::from(body.strip_suffix(b"\n").unwrap_or(body));

        Ok(Self {
            tree,
            parents,
            author,
            committer,
            timestamp: committer_time.or(author_time).unwrap_or(fallback_time),
            message,
        })
    }

    /// Serialize with `now` stamped on the author and committer lines.
    ///
    /// The `timestamp` field is not consulted.
    pub fn serialize_at(&self, now: i64) -> Vec<u8> {
        let mut out = Vec::new();

        out.extend_from_slice(b"tree ");
        if let Some(tree) = &self.tree {
            out.extend_from_slice(tree.to_hex().as_bytes());
        }
        out.push(b'\n');

        for parent in &self.parents {
            out.extend_from_slice(b"parent ");
            out.extend_from_slice(parent.to_hex().as_bytes());
            out.push(b'\n');
        }

        for (key, identity) in [(&b"author "[..], &self.author), (&b"committer "[..], &self.committer)] {
            out.extend_from_slice(key);
            out.extend_from_slice(identity);
            out.push(b' ');
            out.extend_from_slice(now.to_string().as_bytes());
            out.push(b'\n');
        }

        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out.push(b'\n');
        out
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// First line of the message.
    pub fn summary(&self) -> &[u8] {
        self.message.lines().next().unwrap_or(b"")
    }
}

/// Read the 40-character hash at the start of a header value.
fn parse_hash_field(value: &[u8], header: &'static str) -> Result<Option<ObjectId>, ObjectError> {
    let field = &value[..value.len().min(ObjectId::HEX_LEN)];
    if field.is_empty() {
        return Ok(None);
    }
    let hex = std::str::from_utf8(field).map_err(|_| ObjectError::InvalidCommitHeader {
        header,
        reason: "non-UTF8 hash".into(),
    })?;
    Ok(Some(ObjectId::from_hex(hex)?))
}

/// Split `Name <email> 1700000000` into identity and timestamp.
///
/// The identity runs through the last `>`; the timestamp is the first token
/// after it. A line without `>` is all identity.
fn split_signature(value: &[u8]) -> (BString, Option<i64>) {
    let Some(gt) = value.rfind_byte(b'>') else {
        return (BString::from(value), None);
    };
    let identity = BString::from(&value[..=gt]);
    let time = value[gt + 1..]
        .trim_start_with(|c| c == ' ')
        .split_str(" ")
        .next()
        .and_then(|tok| tok.to_str().ok())
        .and_then(|tok| tok.parse::<i64>().ok());
    (identity, time)
}
