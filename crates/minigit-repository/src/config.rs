//! Repository config file (`.minigit/config`), git's INI-like format.
//!
//! Only the subset minigit reads is understood: `[section]` headers,
//! `key = value` entries, `#`/`;` comments and blank lines. Section and key
//! names are case-insensitive. Lines that fit none of these are skipped.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::RepoError;

/// Parsed configuration, keyed by `section.key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Config {
    /// Load from `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, RepoError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(RepoError::io(path)(e)),
        }
    }

    pub fn parse(text: &str) -> Self {
        let mut values = BTreeMap::new();
        let mut section: Option<String> = None;

        for (lineno, raw) in text.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                match header.strip_suffix(']') {
                    Some(name) if !name.trim().is_empty() => {
                        section = Some(name.trim().to_ascii_lowercase());
                    }
                    _ => {
                        warn!(line = lineno + 1, "skipping malformed config section header");
                        section = None;
                    }
                }
                continue;
            }

            let Some(section) = &section else {
                warn!(line = lineno + 1, "skipping config entry outside any section");
                continue;
            };
            let (key, value) = match line.split_once('=') {
                Some((k, v)) => (k.trim(), unquote(v.trim())),
                None => (line, "true"),
            };
            if key.is_empty() {
                warn!(line = lineno + 1, "skipping config entry without a key");
                continue;
            }
            values.insert(
                format!("{section}.{}", key.to_ascii_lowercase()),
                value.to_string(),
            );
        }

        Self { values }
    }

    /// Look up `section.key`, e.g. `user.name`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' | ';' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
