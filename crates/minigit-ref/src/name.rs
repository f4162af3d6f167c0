use std::fmt;

use crate::error::RefError;

/// A validated branch name, the part after `refs/heads/`.
///
/// Rejects names that could not be stored as a ref file:
/// - empty, or `@`
/// - control characters, space, `~`, `^`, `:`, `?`, `*`, `[`, `\`
/// - leading or trailing `/`, `//`, `..`
/// - leading or trailing `.`, trailing `.lock`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchName(String);

/// Characters forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '~', '^', ':', '?', '*', '[', '\\'];

impl BranchName {
    pub fn new(name: impl Into<String>) -> Result<Self, RefError> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full ref path, e.g. `refs/heads/main`.
    pub fn full_name(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate(name: &str) -> Result<(), RefError> {
    let invalid = |why: &str| Err(RefError::InvalidName(format!("'{name}': {why}")));

    if name.is_empty() {
        return Err(RefError::InvalidName("branch name is empty".into()));
    }
    if name == "@" {
        return invalid("'@' is reserved");
    }
    if let Some(c) = name.chars().find(|c| c.is_control() || FORBIDDEN_CHARS.contains(c)) {
        return invalid(&format!("contains forbidden character {c:?}"));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return invalid("starts or ends with '/'");
    }
    if name.starts_with('.') || name.ends_with('.') {
        return invalid("starts or ends with '.'");
    }
    if name.ends_with(".lock") {
        return invalid("ends with '.lock'");
    }
    if name.contains("..") {
        return invalid("contains '..'");
    }
    if name.contains("//") {
        return invalid("contains '//'");
    }
    if name.split('/').any(|seg| seg.starts_with('.')) {
        return invalid("a component starts with '.'");
    }
    Ok(())
}
