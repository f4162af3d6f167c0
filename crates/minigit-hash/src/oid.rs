use std::fmt;
use std::str::FromStr;

use crate::HashError;

/// An object identifier: the SHA-1 digest of an object's exact bytes.
///
/// Rendered as 40 lowercase hex characters everywhere it appears in a
/// serialized tree, commit, ref or index file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ObjectId::LEN]);

impl ObjectId {
    /// Digest length in bytes.
    pub const LEN: usize = 20;
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = Self::LEN * 2;

    /// Create an ObjectId from raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        let arr: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|_| HashError::InvalidHashLength {
                    expected: Self::LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Parse a 40-character hex string (either case).
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        if hex.len() != Self::HEX_LEN {
            return Err(HashError::InvalidHexLength {
                expected: Self::HEX_LEN,
                actual: hex.len(),
            });
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(hex, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => HashError::InvalidHex {
                position: index,
                character: c,
            },
            _ => HashError::InvalidHexLength {
                expected: Self::HEX_LEN,
                actual: hex.len(),
            },
        })?;
        Ok(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated hex rendering used in human-readable output.
    pub fn to_short_hex(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// Split into the shard directory and file name: `("xx", "xxxx...")`.
    pub fn shard(&self) -> (String, String) {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        (dir.to_string(), file.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
