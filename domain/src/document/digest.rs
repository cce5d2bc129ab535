//! Content digest value object
//!
//! A [`ContentDigest`] is the SHA-256 of a document's bytes in lowercase hex.
//! It keys the local cache (`{digest}.pdf`) and is encoded into the filename
//! of every upload so a later run can find the same content upstream.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 content digest (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Hash a byte sequence
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Parse a hex digest, accepting only 64 hex characters
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        if s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(s))
        } else {
            None
        }
    }

    /// Recover the digest from an uploaded artifact name such as `"<hex>.pdf"`.
    ///
    /// Everything from the first `.pdf` onwards is ignored.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let stem = filename.split(".pdf").next().unwrap_or(filename);
        Self::parse(stem)
    }

    /// Canonical artifact filename for this digest
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
