//! SHA-256 fingerprints with domain separation.
//!
//! A fingerprint is `SHA-256(domain || data)`. Domains are null-terminated so
//! that no domain is a prefix of another. The text form is
//! `"sha256:<lowercase hex>"`.

use std::fmt;

use sha2::{Digest, Sha256};

/// Domain for state fingerprints kept by the explored set.
pub const DOMAIN_STATE_ARTIFACT: &[u8] = b"WAYPOINT::STATE_ARTIFACT::V1\0";

/// Domain for recorded search traces.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"WAYPOINT::SEARCH_TRACE::V1\0";

const ALGORITHM: &str = "sha256";

/// A 32-byte SHA-256 digest.
///
/// Stored as raw bytes so explored sets hash and compare fixed-size keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint `data` under `domain`.
    #[must_use]
    pub fn of(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Parse the `"sha256:<hex>"` text form.
    ///
    /// Returns `None` for another algorithm, bad hex, or a digest that is not
    /// 32 bytes long.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (algorithm, digest) = text.split_once(':')?;
        if algorithm != ALGORITHM {
            return None;
        }
        let bytes: [u8; 32] = hex::decode(digest).ok()?.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Always `"sha256"`.
    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex of the digest, without the algorithm prefix.
    #[must_use]
    pub fn hex_digest(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ALGORITHM}:{}", self.hex_digest())
    }
}
