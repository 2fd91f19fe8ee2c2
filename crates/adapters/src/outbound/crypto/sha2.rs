//! SHA-256 digest for non-password tokens.

use application::ports::outbound::TokenDigest;
use sha2::{Digest, Sha256};

/// SHA-256 token digest with an optional server-side pepper.
///
/// Produces the opaque activation, pending-email and autologin tokens.
/// Deterministic: the same material always digests to the same token.
pub struct Sha256TokenDigest {
    pepper: Vec<u8>,
}

impl Sha256TokenDigest {
    pub fn new(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }
}

impl TokenDigest for Sha256TokenDigest {
    fn digest(&self, material: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.pepper);
        hasher.update(material.as_bytes());

        hex::encode(hasher.finalize())
    }
}
