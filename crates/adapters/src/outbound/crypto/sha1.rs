//! Legacy SHA-1 password digest.

use application::ports::outbound::{CryptoError, PasswordDigest};
use sha1::{Digest, Sha1};

/// Hex-encoded SHA-1 of `plaintext + salt`.
///
/// The historical scheme: a single fast hash with no work factor.
/// Kept for stores populated by the previous implementation; new
/// deployments should prefer
/// [`Argon2PasswordDigest`](super::argon2::Argon2PasswordDigest).
pub struct Sha1PasswordDigest;

impl Sha1PasswordDigest {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha1PasswordDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordDigest for Sha1PasswordDigest {
    fn digest(
        &self,
        plaintext: &str,
        salt: &str,
    ) -> Result<String, CryptoError> {
        let mut hasher = Sha1::new();
        hasher.update(plaintext.as_bytes());
        hasher.update(salt.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // Vector produced by the previous implementation of the scheme.
        let digest = Sha1PasswordDigest::new();
        assert_eq!(
            digest.digest("bobs_secure_password", "1000").unwrap(),
            "b1d27036d59f9499d403f90e0bcf43281adaa844"
        );
    }

    #[test]
    fn test_verify() {
        let digest = Sha1PasswordDigest::new();
        let stored = digest.digest("test", "1000").unwrap();

        assert!(digest.verify("test", "1000", &stored).unwrap());
        assert!(!digest.verify("wrong", "1000", &stored).unwrap());
        assert!(!digest.verify("test", "1001", &stored).unwrap());
    }
}
