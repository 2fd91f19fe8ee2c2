//! Interfaces for cryptographic operations.

#[derive(Debug, thiserror::Error)]
#[error("credential digest failed: {0}")]
pub struct CryptoError(pub String);

/// Port for the salted password digest.
///
/// The external contract is fixed: verification recomputes the digest
/// of the plaintext with the account's salt and compares it with the
/// stored hash. Adapters choose the primitive behind it.
pub trait PasswordDigest: Send + Sync {
    /// One-way digest of `plaintext` mixed with `salt`.
    fn digest(&self, plaintext: &str, salt: &str)
    -> Result<String, CryptoError>;

    /// Whether `plaintext` with `salt` digests to `stored`.
    fn verify(
        &self,
        plaintext: &str,
        salt: &str,
        stored: &str,
    ) -> Result<bool, CryptoError> {
        Ok(self.digest(plaintext, salt)? == stored)
    }
}

/// Port for deterministic, non-password digests: activation codes,
/// pending-email tokens and autologin tokens.
pub trait TokenDigest: Send + Sync {
    fn digest(&self, material: &str) -> String;
}

/// Port for secure random generation.
pub trait SecureRandom: Send + Sync {
    /// Generates a random alphanumeric string.
    fn random_string(&self, length: usize) -> String;
}
