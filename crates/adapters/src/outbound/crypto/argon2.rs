//! Argon2id password digest implementation.

use application::ports::outbound::{CryptoError, PasswordDigest};
use argon2::{Algorithm, Argon2, Params, Version};

const OUTPUT_LENGTH: usize = 32;

/// Argon2id password digest keyed by the account salt.
///
/// Replaces the historical single-round SHA-1 primitive while keeping
/// the verification contract: the digest is deterministic for a given
/// plaintext/salt pair, so verification recomputes and compares.
pub struct Argon2PasswordDigest {
    params: Params,
}

impl Argon2PasswordDigest {
    /// Create a new Argon2id digest with custom cost parameters.
    pub fn new(
        memory_cost: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, CryptoError> {
        let params = Params::new(
            memory_cost,
            iterations,
            parallelism,
            Some(OUTPUT_LENGTH),
        )
        .map_err(|e| CryptoError(e.to_string()))?;

        Ok(Self { params })
    }
}

impl Default for Argon2PasswordDigest {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordDigest for Argon2PasswordDigest {
    fn digest(
        &self,
        plaintext: &str,
        salt: &str,
    ) -> Result<String, CryptoError> {
        let argon2 = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        );

        let mut output =
            vec![0u8; self.params.output_len().unwrap_or(OUTPUT_LENGTH)];
        argon2
            .hash_password_into(
                plaintext.as_bytes(),
                salt.as_bytes(),
                &mut output,
            )
            .map_err(|e| CryptoError(e.to_string()))?;

        Ok(hex::encode(output))
    }
}
