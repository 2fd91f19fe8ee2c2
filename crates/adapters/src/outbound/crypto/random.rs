//! Secure random generation using OS RNG.

use application::ports::outbound::SecureRandom;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;

/// OS-based secure random generator.
pub struct OsRngRandom;

impl OsRngRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OsRngRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureRandom for OsRngRandom {
    fn random_string(&self, length: usize) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}
