//! Cryptographic adapters.

pub mod argon2;
pub mod random;
pub mod sha1;
pub mod sha2;

pub use self::argon2::Argon2PasswordDigest;
pub use self::random::OsRngRandom;
pub use self::sha1::Sha1PasswordDigest;
pub use self::sha2::Sha256TokenDigest;
