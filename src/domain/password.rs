//! Password hashing and verification primitives.
//!
//! Hashing and verification share one fixed work factor so that a hash
//! produced at registration time always verifies with the credentials check.

use crate::domain::{Error, PasswordHash};

/// Fixed bcrypt work factor used for hashing and verification.
pub const PASSWORD_COST: u32 = 10;

/// Inclusive lower bound on plaintext password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Inclusive upper bound on plaintext password length.
pub const PASSWORD_MAX_LEN: usize = 20;

/// Hash a plaintext password for storage.
pub fn hash_password(plaintext: &str) -> Result<PasswordHash, Error> {
    let encoded = bcrypt::hash(plaintext, PASSWORD_COST)
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;
    PasswordHash::new(encoded).map_err(|err| Error::internal(err.to_string()))
}

/// Compare a submitted plaintext against a stored hash.
///
/// The comparison happens inside bcrypt and is safe against timing probes;
/// malformed stored hashes count as a mismatch rather than an error so the
/// caller's denial stays uniform.
pub fn verify_password(plaintext: &str, stored: &PasswordHash) -> bool {
    bcrypt::verify(plaintext, stored.as_ref()).unwrap_or(false)
}
