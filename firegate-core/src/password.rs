//! Argon2 password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`), so the parameters
//! travel with the hash and verification needs no extra configuration.

use crate::{FiregateError, Result};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

/// Hash a plaintext password into a PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| FiregateError::Password(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| FiregateError::Password(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FiregateError::Password(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a plaintext password against a stored PHC string.
///
/// A hash that does not parse never matches.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not a valid PHC string");
            false
        }
    }
}
