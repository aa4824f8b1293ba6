//! Argon2 password hashing.

use crate::error::RecordsError;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Hash a plaintext password into a PHC string.
pub fn hash(password: &str) -> Result<String, RecordsError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| RecordsError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored PHC string.
///
/// An unparseable stored hash verifies as false rather than erroring; the
/// caller cannot do anything smarter with a corrupt hash than reject the
/// login.
pub fn verify(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash("secret1").unwrap();
        assert_ne!(hashed, "secret1");
        assert!(verify("secret1", &hashed));
        assert!(!verify("secret2", &hashed));
    }

    #[test]
    fn corrupt_hash_rejects() {
        assert!(!verify("secret1", "not-a-phc-string"));
    }
}
