//! Account passwords: Argon2id PHC hashes and the registration-form rules.
//!
//! Hashes are salted per call, so two accounts with the same password never
//! share a stored value.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use cqms_core::error::CoreError;

pub type HashError = argon2::password_hash::Error;

/// Hash a plaintext password into a `$argon2id$...` PHC string.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a login attempt against the stored `users.password_hash`.
///
/// A mismatch is `Ok(false)`; only an unreadable stored hash is an error.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Registration rules for a new password: the confirmation must match and
/// the password must be at least `min_length` characters.
pub fn validate_new_password(
    password: &str,
    confirm_password: &str,
    min_length: usize,
) -> Result<(), CoreError> {
    if password != confirm_password {
        return Err(CoreError::Validation("Passwords do not match".into()));
    }
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters"
        )));
    }
    Ok(())
}
