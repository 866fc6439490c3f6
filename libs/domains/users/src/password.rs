//! Password hashing and policy

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sha2::{Digest, Sha256};

use crate::error::{UserError, UserResult};

pub const MIN_PASSWORD_LEN: usize = 4;

pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// SHA-256 of the stored hash, embedded in reset tokens so a token dies
/// once the password changes.
pub fn fingerprint(hashed_password: &str) -> String {
    const_hex::encode(Sha256::digest(hashed_password.as_bytes()))
}

/// Returns the reason a password is rejected, if any.
pub fn check_policy(password: &str, email: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password should be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if !email.is_empty() && password.to_lowercase().contains(&email.to_lowercase()) {
        return Err("Password should not contain e-mail".to_string());
    }
    Ok(())
}
