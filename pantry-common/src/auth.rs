//! Account helpers: credential validation, password hashing and session tokens
//!
//! Pure functions only. Storage lives in [`crate::db::users`], HTTP extraction
//! in the server crate.
//!
//! Passwords are stored as `sha256(salt || password)` rendered as 64 lowercase
//! hex characters, next to a random per-user salt.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Random bytes behind each salt and session token
const TOKEN_BYTES: usize = 32;
const SALT_BYTES: usize = 16;

/// Check an email address and return its normalized (trimmed, lowercase) form
///
/// Requires a non-empty local part, an `@`, and a `.` somewhere in the domain
/// that is neither its first nor last character.
/// Stored and looked-up form of an email: trimmed, Unicode-lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<String> {
    let normalized = normalize_email(email);
    let invalid = || Error::InvalidInput(format!("Invalid email address: {}", email.trim()));

    let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.find('.') {
        Some(dot) if dot > 0 && !domain.ends_with('.') => Ok(normalized),
        _ => Err(invalid()),
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn generate_salt() -> String {
    random_hex(SALT_BYTES)
}

/// Opaque bearer token handed out at login
pub fn generate_session_token() -> String {
    random_hex(TOKEN_BYTES)
}

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let computed = hash_password(password, salt);
    // Compare every byte so timing does not leak the matching prefix length
    computed.len() == expected_hash.len()
        && computed
            .bytes()
            .zip(expected_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
