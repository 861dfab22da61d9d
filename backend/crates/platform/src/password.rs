//! Password Hashing and Verification
//!
//! Argon2id hashing with NFKC-normalized policy validation. Cleartext
//! material is zeroized on drop and never printed by Debug.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum accepted length in code points.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted length in code points.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Policy violations reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Failures in the hashing layer itself.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Cleartext password, erased from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and validate user input against the policy.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();
        check_policy(&normalized)?;
        Ok(Self(normalized))
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id. The optional `pepper` is an application-wide
    /// secret mixed into the input; the same pepper is required to verify.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let input = peppered(self.as_bytes(), pepper);
        let salt = SaltString::generate(OsRng);

        // Argon2::default() is Argon2id with the OWASP parameter set.
        let hash = Argon2::default()
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword(hash.to_string()))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Argon2id hash in PHC string format. Safe to persist.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Parse a PHC string loaded from storage.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self(hash))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Check a candidate password. Argon2 compares digests in constant time.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };

        let input = peppered(password.as_bytes(), pepper);
        Argon2::default().verify_password(&input, &parsed).is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

fn peppered(password: &[u8], pepper: Option<&[u8]>) -> Vec<u8> {
    let mut bytes = password.to_vec();
    if let Some(p) = pepper {
        bytes.extend_from_slice(p);
    }
    bytes
}

fn check_policy(normalized: &str) -> Result<(), PasswordPolicyError> {
    if normalized.trim().is_empty() {
        return Err(PasswordPolicyError::EmptyOrWhitespace);
    }

    let len = normalized.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: len,
        });
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual: len,
        });
    }

    let has_forbidden_control = normalized
        .chars()
        .any(|ch| ch.is_control() && !matches!(ch, ' ' | '\t' | '\n'));
    if has_forbidden_control {
        return Err(PasswordPolicyError::InvalidCharacter);
    }

    if is_predictable(normalized) {
        return Err(PasswordPolicyError::CommonPattern);
    }

    Ok(())
}

/// Reject single-character runs, digit staircases, keyboard walks and
/// entries from a short deny list of leaked favorites.
fn is_predictable(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next()
        && lower.chars().count() >= 3
        && chars.all(|c| c == first)
    {
        return true;
    }

    if is_digit_staircase(&lower) {
        return true;
    }

    const KEYBOARD_WALKS: &[&str] = &[
        "qwerty",
        "qwertyuiop",
        "asdfgh",
        "asdfghjkl",
        "zxcvbn",
        "qazwsx",
        "1qaz2wsx",
    ];
    if KEYBOARD_WALKS.iter().any(|walk| lower.contains(walk)) {
        return true;
    }

    const DENY_LIST: &[&str] = &[
        "password",
        "password1",
        "password123",
        "12345678",
        "123456789",
        "1234567890",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "monkey",
        "shadow",
        "master",
        "dragon",
        "baseball",
        "trustno1",
    ];
    DENY_LIST.contains(&lower.as_str())
}

/// Four or more digits counting up or down by one, wrapping mod 10.
fn is_digit_staircase(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    ascending || descending
}
