//! User Handle Value Object
//!
//! The handle is the user's external-facing identifier: used for login and
//! referenced by every module record. Handles are case-insensitive; the
//! stored form is always lowercase.
//!
//! ## Invariants
//! - NFKC-normalized, trimmed, lowercased
//! - ASCII alphanumeric plus `-` and `_` only
//! - Length 2..=32 characters
//! - Starts with an alphanumeric character

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a handle (in characters)
pub const HANDLE_MIN_LENGTH: usize = 2;

/// Maximum length for a handle (in characters)
pub const HANDLE_MAX_LENGTH: usize = 32;

/// Error returned when handle validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserHandleError {
    /// Handle is empty after normalization
    Empty,

    /// Handle is too short
    TooShort { length: usize, min: usize },

    /// Handle is too long
    TooLong { length: usize, max: usize },

    /// Handle contains a character outside [a-z0-9_-]
    InvalidCharacter { char: char, position: usize },

    /// Handle starts with a non-alphanumeric character
    InvalidStart { char: char },
}

impl fmt::Display for UserHandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Handle cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Handle is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Handle is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, -, _ are allowed"
                )
            }
            Self::InvalidStart { char } => {
                write!(f, "Handle cannot start with '{char}'. Must start with a-z or 0-9")
            }
        }
    }
}

impl std::error::Error for UserHandleError {}

/// Validated, normalized user handle.
///
/// Construction applies NFKC normalization, trims, lowercases, then
/// validates charset and length. Two handles differing only in case are
/// the same handle.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserHandle(String);

impl UserHandle {
    /// Create a new handle from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserHandleError> {
        let normalized: String = input.as_ref().nfkc().collect::<String>();
        let handle = normalized.trim().to_lowercase();

        Self::validate(&handle)?;

        Ok(Self(handle))
    }

    /// Create from a database value (assumes already validated)
    pub fn from_db(value: &str) -> Result<Self, UserHandleError> {
        Self::validate(value)?;
        Ok(Self(value.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(handle: &str) -> Result<(), UserHandleError> {
        if handle.is_empty() {
            return Err(UserHandleError::Empty);
        }

        let length = handle.chars().count();
        if length < HANDLE_MIN_LENGTH {
            return Err(UserHandleError::TooShort {
                length,
                min: HANDLE_MIN_LENGTH,
            });
        }
        if length > HANDLE_MAX_LENGTH {
            return Err(UserHandleError::TooLong {
                length,
                max: HANDLE_MAX_LENGTH,
            });
        }

        for (position, char) in handle.chars().enumerate() {
            let valid = char.is_ascii_lowercase() || char.is_ascii_digit() || char == '-' || char == '_';
            if !valid {
                return Err(UserHandleError::InvalidCharacter { char, position });
            }
        }

        let first = handle.chars().next().unwrap_or('\0');
        if !first.is_ascii_alphanumeric() {
            return Err(UserHandleError::InvalidStart { char: first });
        }

        Ok(())
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserHandle({})", self.0)
    }
}

impl TryFrom<String> for UserHandle {
    type Error = UserHandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserHandle> for String {
    fn from(handle: UserHandle) -> Self {
        handle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_handles() {
        assert!(UserHandle::new("a1").is_ok());
        assert!(UserHandle::new("abc").is_ok());
        assert!(UserHandle::new("player-one").is_ok());
        assert!(UserHandle::new("guild_42").is_ok());
        assert!(UserHandle::new("0xdeadbeef").is_ok());
    }

    #[test]
    fn test_lowercased() {
        let handle = UserHandle::new("Alice-R4").unwrap();
        assert_eq!(handle.as_str(), "alice-r4");
    }

    #[test]
    fn test_trimmed() {
        let handle = UserHandle::new("  alice  ").unwrap();
        assert_eq!(handle.as_str(), "alice");
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            UserHandle::new("has space"),
            Err(UserHandleError::InvalidCharacter { char: ' ', .. })
        ));
        assert!(matches!(
            UserHandle::new("dot.ted"),
            Err(UserHandleError::InvalidCharacter { char: '.', .. })
        ));
        assert!(UserHandle::new("名前です").is_err());
    }

    #[test]
    fn test_invalid_start() {
        assert!(matches!(
            UserHandle::new("-leading"),
            Err(UserHandleError::InvalidStart { char: '-' })
        ));
        assert!(matches!(
            UserHandle::new("_leading"),
            Err(UserHandleError::InvalidStart { char: '_' })
        ));
    }

    #[test]
    fn test_length_limits() {
        assert!(matches!(
            UserHandle::new("a"),
            Err(UserHandleError::TooShort { .. })
        ));
        let long = "a".repeat(HANDLE_MAX_LENGTH + 1);
        assert!(matches!(
            UserHandle::new(long),
            Err(UserHandleError::TooLong { .. })
        ));
        assert!(UserHandle::new("a".repeat(HANDLE_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width latin letters normalize to ASCII
        let handle = UserHandle::new("ａｂｃ１２").unwrap();
        assert_eq!(handle.as_str(), "abc12");
    }

    #[test]
    fn test_serde_roundtrip() {
        let handle = UserHandle::new("alice").unwrap();
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "\"alice\"");
        let back: UserHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, handle);
    }
}
