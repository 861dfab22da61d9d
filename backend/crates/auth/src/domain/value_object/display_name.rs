//! Display Name Value Object
//!
//! The name shown in rankings and member lists. Unlike the handle it may
//! contain any Unicode letters and digits, but it is still unique across
//! the guild: uniqueness is checked against the lowercase canonical form.
//!
//! ## Invariants
//! - NFKC-normalized, trimmed
//! - Length 2..=30 characters
//! - Letters, digits, spaces and `-` `_` `.` only
//! - No leading/trailing whitespace, no consecutive spaces

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a display name (in characters)
pub const DISPLAY_NAME_MIN_LENGTH: usize = 2;

/// Maximum length for a display name (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 30;

/// Error returned when display name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    /// Name is empty after normalization
    Empty,

    /// Name is too short
    TooShort { length: usize, min: usize },

    /// Name is too long
    TooLong { length: usize, max: usize },

    /// Name contains a disallowed character
    InvalidCharacter { char: char },

    /// Name contains consecutive spaces
    ConsecutiveSpaces,
}

impl fmt::Display for DisplayNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Display name cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Display name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Display name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char } => {
                write!(
                    f,
                    "Invalid character '{char}'. Letters, digits, spaces, -, _, . are allowed"
                )
            }
            Self::ConsecutiveSpaces => {
                write!(f, "Display name cannot contain consecutive spaces")
            }
        }
    }
}

impl std::error::Error for DisplayNameError {}

/// Validated, normalized display name.
///
/// # Storage
/// - `original`: the user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName {
    original: String,
    canonical: String,
}

impl DisplayName {
    /// Create a new display name from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Create from a database value (assumes already validated)
    pub fn from_db(original: &str) -> Result<Self, DisplayNameError> {
        Self::validate(original)?;
        Ok(Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        })
    }

    /// Get the original display name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (lowercase) form used for uniqueness
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(name: &str) -> Result<(), DisplayNameError> {
        if name.is_empty() {
            return Err(DisplayNameError::Empty);
        }

        let length = name.chars().count();
        if length < DISPLAY_NAME_MIN_LENGTH {
            return Err(DisplayNameError::TooShort {
                length,
                min: DISPLAY_NAME_MIN_LENGTH,
            });
        }
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                length,
                max: DISPLAY_NAME_MAX_LENGTH,
            });
        }

        for char in name.chars() {
            let valid = char.is_alphanumeric()
                || char == ' '
                || char == '-'
                || char == '_'
                || char == '.';
            if !valid {
                return Err(DisplayNameError::InvalidCharacter { char });
            }
        }

        if name.contains("  ") {
            return Err(DisplayNameError::ConsecutiveSpaces);
        }

        Ok(())
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Debug for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayName({})", self.original)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DisplayNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(DisplayName::new("Alice").is_ok());
        assert!(DisplayName::new("War Chief 42").is_ok());
        assert!(DisplayName::new("mr.brightside").is_ok());
        assert!(DisplayName::new("夜の王").is_ok());
    }

    #[test]
    fn test_case_preserved_canonical_lowered() {
        let name = DisplayName::new("WarChief").unwrap();
        assert_eq!(name.original(), "WarChief");
        assert_eq!(name.canonical(), "warchief");
    }

    #[test]
    fn test_trimmed() {
        let name = DisplayName::new("  Alice  ").unwrap();
        assert_eq!(name.original(), "Alice");
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            DisplayName::new("no@email"),
            Err(DisplayNameError::InvalidCharacter { char: '@' })
        ));
        assert!(DisplayName::new("tab\there").is_err());
    }

    #[test]
    fn test_consecutive_spaces() {
        assert!(matches!(
            DisplayName::new("two  spaces"),
            Err(DisplayNameError::ConsecutiveSpaces)
        ));
    }

    #[test]
    fn test_length_limits() {
        assert!(matches!(
            DisplayName::new("a"),
            Err(DisplayNameError::TooShort { .. })
        ));
        let long = "a".repeat(DISPLAY_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            DisplayName::new(long),
            Err(DisplayNameError::TooLong { .. })
        ));
    }
}
