//! Opaque session token type.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`SessionToken`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenError {
    /// The input string is empty (after trimming).
    #[error("session token cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("session token must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or control characters.
    #[error("session token contains invalid characters")]
    InvalidCharacters,
}

/// A bearer session token.
///
/// Tokens are bare random identifiers: 128 random bits rendered as 32
/// lowercase hex characters. They are not signed and carry no structure, so
/// the only way to check one is to look it up in `admin_sessions`.
///
/// Parsing is deliberately lenient about the alphabet because sessions issued
/// by other clients of the same database use different encodings.
///
/// ## Examples
///
/// ```
/// use school_admin_core::SessionToken;
///
/// let token = SessionToken::generate();
/// assert_eq!(token.as_str().len(), 32);
///
/// assert!(SessionToken::parse("  abc123  ").is_ok());
/// assert!(SessionToken::parse("").is_err());
/// assert!(SessionToken::parse("has space").is_err());
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Length of a freshly generated token.
    pub const GENERATED_LENGTH: usize = 32;

    /// Maximum accepted length when parsing a token from a request.
    pub const MAX_LENGTH: usize = 256;

    /// Generate a new random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse a `SessionToken` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 256 characters,
    /// or contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, SessionTokenError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(SessionTokenError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SessionTokenError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SessionTokenError::InvalidCharacters);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SessionToken` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_32_lowercase_hex() {
        let token = SessionToken::generate();
        assert_eq!(token.as_str().len(), SessionToken::GENERATED_LENGTH);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[test]
    fn test_parse_trims() {
        let token = SessionToken::parse("  deadbeef\n").unwrap();
        assert_eq!(token.as_str(), "deadbeef");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(SessionToken::parse("   "), Err(SessionTokenError::Empty));
    }

    #[test]
    fn test_parse_rejects_inner_whitespace() {
        assert_eq!(
            SessionToken::parse("dead beef"),
            Err(SessionTokenError::InvalidCharacters)
        );
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "a".repeat(SessionToken::MAX_LENGTH + 1);
        assert!(matches!(
            SessionToken::parse(&long),
            Err(SessionTokenError::TooLong { .. })
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = SessionToken::parse("secret-token").unwrap();
        assert!(!format!("{token:?}").contains("secret-token"));
    }
}
