//! Email address type for login and draft ownership.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input exceeds the RFC 5321 length limit.
    #[error("email must be at most {0} characters")]
    TooLong(usize),
    /// The input is not `local@domain` with both parts present.
    #[error("email must look like name@domain")]
    Malformed,
}

/// An email address.
///
/// Validation is structural only (one `@` with non-empty parts, RFC 5321
/// length cap). The inventory backend is the authority on whether an address
/// belongs to a real account; this type exists so obviously broken input
/// never reaches the network.
///
/// ## Examples
///
/// ```
/// use bodega_core::Email;
///
/// assert!(Email::parse("ops@bodega.example").is_ok());
/// assert!(Email::parse("  ops@bodega.example  ").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("no-at-sign").is_err());
/// assert!(Email::parse("@bodega.example").is_err());
/// assert!(Email::parse("ops@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from user input. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] if the trimmed input is empty, too long, or is
    /// not `local@domain` with both parts non-empty.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong(Self::MAX_LENGTH));
        }
        match s.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(s.to_owned()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(Email::parse("ops@bodega.example").is_ok());
        assert!(Email::parse("first.last+tag@sub.domain.example").is_ok());
    }

    #[test]
    fn test_input_is_trimmed() {
        let email = Email::parse("  ops@bodega.example ");
        assert_eq!(email.map(|e| e.to_string()), Ok("ops@bodega.example".to_string()));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_missing_parts_rejected() {
        assert_eq!(Email::parse("no-at-sign"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("@bodega.example"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("ops@"), Err(EmailError::Malformed));
    }

    #[test]
    fn test_too_long_rejected() {
        let long = format!("{}@bodega.example", "a".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong(Email::MAX_LENGTH)));
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("ops@bodega.example").expect("valid");
        let json = serde_json::to_string(&email).expect("serialize");
        assert_eq!(json, "\"ops@bodega.example\"");
    }
}
