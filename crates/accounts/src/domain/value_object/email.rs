//! Email Value Object
//!
//! Represents an email address that passed the shape check.
//! Shape only - deliverability is out of scope.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an email fails the shape check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid email format")]
pub struct EmailFormatError;

/// Email address value object
///
/// Accepted shape: `local@domain.tld` where the local part uses ASCII
/// letters, digits, or `._%+-`, the domain uses letters, digits, dots, or
/// hyphens, and the final label is at least two ASCII letters. Case is
/// preserved; uniqueness in the store is over the stored form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with shape validation
    pub fn new(email: impl Into<String>) -> Result<Self, EmailFormatError> {
        let email = email.into();
        if Self::is_valid_format(&email) {
            Ok(Self(email))
        } else {
            Err(EmailFormatError)
        }
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty()
            || !local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
        {
            return false;
        }

        // The final label sits after the last dot and must be letters only;
        // everything before that dot may be letters, digits, dots, hyphens.
        let Some((prefix, label)) = domain.rsplit_once('.') else {
            return false;
        };
        if prefix.is_empty()
            || !prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        {
            return false;
        }
        label.len() >= 2 && label.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = EmailFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("a@b.com").is_ok());
        assert!(Email::new("user.name+tag@example.co.jp").is_ok());
        assert!(Email::new("user_name%x@sub.example-site.org").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("userexample.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@.com").is_err());
        assert!(Email::new("user@example.c").is_err());
        assert!(Email::new("user@example.c0m").is_err());
        assert!(Email::new("us er@example.com").is_err());
    }

    #[test]
    fn test_email_preserves_case() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "User@Example.COM");
    }
}
