//! Field Validation Rules
//!
//! Pure checks over candidate field sets. Presence and password strength
//! accumulate every violation before returning; email shape lives with the
//! [`Email`](crate::domain::value_object::email::Email) value object.

use serde_json::{Map, Value};
use thiserror::Error;

/// Fields a create request must carry
pub const REQUIRED_CREATE_FIELDS: [&str; 3] = ["username", "email", "password"];

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as the required special character
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// One strength rule a candidate password failed to satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordRule {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must contain at least one uppercase letter")]
    NoUppercase,

    #[error("Password must contain at least one lowercase letter")]
    NoLowercase,

    #[error("Password must contain at least one number")]
    NoDigit,

    #[error("Password must contain at least one special character")]
    NoSpecialChar,
}

/// Required keys that are absent, empty, or not a string, in declaration
/// order. Checks every key before returning so the caller can surface all
/// of them at once.
pub fn missing_fields(
    fields: &Map<String, Value>,
    required: &[&'static str],
) -> Vec<&'static str> {
    required
        .iter()
        .filter(|key| {
            fields
                .get(**key)
                .and_then(Value::as_str)
                .is_none_or(str::is_empty)
        })
        .copied()
        .collect()
}

/// Every strength rule the candidate password violates.
pub fn password_violations(password: &str) -> Vec<PasswordRule> {
    let mut violations = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PasswordRule::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordRule::NoUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordRule::NoLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordRule::NoDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        violations.push(PasswordRule::NoSpecialChar);
    }
    violations
}
