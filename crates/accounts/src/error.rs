//! Account Operation Error Types
//!
//! Every failure an operation can report is a variant here; the dispatcher
//! returns them in the result's ordered error list instead of propagating
//! them to the caller. Only genuinely unexpected datastore failures travel
//! through the `Store` variant.

use thiserror::Error;

use crate::domain::validation::PasswordRule;

/// Result type for store-facing operations
pub type AccountResult<T> = Result<T, OperationError>;

/// Account operation error variants
#[derive(Debug, Error)]
pub enum OperationError {
    /// Malformed or unsupported request
    #[error("{0}")]
    InvalidInput(String),

    /// A required field is absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Email does not match the accepted shape
    #[error("Invalid email format")]
    InvalidEmailFormat,

    /// One password-strength rule was violated
    #[error("{0}")]
    WeakPassword(PasswordRule),

    /// Duplicate username or email
    #[error("{0}")]
    Conflict(&'static str),

    /// No row for the requested user id
    #[error("User not found")]
    NotFound,

    /// Privileged mutation without a verified administrator
    #[error("{0}")]
    AuthorizationDenied(&'static str),

    /// Wrong username or password (indistinguishable on purpose)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Account is deactivated
    #[error("Account is deactivated")]
    AccountInactive,

    /// Account is locked out (too many failed attempts or admin lock)
    #[error("Account is temporarily locked")]
    AccountLocked,

    /// Underlying datastore failure
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OperationError {
    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            OperationError::Store(e) => {
                tracing::error!(error = %e, "Account store error");
            }
            OperationError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            OperationError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            OperationError::AccountLocked => {
                tracing::warn!("Operation rejected on locked account");
            }
            OperationError::AuthorizationDenied(msg) => {
                tracing::warn!(message = %msg, "Privileged mutation denied");
            }
            _ => {
                tracing::debug!(error = %self, "Account operation error");
            }
        }
    }
}

/// Ordered error list produced by one operation.
///
/// Lets a single failure propagate with `?` while validation stages can
/// still report several violations at once.
#[derive(Debug, Default)]
pub struct ErrorList(Vec<OperationError>);

impl ErrorList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: OperationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<OperationError> {
        self.0
    }
}

impl From<OperationError> for ErrorList {
    fn from(error: OperationError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<OperationError>> for ErrorList {
    fn from(errors: Vec<OperationError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<OperationError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = OperationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
