//! Operation Results
//!
//! One immutable result value per dispatcher call.

use serde::Serialize;

use crate::domain::value_object::user_id::UserId;
use crate::error::OperationError;

/// Payload carried by a successful operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationData {
    /// Id assigned to a newly created account
    Created { user_id: UserId },
    /// Identity of a successfully authenticated account
    Identity {
        user_id: UserId,
        username: String,
        email: String,
    },
}

/// Outcome of one dispatcher call. Constructed once, returned by value.
#[derive(Debug)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    pub data: Option<OperationData>,
    /// Domain errors in the order they were detected
    pub errors: Vec<OperationError>,
}

impl OperationResult {
    pub(crate) fn succeeded(message: impl Into<String>, data: Option<OperationData>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            errors: Vec::new(),
        }
    }

    pub(crate) fn failed(errors: Vec<OperationError>) -> Self {
        Self {
            success: false,
            message: String::new(),
            data: None,
            errors,
        }
    }

    /// Error messages in report order
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Use-case outcome before the dispatcher settles the transaction.
///
/// A non-empty `errors` list marks a rejection whose state changes still
/// commit (failed-authentication bookkeeping); use-case `Err` values roll
/// the transaction back instead.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub message: String,
    pub data: Option<OperationData>,
    pub errors: Vec<OperationError>,
}

impl Outcome {
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            errors: Vec::new(),
        }
    }

    pub(crate) fn with_data(message: impl Into<String>, data: OperationData) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub(crate) fn rejected(error: OperationError) -> Self {
        Self {
            message: String::new(),
            data: None,
            errors: vec![error],
        }
    }
}
