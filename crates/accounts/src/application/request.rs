//! Operation Requests
//!
//! The operation kinds the dispatcher accepts, plus helpers for reading
//! the request's field map. Which keys are recognized depends on the kind;
//! unrecognized keys are ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::OperationError;

/// Field map carried by one operation request
pub type FieldMap = Map<String, Value>;

/// Operation kinds accepted by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
    Authenticate,
    ResetPassword,
    LockAccount,
    UnlockAccount,
}

impl OperationKind {
    pub const fn name(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::Authenticate => "authenticate",
            OperationKind::ResetPassword => "reset_password",
            OperationKind::LockAccount => "lock_account",
            OperationKind::UnlockAccount => "unlock_account",
        }
    }
}

impl FromStr for OperationKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(OperationKind::Create),
            "update" => Ok(OperationKind::Update),
            "delete" => Ok(OperationKind::Delete),
            "authenticate" => Ok(OperationKind::Authenticate),
            "reset_password" => Ok(OperationKind::ResetPassword),
            "lock_account" => Ok(OperationKind::LockAccount),
            "unlock_account" => Ok(OperationKind::UnlockAccount),
            _ => Err(OperationError::InvalidInput(
                "Invalid operation type".to_string(),
            )),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-empty string field
pub fn str_field<'a>(fields: &'a FieldMap, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Integer field
pub fn int_field(fields: &FieldMap, key: &str) -> Option<i64> {
    fields.get(key).and_then(Value::as_i64)
}

/// Boolean field
pub fn bool_field(fields: &FieldMap, key: &str) -> Option<bool> {
    fields.get(key).and_then(Value::as_bool)
}
