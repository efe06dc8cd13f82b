//! Profile Data Value Object
//!
//! Opaque structured attributes attached to an account, stored serialized
//! as text. The directory never interprets the contents.

use serde_json::Value;

/// Opaque profile attribute map
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData(Value);

impl ProfileData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Empty attribute map
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// Serialize for database storage
    pub fn to_text(&self) -> String {
        self.0.to_string()
    }

    /// Deserialize from the stored text form
    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for ProfileData {
    fn default() -> Self {
        Self::empty()
    }
}
