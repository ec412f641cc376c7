//! Validation errors for review API payloads

use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while checking a review API response
///
/// Variants fall into two kinds: shape errors (the response or its
/// `homeworks` has the wrong JSON type) and key errors (a record field is
/// missing or holds an undocumented value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The response body is not a JSON object
    #[error("unexpected response type: expected an object, got {found}")]
    NotAnObject { found: &'static str },

    /// `homeworks` is missing or is not a JSON array
    #[error("unexpected type of \"homeworks\": expected an array, got {found}")]
    HomeworksNotAList { found: &'static str },

    /// A homework record lacks a required key
    #[error("key \"{0}\" is missing from the homework record")]
    MissingKey(&'static str),

    /// The status is not one of the documented verdicts
    #[error("undocumented homework status \"{0}\"")]
    UndocumentedStatus(String),
}

impl ValidationError {
    /// Check if this error describes a value of the wrong type
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::NotAnObject { .. } | Self::HomeworksNotAList { .. }
        )
    }

    /// Check if this error describes a missing or unrecognised field
    pub fn is_key_error(&self) -> bool {
        matches!(self, Self::MissingKey(_) | Self::UndocumentedStatus(_))
    }
}

/// Human-readable JSON type name used in error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
