//! Review API response shape

use serde_json::Value;

use crate::error::{Result, ValidationError, json_type_name};

/// A review API response whose top-level shape has been checked
///
/// Individual homework records are kept as raw JSON; they are only
/// inspected when a status message is extracted from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResponse {
    /// Submission records, newest first
    pub homeworks: Vec<Value>,
    /// Server time to use as the next cursor
    pub current_date: Option<i64>,
}

impl ReviewResponse {
    /// The newest submission, if the poll returned any
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }

    /// Reads `current_date` from an unvalidated response
    ///
    /// Anything other than an integer under an object's `current_date` key
    /// yields `None`.
    pub fn current_date_of(response: &Value) -> Option<i64> {
        response.get("current_date").and_then(Value::as_i64)
    }
}

/// Checks that a decoded response is an object with a `homeworks` array
pub fn check_response(response: &Value) -> Result<ReviewResponse> {
    let object = response.as_object().ok_or(ValidationError::NotAnObject {
        found: json_type_name(response),
    })?;

    let homeworks = match object.get("homeworks") {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            return Err(ValidationError::HomeworksNotAList {
                found: json_type_name(other),
            });
        }
        None => return Err(ValidationError::HomeworksNotAList { found: "nothing" }),
    };

    Ok(ReviewResponse {
        homeworks,
        current_date: ReviewResponse::current_date_of(response),
    })
}
