//! Homework records and status messages

use serde_json::Value;

use crate::domain::verdict::Verdict;
use crate::error::{Result, ValidationError};

/// A single submission as reported by the review API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub verdict: Verdict,
}

impl HomeworkRecord {
    /// Extracts a record from raw JSON
    ///
    /// Keys are checked in order: `homework_name`, then `status`, then the
    /// status value against the verdict table. A non-string name is rendered
    /// as JSON text; a non-string status is never in the table.
    pub fn from_value(homework: &Value) -> Result<Self> {
        let homework_name = field(homework, "homework_name")?;
        let status = field(homework, "status")?;
        let verdict = status
            .as_str()
            .and_then(Verdict::from_status)
            .ok_or_else(|| ValidationError::UndocumentedStatus(render(status)))?;

        Ok(Self {
            homework_name: render(homework_name),
            verdict,
        })
    }

    /// Chat message announcing this record's status
    pub fn status_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.verdict.description()
        )
    }
}

/// Builds the status message for a raw homework record
pub fn parse_status(homework: &Value) -> Result<String> {
    HomeworkRecord::from_value(homework).map(|record| record.status_message())
}

fn field<'a>(homework: &'a Value, key: &'static str) -> Result<&'a Value> {
    homework.get(key).ok_or(ValidationError::MissingKey(key))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status_for_each_verdict() {
        let cases = [
            ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ];

        for (status, verdict) in cases {
            let message = parse_status(&json!({"homework_name": "hw1", "status": status})).unwrap();
            assert_eq!(
                message,
                format!("Изменился статус проверки работы \"hw1\". {verdict}")
            );
        }
    }

    #[test]
    fn test_parse_status_rejects_unknown_status() {
        let err = parse_status(&json!({"homework_name": "hw1", "status": "lost"})).unwrap_err();
        assert_eq!(err, ValidationError::UndocumentedStatus("lost".to_string()));
        assert!(err.is_key_error());
    }

    #[test]
    fn test_parse_status_requires_homework_name() {
        let err = parse_status(&json!({"status": "approved", "lesson_name": "x"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingKey("homework_name"));
    }

    #[test]
    fn test_parse_status_requires_status() {
        let err = parse_status(&json!({"homework_name": "hw1", "reviewer_comment": "ok"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingKey("status"));
    }

    #[test]
    fn test_parse_status_non_string_status_is_undocumented() {
        let err = parse_status(&json!({"homework_name": "hw1", "status": 5})).unwrap_err();
        assert_eq!(err, ValidationError::UndocumentedStatus("5".to_string()));
        assert!(err.is_key_error());

        let err = parse_status(&json!({"homework_name": "hw1", "status": null})).unwrap_err();
        assert_eq!(err, ValidationError::UndocumentedStatus("null".to_string()));
        assert!(err.is_key_error());

        let err = parse_status(&json!({"homework_name": "hw1", "status": true})).unwrap_err();
        assert!(err.is_key_error());
    }

    #[test]
    fn test_parse_status_renders_non_string_name() {
        let message = parse_status(&json!({"homework_name": 7, "status": "approved"})).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"7\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_parse_status_on_non_object_record() {
        let err = parse_status(&json!("hw1")).unwrap_err();
        assert_eq!(err, ValidationError::MissingKey("homework_name"));
    }
}
