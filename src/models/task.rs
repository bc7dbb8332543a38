use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref TIME_REGEX: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
}

/// Input structure for creating or editing a task, as posted by the task
/// form. The time field is genuinely optional; a blank value is treated the
/// same as an absent one.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    /// The task text. Unique across the whole store.
    #[validate(length(min = 1, max = 250))]
    pub text: String,

    /// The due date, `YYYY-MM-DD`.
    #[validate(regex(path = "DATE_REGEX", message = "Date must be YYYY-MM-DD"))]
    pub date: String,

    /// Optional time of day, `HH:MM`. Absent or blank means the task is due
    /// by the end of its date.
    #[validate(custom = "validate_time_part")]
    pub time: Option<String>,
}

impl TaskInput {
    /// The time component, with blank form values normalized away.
    pub fn time_part(&self) -> Option<&str> {
        self.time.as_deref().filter(|time| !time.is_empty())
    }
}

fn validate_time_part(time: &str) -> Result<(), ValidationError> {
    if time.is_empty() || TIME_REGEX.is_match(time) {
        Ok(())
    } else {
        Err(ValidationError::new("time_format"))
    }
}

/// A task as stored and as returned in render payloads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub text: String,
    /// `"YYYY-MM-DD"` or `"YYYY-MM-DD HH:MM"`.
    pub due: Option<String>,
    pub done: bool,
    /// Derived from `(due, now)` by the recompute pass; consistent with the
    /// current time immediately after every task-list read.
    pub overdue: bool,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_validation() {
        let valid = TaskInput {
            text: "Water the plants".to_string(),
            date: "2024-01-01".to_string(),
            time: Some("10:00".to_string()),
        };
        assert!(valid.validate().is_ok());

        let no_time = TaskInput {
            text: "Water the plants".to_string(),
            date: "2024-01-01".to_string(),
            time: None,
        };
        assert!(no_time.validate().is_ok());

        let blank_time = TaskInput {
            text: "Water the plants".to_string(),
            date: "2024-01-01".to_string(),
            time: Some("".to_string()),
        };
        assert!(blank_time.validate().is_ok());

        let empty_text = TaskInput {
            text: "".to_string(),
            date: "2024-01-01".to_string(),
            time: None,
        };
        assert!(empty_text.validate().is_err());

        let bad_date = TaskInput {
            text: "Water the plants".to_string(),
            date: "January 1st".to_string(),
            time: None,
        };
        assert!(bad_date.validate().is_err());

        let bad_time = TaskInput {
            text: "Water the plants".to_string(),
            date: "2024-01-01".to_string(),
            time: Some("noonish".to_string()),
        };
        assert!(bad_time.validate().is_err());
    }

    #[test]
    fn test_time_part_normalizes_blank_values() {
        let input = TaskInput {
            text: "t".to_string(),
            date: "2024-01-01".to_string(),
            time: Some("".to_string()),
        };
        assert_eq!(input.time_part(), None);

        let input = TaskInput {
            text: "t".to_string(),
            date: "2024-01-01".to_string(),
            time: Some("10:00".to_string()),
        };
        assert_eq!(input.time_part(), Some("10:00"));
    }
}
