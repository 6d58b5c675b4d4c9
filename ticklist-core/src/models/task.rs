//! Task record and input shapes
//!
//! `NewTask` doubles as the create and full-replace payload; `TaskPatch`
//! carries per-field `Option`s for partial updates. Validation bounds live
//! on the input types as `validator` annotations so the store and the API
//! layer enforce the same rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A task item owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Id unique within the owning user's collection, sequential from 1.
    /// Ids are never reused, even after deletion.
    pub id: u64,

    /// Owning user id
    pub user_id: u64,

    /// Title, stored trimmed (1-100 characters)
    pub title: String,

    /// Optional free-form description (up to 500 characters)
    pub description: Option<String>,

    /// Optional due date, kept as an opaque string (not parsed as a date)
    pub due_date: Option<String>,

    /// Priority from 1 (most urgent) to 5
    pub priority: u8,

    /// Completion flag
    pub completed: bool,

    /// Set once at creation and preserved across replace/update
    pub created_at: DateTime<Utc>,
}

/// Input for creating or fully replacing a task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTask {
    /// Title (1-100 characters, must not be blank after trimming)
    #[validate(
        length(max = 100, message = "Title must be at most 100 characters"),
        custom(function = validate_title_not_blank)
    )]
    pub title: String,

    /// Optional description (up to 500 characters)
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    /// Optional due date string
    pub due_date: Option<String>,

    /// Priority 1-5, defaults to 3
    #[serde(default = "default_priority")]
    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: u8,

    /// Completion flag, defaults to false
    #[serde(default)]
    pub completed: bool,
}

/// Partial-update payload
///
/// Fields left out of the request body deserialize to `None` and are not
/// touched. An explicit JSON `null` also deserializes to `None`, so a null
/// field is skipped rather than cleared. That matches the established API
/// contract; consumers cannot clear a field through a partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(
        length(max = 100, message = "Title must be at most 100 characters"),
        custom(function = validate_title_not_blank)
    )]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub due_date: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: Option<u8>,

    pub completed: Option<bool>,
}

fn default_priority() -> u8 {
    3
}

/// Rejects titles that are empty or whitespace-only after trimming
fn validate_title_not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title_blank");
        err.message = Some("Title cannot be empty or just whitespace".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str, priority: u8) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
            due_date: None,
            priority,
            completed: false,
        }
    }

    #[test]
    fn test_valid_task_passes() {
        assert!(new_task("Buy milk", 3).validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(new_task("", 3).validate().is_err());
        assert!(new_task("   ", 3).validate().is_err());
    }

    #[test]
    fn test_title_length_bounds() {
        assert!(new_task(&"x".repeat(100), 3).validate().is_ok());
        assert!(new_task(&"x".repeat(101), 3).validate().is_err());
    }

    #[test]
    fn test_priority_bounds() {
        assert!(new_task("t", 1).validate().is_ok());
        assert!(new_task("t", 5).validate().is_ok());
        assert!(new_task("t", 0).validate().is_err());
        assert!(new_task("t", 6).validate().is_err());
    }

    #[test]
    fn test_description_length_bound() {
        let mut task = new_task("t", 3);
        task.description = Some("d".repeat(500));
        assert!(task.validate().is_ok());
        task.description = Some("d".repeat(501));
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_new_task_defaults_from_json() {
        let task: NewTask = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(task.priority, 3);
        assert!(!task.completed);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_patch_null_and_omitted_both_skip() {
        let omitted: TaskPatch = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        let explicit_null: TaskPatch =
            serde_json::from_str(r#"{"title": "New", "description": null}"#).unwrap();

        assert!(omitted.description.is_none());
        assert!(explicit_null.description.is_none());
    }

    #[test]
    fn test_patch_distinguishes_false_from_omitted() {
        let patch: TaskPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.completed.is_none());

        let patch: TaskPatch = serde_json::from_str(r#"{"completed": false}"#).unwrap();
        assert_eq!(patch.completed, Some(false));
    }
}
