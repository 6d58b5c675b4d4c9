//! Task Store: per-user task collections
//!
//! Every operation is scoped to a user id that the caller must have
//! resolved through the identity manager first; no operation can see or
//! touch another user's tasks, and a task id that exists only in another
//! user's scope reads as not found.
//!
//! Each user scope pairs its task map with its own id counter, and both sit
//! under the store lock so "read counter, assign, increment" is atomic even
//! with concurrent creates for the same user. Deleted ids are never handed
//! out again.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use parking_lot::RwLock;
use validator::Validate;

use crate::models::{NewTask, Task, TaskPatch};

/// Errors produced by task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// No task with this id in the acting user's scope
    #[error("Task with id {0} not found")]
    NotFound(u64),

    /// A field failed validation; the record is left untouched
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },
}

/// One user's tasks plus their private id counter
#[derive(Debug)]
struct UserScope {
    /// Next task id for this user, independent of every other user
    next_id: u64,

    /// Tasks keyed by id. Ids are monotonic and never reused, so key order
    /// equals insertion order.
    tasks: BTreeMap<u64, Task>,
}

impl UserScope {
    fn new() -> Self {
        Self {
            next_id: 1,
            tasks: BTreeMap::new(),
        }
    }
}

/// Owner of all per-user task collections
///
/// Scopes are created eagerly via [`TaskStore::init_scope`] at registration
/// and lazily on first use for any user id the store has not seen.
#[derive(Debug, Default)]
pub struct TaskStore {
    scopes: RwLock<HashMap<u64, UserScope>>,
}

impl TaskStore {
    /// Creates an empty task store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope for a user id
    ///
    /// Called on registration. Harmless if the scope already exists.
    pub fn init_scope(&self, user_id: u64) {
        self.scopes
            .write()
            .entry(user_id)
            .or_insert_with(UserScope::new);
    }

    /// Creates a task in the user's scope and returns the stored record
    ///
    /// The title is stored trimmed. Validation happens before the id is
    /// assigned, so a rejected create consumes nothing.
    pub fn create(&self, user_id: u64, input: NewTask) -> Result<Task, TaskError> {
        validate_input(&input)?;

        let mut scopes = self.scopes.write();
        let scope = scopes.entry(user_id).or_insert_with(UserScope::new);

        let id = scope.next_id;
        scope.next_id += 1;

        let task = Task {
            id,
            user_id,
            title: input.title.trim().to_string(),
            description: input.description,
            due_date: input.due_date,
            priority: input.priority,
            completed: input.completed,
            created_at: Utc::now(),
        };

        scope.tasks.insert(id, task.clone());

        tracing::debug!(user_id, task_id = id, "created task");

        Ok(task)
    }

    /// Returns all of the user's tasks in insertion order
    pub fn list(&self, user_id: u64) -> Vec<Task> {
        self.scopes
            .read()
            .get(&user_id)
            .map(|scope| scope.tasks.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns a single task by id
    pub fn get(&self, user_id: u64, task_id: u64) -> Result<Task, TaskError> {
        self.scopes
            .read()
            .get(&user_id)
            .and_then(|scope| scope.tasks.get(&task_id))
            .cloned()
            .ok_or(TaskError::NotFound(task_id))
    }

    /// Overwrites every mutable field of an existing task
    ///
    /// `id`, `user_id`, and `created_at` are preserved from the stored
    /// record. Full creation-time validation applies to the new values.
    pub fn replace(&self, user_id: u64, task_id: u64, input: NewTask) -> Result<Task, TaskError> {
        validate_input(&input)?;

        let mut scopes = self.scopes.write();
        let task = scopes
            .get_mut(&user_id)
            .and_then(|scope| scope.tasks.get_mut(&task_id))
            .ok_or(TaskError::NotFound(task_id))?;

        task.title = input.title.trim().to_string();
        task.description = input.description;
        task.due_date = input.due_date;
        task.priority = input.priority;
        task.completed = input.completed;

        Ok(task.clone())
    }

    /// Applies a partial update
    ///
    /// Only fields present in the patch change; absent fields (including
    /// fields the client sent as explicit null) are left as they are.
    /// Validation runs on the patch before anything is written, so a failed
    /// update never partially applies.
    pub fn update(&self, user_id: u64, task_id: u64, patch: TaskPatch) -> Result<Task, TaskError> {
        validate_patch(&patch)?;

        let mut scopes = self.scopes.write();
        let task = scopes
            .get_mut(&user_id)
            .and_then(|scope| scope.tasks.get_mut(&task_id))
            .ok_or(TaskError::NotFound(task_id))?;

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }

        Ok(task.clone())
    }

    /// Flips the task's completion flag
    pub fn toggle(&self, user_id: u64, task_id: u64) -> Result<Task, TaskError> {
        let mut scopes = self.scopes.write();
        let task = scopes
            .get_mut(&user_id)
            .and_then(|scope| scope.tasks.get_mut(&task_id))
            .ok_or(TaskError::NotFound(task_id))?;

        task.completed = !task.completed;

        Ok(task.clone())
    }

    /// Deletes a task
    ///
    /// The id is retired permanently; the scope's counter never moves
    /// backwards.
    pub fn delete(&self, user_id: u64, task_id: u64) -> Result<(), TaskError> {
        let mut scopes = self.scopes.write();
        let scope = scopes.get_mut(&user_id).ok_or(TaskError::NotFound(task_id))?;

        scope
            .tasks
            .remove(&task_id)
            .map(|_| ())
            .ok_or(TaskError::NotFound(task_id))
    }
}

fn validate_input(input: &NewTask) -> Result<(), TaskError> {
    input.validate().map_err(into_task_error)
}

fn validate_patch(patch: &TaskPatch) -> Result<(), TaskError> {
    patch.validate().map_err(into_task_error)
}

/// Flattens validator's per-field error map into the first failing field
fn into_task_error(errors: validator::ValidationErrors) -> TaskError {
    for (field, field_errors) in errors.field_errors() {
        if let Some(error) = field_errors.first() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());

            return TaskError::Validation {
                field: field.to_string(),
                message,
            };
        }
    }

    TaskError::Validation {
        field: "input".to_string(),
        message: "Validation failed".to_string(),
    }
}
