//! Task endpoints
//!
//! All handlers run behind the session-auth layer and read the acting
//! identity from request extensions, so every store call is already scoped
//! to the authenticated user. A task id belonging to another user is
//! indistinguishable from a missing one.
//!
//! # Endpoints
//!
//! - `POST /todos` - Create a task
//! - `GET /todos` - List the user's tasks
//! - `GET /todos/:id` - Get one task
//! - `PUT /todos/:id` - Replace all mutable fields
//! - `PATCH /todos/:id` - Partial update
//! - `PATCH /todos/:id/toggle` - Flip the completed flag
//! - `DELETE /todos/:id` - Delete a task

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use ticklist_core::models::{CurrentUser, NewTask, Task, TaskPatch};

use crate::{app::AppState, error::ApiResult};

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /todos
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "priority": 2
/// }
/// ```
///
/// Returns `201` with the stored record, including its assigned id and
/// `created_at`.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or missing token
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(input): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(current_user.id, input)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the user's tasks in insertion order
///
/// Callers needing chronological order should sort by `created_at`
/// themselves.
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list(current_user.id)))
}

/// Get a single task
///
/// # Errors
///
/// - `404 Not Found`: No such task in this user's scope
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(task_id): Path<u64>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get(current_user.id, task_id)?;

    Ok(Json(task))
}

/// Replace every mutable field of a task
///
/// The request body carries the full task shape (same as create);
/// `created_at` is preserved from the stored record.
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `422 Unprocessable Entity`: Validation failed, record unchanged
pub async fn replace_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(task_id): Path<u64>,
    Json(input): Json<NewTask>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.replace(current_user.id, task_id, input)?;

    Ok(Json(task))
}

/// Partially update a task
///
/// Only fields present in the body change. A field sent as explicit `null`
/// is skipped, not cleared.
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(task_id): Path<u64>,
    Json(patch): Json<TaskPatch>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.update(current_user.id, task_id, patch)?;

    Ok(Json(task))
}

/// Flip the completed flag
pub async fn toggle_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(task_id): Path<u64>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.toggle(current_user.id, task_id)?;

    Ok(Json(task))
}

/// Delete a task
///
/// Returns `204` with no body. The id is never reassigned.
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(task_id): Path<u64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(current_user.id, task_id)?;

    Ok(StatusCode::NO_CONTENT)
}
