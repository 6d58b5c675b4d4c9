//! Authentication endpoints
//!
//! - `POST /register` - Create an account and get a session token
//! - `POST /login` - Exchange credentials for a fresh session token
//! - `POST /logout` - Drop the current session (idempotent)
//! - `GET /me` - Profile of the authenticated user

use axum::{extract::State, http::HeaderMap, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ticklist_core::models::{CurrentUser, UserProfile};

use crate::{
    app::{bearer_token, AppState},
    error::ApiResult,
};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (unique, case-sensitive)
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Session token payload returned by register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque session token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

impl TokenResponse {
    fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Logout response
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Register a new user
///
/// Creates the account, initializes an empty task scope for it, and returns
/// a session token. The state this creates lives only in process memory.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret1"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Username already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    let session = state
        .identity
        .register(&req.username, &req.email, &req.password)?;

    // The identity manager has no task-store dependency; scope
    // initialization for the new user happens here at the boundary.
    state.tasks.init_scope(session.user_id);

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::bearer(session.token)),
    ))
}

/// Login and mint a fresh session token
///
/// Earlier sessions for the same user stay valid. Unknown username and
/// wrong password produce the same `401` body.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "secret1"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let session = state.identity.login(&req.username, &req.password)?;

    Ok(Json(TokenResponse::bearer(session.token)))
}

/// Logout the current session
///
/// Parses the bearer header itself rather than going through the auth
/// middleware: a token that is already invalid still logs out successfully.
///
/// # Endpoint
///
/// ```text
/// POST /logout
/// Authorization: Bearer <token>
/// ```
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<LogoutResponse>> {
    let token = bearer_token(&headers)?;
    state.identity.logout(token);

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Current user profile
///
/// # Endpoint
///
/// ```text
/// GET /me
/// Authorization: Bearer <token>
/// ```
///
/// Response:
/// ```json
/// {
///   "id": 1,
///   "username": "alice",
///   "email": "alice@example.com",
///   "created_at": "2026-08-29T12:00:00Z"
/// }
/// ```
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.identity.profile(current_user.id)?;

    Ok(Json(profile))
}
