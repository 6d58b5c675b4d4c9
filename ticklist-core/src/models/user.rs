//! User account and session types
//!
//! Users are created once at registration and never mutated or deleted.
//! Sessions map an opaque bearer token to a user id; a user may hold any
//! number of concurrent sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user account
///
/// Passwords are stored as Argon2id PHC hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id, assigned from a global monotonic counter starting at 1
    pub id: u64,

    /// Username (unique, case-sensitive, 3-50 characters)
    pub username: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash in PHC string format
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// A freshly minted session
///
/// Returned by register and login. The token is the only credential the
/// client holds; the user id lets the caller initialize per-user state
/// without another resolve round-trip.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token (64 hex characters)
    pub token: String,

    /// Id of the user the token is bound to
    pub user_id: u64,
}

/// The identity a resolved token maps to
///
/// Injected into request extensions by the API layer's auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user id
    pub id: u64,

    /// Username of the authenticated user
    pub username: String,
}

/// Public profile view of a user account
///
/// Everything in the user record except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}
