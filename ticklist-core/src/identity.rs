//! Identity Manager: user records and session tokens
//!
//! Owns the user table, the session table, and the global user-id counter.
//! All three live behind a single lock because registration mutates them
//! together. The manager has no dependency on the task store; callers pass
//! the resolved identity into task operations themselves.
//!
//! Sessions have no expiry: a token stays valid until an explicit logout.
//! Multiple concurrent sessions per user are allowed, and logging in never
//! invalidates earlier tokens.
//!
//! # Example
//!
//! ```
//! use ticklist_core::identity::IdentityManager;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = IdentityManager::new();
//! let session = identity.register("alice", "alice@example.com", "secret1")?;
//! let current = identity.resolve(&session.token)?;
//! assert_eq!(current.username, "alice");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::auth::{password, token};
use crate::models::{CurrentUser, Session, User, UserProfile};

/// Errors produced by identity operations
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Registration with a username that already exists
    #[error("Username already exists")]
    DuplicateUsername,

    /// Login with an unknown username or wrong password
    ///
    /// One variant for both cases so the response never reveals which
    /// field was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Token not present in the session table, or bound to a missing user
    #[error("Invalid or expired token")]
    Unauthorized,

    /// Profile lookup for an unknown user id
    #[error("User {0} not found")]
    UserNotFound(u64),

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] password::PasswordError),
}

/// The tables guarded by the identity lock
#[derive(Debug, Default)]
struct IdentityTables {
    /// User records keyed by username
    users: HashMap<String, User>,

    /// Session token to user id
    sessions: HashMap<String, u64>,

    /// Next global user id
    next_user_id: u64,
}

/// Owner of all user and session state
///
/// Safe to share across request handlers via `Arc`; every operation takes
/// the internal lock for its full duration, so reads and id assignment are
/// atomic with respect to each other.
#[derive(Debug)]
pub struct IdentityManager {
    inner: RwLock<IdentityTables>,
}

impl IdentityManager {
    /// Creates an empty identity manager
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(IdentityTables {
                users: HashMap::new(),
                sessions: HashMap::new(),
                next_user_id: 1,
            }),
        }
    }

    /// Registers a new user and mints their first session
    ///
    /// Fails with [`IdentityError::DuplicateUsername`] on an exact-match
    /// username collision. The password is hashed before the lock is taken;
    /// Argon2 is slow by design and must not serialize unrelated requests.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        let password_hash = password::hash_password(password)?;

        let mut tables = self.inner.write();

        if tables.users.contains_key(username) {
            return Err(IdentityError::DuplicateUsername);
        }

        let user_id = tables.next_user_id;
        tables.next_user_id += 1;

        tables.users.insert(
            username.to_string(),
            User {
                id: user_id,
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                created_at: Utc::now(),
            },
        );

        let token = token::generate_token();
        tables.sessions.insert(token.clone(), user_id);

        tracing::info!(user_id, username, "registered new user");

        Ok(Session { token, user_id })
    }

    /// Authenticates a user and mints a fresh session
    ///
    /// Unknown username and wrong password both return
    /// [`IdentityError::InvalidCredentials`].
    pub fn login(&self, username: &str, password: &str) -> Result<Session, IdentityError> {
        // Clone the hash out so verification runs outside the lock.
        let (user_id, password_hash) = {
            let tables = self.inner.read();
            let user = tables
                .users
                .get(username)
                .ok_or(IdentityError::InvalidCredentials)?;
            (user.id, user.password_hash.clone())
        };

        if !password::verify_password(password, &password_hash)? {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = token::generate_token();
        self.inner.write().sessions.insert(token.clone(), user_id);

        tracing::debug!(user_id, "login succeeded");

        Ok(Session { token, user_id })
    }

    /// Removes a session
    ///
    /// Idempotent: logging out a token that was never issued, or was already
    /// logged out, is a successful no-op.
    pub fn logout(&self, token: &str) {
        self.inner.write().sessions.remove(token);
    }

    /// Resolves a bearer token to the identity it was issued for
    ///
    /// Also rejects tokens whose user id is missing from the user table.
    /// Users are never deleted, so that branch should be unreachable, but a
    /// dangling session must not authenticate.
    pub fn resolve(&self, token: &str) -> Result<CurrentUser, IdentityError> {
        let tables = self.inner.read();

        let user_id = *tables
            .sessions
            .get(token)
            .ok_or(IdentityError::Unauthorized)?;

        let user = tables
            .users
            .values()
            .find(|u| u.id == user_id)
            .ok_or(IdentityError::Unauthorized)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username.clone(),
        })
    }

    /// Returns the public profile for a user id
    pub fn profile(&self, user_id: u64) -> Result<UserProfile, IdentityError> {
        let tables = self.inner.read();

        tables
            .users
            .values()
            .find(|u| u.id == user_id)
            .map(UserProfile::from)
            .ok_or(IdentityError::UserNotFound(user_id))
    }
}

impl Default for IdentityManager {
    fn default() -> Self {
        Self::new()
    }
}
