//! # Ticklist Core Library
//!
//! This crate contains the request-handling core of the ticklist service:
//! session-based authentication and per-user task collections. All state is
//! held in process memory and is lost on restart.
//!
//! ## Module Organization
//!
//! - `models`: User, session, and task data structures
//! - `auth`: Password hashing and session token generation
//! - `identity`: User records and session tokens (the Identity Manager)
//! - `store`: Per-user task collections (the Task Store)

pub mod auth;
pub mod identity;
pub mod models;
pub mod store;

/// Current version of the ticklist core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
