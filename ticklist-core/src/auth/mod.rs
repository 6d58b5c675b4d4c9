//! Authentication primitives
//!
//! - [`password`]: Argon2id password hashing and verification
//! - [`token`]: Opaque session token generation
//!
//! Session tokens are random credentials, not signed claims: the identity
//! manager keeps a server-side table from token to user id, and a token is
//! valid exactly as long as that entry exists.

pub mod password;
pub mod token;
