//! Session token generation
//!
//! Tokens are 32 bytes drawn from the operating system's CSPRNG and
//! hex-encoded, giving 256 bits of entropy in a 64-character string. They
//! carry no structure; possession of the string is the whole credential.

use rand::{rngs::OsRng, RngCore};

/// Number of random bytes per token
const TOKEN_BYTES: usize = 32;

/// Length of a hex-encoded session token in characters
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Generates a new session token
///
/// # Example
///
/// ```
/// use ticklist_core::auth::token::{generate_token, TOKEN_LENGTH};
///
/// let token = generate_token();
/// assert_eq!(token.len(), TOKEN_LENGTH);
/// assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
