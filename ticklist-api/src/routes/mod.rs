//! API route handlers organized by resource
//!
//! - `health`: Health probe
//! - `auth`: Register, login, logout, current-user profile
//! - `todos`: Task CRUD, partial update, and toggle

pub mod auth;
pub mod health;
pub mod todos;
