//! Data structures shared between the identity manager and the task store
//!
//! - `user`: User accounts, sessions, and profile views
//! - `task`: Task records plus the create/patch input shapes

pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskPatch};
pub use user::{CurrentUser, Session, User, UserProfile};
