//! Data models module
//!
//! This module contains the database-backed data structures.

pub mod session;
pub mod user;

// Re-export commonly used models
pub use session::{Session, UserStatistics};
pub use user::{CreateUserRequest, User};
