//! Database repositories module
//!
//! This module contains data access repositories for the database tables.

pub mod session;
pub mod user;

pub use session::SessionRepository;
pub use user::UserRepository;
