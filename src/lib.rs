//! MedBuddy Telegram Bot
//!
//! A Telegram bot for medical diagnosis training. Users interview a simulated
//! patient, then submit a free-text diagnosis that is scored against the
//! scenario's known answer. This library provides modular components for the
//! scenario catalog, conversation tracking, diagnosis evaluation, and the
//! OpenAI-backed patient simulation.

#![allow(non_snake_case)]

pub mod catalog;
pub mod config;
pub mod database;
pub mod dialog;
pub mod evaluation;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MedBuddyError, Result};

// Re-export main components for easy access
pub use catalog::{Difficulty, Scenario, ScenarioCatalog};
pub use database::DatabaseService;
pub use dialog::DialogService;
pub use evaluation::{MatchResult, MatchTier};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
