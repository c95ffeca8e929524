//! Error handling for MedBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for MedBuddy application
#[derive(Error, Debug)]
pub enum MedBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Telegram download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("OpenAI API error: {0}")]
    OpenAi(#[from] OpenAiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("No scenario available for difficulty: {difficulty}")]
    NoScenarioAvailable { difficulty: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// OpenAI API specific errors
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("OpenAI request failed: {0}")]
    RequestFailed(String),

    #[error("OpenAI returned an empty response")]
    EmptyResponse,

    #[error("Voice transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),
}

/// Result type alias for MedBuddy operations
pub type Result<T> = std::result::Result<T, MedBuddyError>;

/// Result type alias for OpenAI operations
pub type OpenAiResult<T> = std::result::Result<T, OpenAiError>;

impl MedBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MedBuddyError::Database(_) => false,
            MedBuddyError::Migration(_) => false,
            MedBuddyError::Telegram(_) => true,
            MedBuddyError::Download(_) => true,
            MedBuddyError::OpenAi(_) => true,
            MedBuddyError::Config(_) => false,
            MedBuddyError::UserNotFound { .. } => false,
            MedBuddyError::NoScenarioAvailable { .. } => false,
            MedBuddyError::Http(_) => true,
            MedBuddyError::Serialization(_) => false,
            MedBuddyError::Io(_) => true,
            MedBuddyError::InvalidInput(_) => false,
            MedBuddyError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MedBuddyError::Database(_) => ErrorSeverity::Critical,
            MedBuddyError::Migration(_) => ErrorSeverity::Critical,
            MedBuddyError::Config(_) => ErrorSeverity::Critical,
            MedBuddyError::NoScenarioAvailable { .. } => ErrorSeverity::Warning,
            MedBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
