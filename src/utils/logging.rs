//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the MedBuddy application.

use tracing::{info, warn, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "medbuddy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log the outcome of a diagnosis submission
pub fn log_diagnosis_result(user_id: i64, scenario_id: &str, tier: &str, questions_asked: usize) {
    info!(
        user_id = user_id,
        scenario_id = scenario_id,
        tier = tier,
        questions_asked = questions_asked,
        "Diagnosis evaluated"
    );
}

/// Log voice pipeline steps
pub fn log_voice_step(user_id: i64, step: &str, success: bool) {
    if success {
        debug!(user_id = user_id, step = step, "Voice pipeline step completed");
    } else {
        warn!(user_id = user_id, step = step, "Voice pipeline step failed");
    }
}
