//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{MedBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_openai_config(&settings.openai)?;
    validate_catalog_config(&settings.catalog)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(MedBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(MedBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(MedBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(MedBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate OpenAI configuration
fn validate_openai_config(config: &super::OpenAiConfig) -> Result<()> {
    if config.api_key.is_empty() {
        return Err(MedBuddyError::Config(
            "OpenAI API key is required".to_string()
        ));
    }

    if config.api_base.is_empty() {
        return Err(MedBuddyError::Config(
            "OpenAI API base URL is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(MedBuddyError::Config(
            "OpenAI timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate scenario catalog configuration
fn validate_catalog_config(config: &super::CatalogConfig) -> Result<()> {
    if config.path.is_empty() {
        return Err(MedBuddyError::Config(
            "Scenario catalog path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MedBuddyError::Config(
            "Logging level is required".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "123456:test-token".to_string();
        settings.openai.api_key = "sk-test".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_bot_token_fails() {
        let mut settings = valid_settings();
        settings.bot.token = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_connection_bounds_fail() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let mut settings = valid_settings();
        settings.openai.api_key = String::new();
        assert!(validate_settings(&settings).is_err());
    }
}
