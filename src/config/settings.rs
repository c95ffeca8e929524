//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub openai: OpenAiConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub webhook_url: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub tts_model: String,
    pub timeout_seconds: u64,
}

/// Scenario catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("MEDBUDDY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::MedBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                webhook_url: None,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/medbuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            openai: OpenAiConfig {
                api_key: String::new(),
                api_base: "https://api.openai.com/v1".to_string(),
                chat_model: "gpt-4o-mini".to_string(),
                transcription_model: "whisper-1".to_string(),
                tts_model: "tts-1".to_string(),
                timeout_seconds: 60,
            },
            catalog: CatalogConfig {
                path: "data/medical_scenarios.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/medbuddy".to_string(),
            },
        }
    }
}
