//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::shared::Secret;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// JWT configuration for the admin API
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret,
}

/// Twilio WhatsApp configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: Secret,
    /// Sender number used when a reply has no author number
    pub phone_number: String,
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,
    /// Public URL of `/webhook/status`, passed to Twilio with every message
    #[serde(default)]
    pub status_callback_url: Option<String>,
}

/// Language model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub api_key: Secret,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

/// Book fan-out configuration (timeouts in seconds)
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    pub max_concurrent_books: usize,
    pub response_timeout: u64,
    pub aggregation_timeout: u64,
    #[serde(default)]
    pub default_author: Option<String>,
}

impl ProcessingConfig {
    #[must_use]
    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout)
    }

    #[must_use]
    pub fn aggregation_timeout(&self) -> Duration {
        Duration::from_secs(self.aggregation_timeout)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub twilio: TwilioConfig,
    pub llm: LlmConfig,
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed, a required key is
    /// missing or the resulting values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        let config: Self = Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__TWILIO__AUTH_TOKEN)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the type system cannot
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_concurrent_books == 0 {
            return Err(ConfigError::Message(
                "processing.max_concurrent_books must be at least 1".into(),
            ));
        }
        if self.jwt.secret.len() < 32 {
            return Err(ConfigError::Message(
                "jwt.secret must be at least 32 characters".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Message(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}
