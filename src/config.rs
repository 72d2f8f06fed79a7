//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_MAX_EVENTS_PER_STUDENT,
    DEFAULT_MAX_MARKS_PER_JUDGE, DEFAULT_MIN_MARKS_FOR_PRIZE, DEFAULT_NUMBER_OF_JUDGES,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub judging: JudgingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Values seeded into a freshly created database
#[derive(Debug, Clone)]
pub struct JudgingConfig {
    pub number_of_judges: u32,
    pub max_marks_per_judge: u32,
    pub min_marks_for_prize: u32,
    pub max_events_per_student: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            judging: JudgingConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
        })
    }
}

impl JudgingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            number_of_judges: parse_var("DEFAULT_NUMBER_OF_JUDGES", DEFAULT_NUMBER_OF_JUDGES)?,
            max_marks_per_judge: parse_var(
                "DEFAULT_MAX_MARKS_PER_JUDGE",
                DEFAULT_MAX_MARKS_PER_JUDGE,
            )?,
            min_marks_for_prize: parse_var(
                "DEFAULT_MIN_MARKS_FOR_PRIZE",
                DEFAULT_MIN_MARKS_FOR_PRIZE,
            )?,
            max_events_per_student: parse_var(
                "DEFAULT_MAX_EVENTS_PER_STUDENT",
                DEFAULT_MAX_EVENTS_PER_STUDENT,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_judges == 0 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_NUMBER_OF_JUDGES".to_string(),
            ));
        }
        if self.max_marks_per_judge == 0 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_MAX_MARKS_PER_JUDGE".to_string(),
            ));
        }
        if self.min_marks_for_prize > self.number_of_judges.saturating_mul(self.max_marks_per_judge) {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_MIN_MARKS_FOR_PRIZE".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for JudgingConfig {
    fn default() -> Self {
        Self {
            number_of_judges: DEFAULT_NUMBER_OF_JUDGES,
            max_marks_per_judge: DEFAULT_MAX_MARKS_PER_JUDGE,
            min_marks_for_prize: DEFAULT_MIN_MARKS_FOR_PRIZE,
            max_events_per_student: DEFAULT_MAX_EVENTS_PER_STUDENT,
        }
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
