//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/default.toml, config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Upper bound for `monitoring.stats_update_delay_seconds` (ten years)
pub const MAX_STATS_UPDATE_DELAY_SECONDS: i64 = 10 * 365 * 86_400;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub monitoring: MonitoringConfig,
    pub logging: LoggingConfig,
}

/// Database configuration (SQLite only)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: PathBuf,
    /// Maximum pooled connections (default: 5)
    pub max_connections: u32,
}

/// Monitoring job settings
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Delay before an account's stats are refreshed again (default: 86400)
    pub stats_update_delay_seconds: i64,
}

impl MonitoringConfig {
    /// Configured delay, clamped to `0..=MAX_STATS_UPDATE_DELAY_SECONDS`
    pub fn stats_update_delay(&self) -> chrono::Duration {
        chrono::Duration::seconds(
            self.stats_update_delay_seconds
                .clamp(0, MAX_STATS_UPDATE_DELAY_SECONDS),
        )
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (SOCIALWATCH__*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("database.max_connections", 5)?
            .set_default("monitoring.stats_update_delay_seconds", 86400)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (SOCIALWATCH__*)
            .add_source(
                Environment::with_prefix("SOCIALWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.database.max_connections == 0 {
            return Err(crate::error::AppError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.monitoring.stats_update_delay_seconds <= 0 {
            return Err(crate::error::AppError::Config(
                "monitoring.stats_update_delay_seconds must be greater than 0".to_string(),
            ));
        }

        if self.monitoring.stats_update_delay_seconds > MAX_STATS_UPDATE_DELAY_SECONDS {
            return Err(crate::error::AppError::Config(format!(
                "monitoring.stats_update_delay_seconds must be at most {MAX_STATS_UPDATE_DELAY_SECONDS}"
            )));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(crate::error::AppError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}
