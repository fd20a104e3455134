// Configuration management with layered configuration (file, env)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub publisher: PublisherConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// How often to evaluate scheduled articles (in seconds)
    pub poll_interval_seconds: u64,
    /// Attempts per tick when the evaluator fails
    pub retry_attempts: u32,
    /// Fixed delay between retry attempts (in seconds)
    pub retry_delay_seconds: u64,
    /// IANA zone used when formatting timestamps for log output
    pub display_timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Settings {
    /// Load configuration with layered precedence: defaults file → local file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }

        if self.publisher.poll_interval_seconds == 0 {
            return Err("Publisher poll_interval_seconds must be greater than 0".to_string());
        }
        if self.publisher.retry_attempts == 0 {
            return Err("Publisher retry_attempts must be greater than 0".to_string());
        }
        if chrono_tz::Tz::from_str(&self.publisher.display_timezone).is_err() {
            return Err(format!(
                "Unknown display_timezone: {}",
                self.publisher.display_timezone
            ));
        }

        Ok(())
    }

    /// Parsed display time zone. Valid whenever [`Settings::validate`] passed.
    pub fn display_timezone(&self) -> chrono_tz::Tz {
        chrono_tz::Tz::from_str(&self.publisher.display_timezone)
            .unwrap_or(crate::timezone::DEFAULT_DISPLAY_TZ)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/blogpress".to_string(),
                max_connections: 10,
                min_connections: 2,
                connect_timeout_seconds: 30,
            },
            publisher: PublisherConfig {
                poll_interval_seconds: 60,
                retry_attempts: 3,
                retry_delay_seconds: 3,
                display_timezone: "Asia/Kolkata".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}
