//! Configuration management for the load board service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::LoadBoardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

static GLOBAL_CONFIG: OnceLock<LoadBoardConfig> = OnceLock::new();

/// Root configuration structure for the load board service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoadBoardConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Recommendation service configuration
    pub recommend: RecommendConfig,
    /// Booking stub configuration
    pub booking: BookingConfig,
    /// Profile store configuration
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the API listens on
    pub port: u16,
}

/// Recommendation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Base URL of the external recommendation service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Recommendation cache TTL in hours
    pub cache_ttl_hours: u32,
    /// Latitude reported as the driver's current position
    pub current_latitude: f64,
    /// Longitude reported as the driver's current position
    pub current_longitude: f64,
    /// Number of recommendations requested per call
    pub default_limit: u32,
}

/// Booking stub settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Simulated processing delay in milliseconds
    pub processing_delay_ms: u64,
}

/// Profile store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store directory location
    pub location: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Loads shown per home-feed section
    pub feed_section_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            cache_ttl_hours: 1,
            // Madison, WI - the demo drivers all run out of the regional board
            current_latitude: 43.0731,
            current_longitude: -89.4012,
            default_limit: 20,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 1000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: "~/.local/share/loadboard".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            feed_section_size: 4,
        }
    }
}

impl LoadBoardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with LOADBOARD_ prefix
        builder = builder.add_source(
            Environment::with_prefix("LOADBOARD")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: LoadBoardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// The default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("loadboard").join("config.toml"))
    }

    /// The store directory with a leading `~` expanded
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        if let Some(rest) = self.store.location.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.store.location)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.recommend.timeout_seconds > 300 {
            return Err(
                LoadBoardError::config("Recommendation timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.recommend.max_retries > 10 {
            return Err(
                LoadBoardError::config("Recommendation max retries cannot exceed 10").into(),
            );
        }

        if self.recommend.cache_ttl_hours > 168 {
            return Err(LoadBoardError::config(
                "Recommendation cache TTL cannot exceed 168 hours (1 week)",
            )
            .into());
        }

        if !(-90.0..=90.0).contains(&self.recommend.current_latitude)
            || !(-180.0..=180.0).contains(&self.recommend.current_longitude)
        {
            return Err(LoadBoardError::config(
                "Current position must be valid lat/lon coordinates",
            )
            .into());
        }

        if self.booking.processing_delay_ms > 60_000 {
            return Err(LoadBoardError::config(
                "Booking processing delay cannot exceed 60000 ms",
            )
            .into());
        }

        if self.defaults.feed_section_size == 0 || self.defaults.feed_section_size > 100 {
            return Err(
                LoadBoardError::config("Feed section size must be between 1 and 100").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LoadBoardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(LoadBoardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.recommend.base_url.starts_with("http://")
            && !self.recommend.base_url.starts_with("https://")
        {
            return Err(LoadBoardError::config(
                "Recommendation base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.store.location.is_empty() {
            return Err(LoadBoardError::config("Store location cannot be empty").into());
        }

        Ok(())
    }

    /// Create the configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let board_config_dir = config_dir.join("loadboard");
            std::fs::create_dir_all(&board_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    board_config_dir.display()
                )
            })?;
            Ok(board_config_dir)
        } else {
            Err(LoadBoardError::config("Unable to determine config directory").into())
        }
    }
}

/// Install the loaded configuration as the process-wide config.
pub fn init(config: LoadBoardConfig) -> Result<()> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| LoadBoardError::config("Configuration already initialized").into())
}

/// The process-wide configuration; defaults apply when `init` was never
/// called (tests, embedding as a library).
#[must_use]
pub fn get() -> &'static LoadBoardConfig {
    GLOBAL_CONFIG.get_or_init(LoadBoardConfig::default)
}
