//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::cart::PickupMethod;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ordering: OrderingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the settings were read from, `None` for defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Ordering API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Order form defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderingConfig {
    /// Pickup method used when none is given
    #[serde(default)]
    pub default_pickup: PickupMethod,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so a broken file is returned as an
    /// error instead of being logged and skipped.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&default_config_paths())
    }

    /// Load the first of `paths` that exists, or defaults if none does
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CANTEEN_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("CANTEEN_REQUEST_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid CANTEEN_REQUEST_TIMEOUT_SECS: {}", timeout),
            }
        }
        if let Some(pickup) = lookup("CANTEEN_DEFAULT_PICKUP") {
            match pickup.parse() {
                Ok(p) => self.ordering.default_pickup = p,
                Err(e) => tracing::warn!("Ignoring CANTEEN_DEFAULT_PICKUP: {}", e),
            }
        }
        if let Some(level) = lookup("CANTEEN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CANTEEN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Config file search order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = dirs::config_dir()
        .map(|p| p.join("canteen").join("config.toml"))
        .into_iter()
        .collect();
    paths.push(PathBuf::from("/etc/canteen/config.toml"));
    paths.push(PathBuf::from("./config.toml"));
    paths
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Canteen Configuration
#
# Environment variables override these settings:
# - CANTEEN_API_URL
# - CANTEEN_REQUEST_TIMEOUT_SECS
# - CANTEEN_DEFAULT_PICKUP
# - CANTEEN_LOG_LEVEL
# - CANTEEN_LOG_FORMAT

[api]
# Base URL of the ordering API
base_url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

[ordering]
# Pickup method when none is given: "內用" (dine-in) or "外帶" (takeout)
default_pickup = "內用"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
