//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::telemetry::SourceKind;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built dashboard assets (trunk output)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "dashboard-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Telemetry source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub source: SourceKind,

    /// Readings returned per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Host sampling period for the system source
    #[serde(default = "default_sample_interval")]
    pub sample_interval_ms: u64,

    /// Readings kept by the system source
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_batch_size() -> usize {
    5
}

fn default_sample_interval() -> u64 {
    500
}

fn default_history_capacity() -> usize {
    120
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            batch_size: default_batch_size(),
            sample_interval_ms: default_sample_interval(),
            history_capacity: default_history_capacity(),
        }
    }
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("telemetry-dash").join("config.toml")),
            Some(PathBuf::from("/etc/telemetry-dash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = lookup("TELEMETRY_DASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TELEMETRY_DASH_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid TELEMETRY_DASH_PORT: {}", port),
            }
        }
        if let Some(dir) = lookup("TELEMETRY_DASH_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // Telemetry overrides
        if let Some(source) = lookup("TELEMETRY_DASH_SOURCE") {
            match source.parse() {
                Ok(kind) => self.telemetry.source = kind,
                Err(e) => tracing::warn!("Ignoring TELEMETRY_DASH_SOURCE: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("TELEMETRY_DASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TELEMETRY_DASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
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
    r#"# Telemetry Dash Configuration
#
# Environment variables override these settings:
# - TELEMETRY_DASH_HOST
# - TELEMETRY_DASH_PORT
# - TELEMETRY_DASH_STATIC_DIR
# - TELEMETRY_DASH_SOURCE
# - TELEMETRY_DASH_LOG_LEVEL
# - TELEMETRY_DASH_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port (the dashboard expects 8080)
port = 8080

# Built dashboard assets
static_dir = "dashboard-ui/dist"

# Allowed CORS origins (empty = any origin)
cors_origins = []

[telemetry]
# Source of readings: simulated or system
source = "simulated"

# Readings returned per request
batch_size = 5

# Host sampling period for the system source (ms)
sample_interval_ms = 500

# Readings kept by the system source
history_capacity = 120

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
