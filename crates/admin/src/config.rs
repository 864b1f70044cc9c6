//! Admin API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ADMIN_API_HOST` - Bind address or host name (default: 127.0.0.1)
//! - `ADMIN_API_PORT` - Listen port (default: 8080, non-integer values fall back to the default)
//! - `ADMIN_API_DB_PATH` - Path to the `SQLite` database file (default: database/school_schedule.db)
//! - `ADMIN_API_LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::path::PathBuf;

use thiserror::Error;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default database location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "database/school_schedule.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text (local development).
    #[default]
    Text,
    /// One JSON object per line (log shipping).
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone)]
pub struct AdminApiConfig {
    /// Host name or IP address to bind the server to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Path to the `SQLite` database file
    pub database_path: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl AdminApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `ADMIN_API_LOG_FORMAT` is set to an unknown format.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_optional_env("ADMIN_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_port(get_optional_env("ADMIN_API_PORT").as_deref());
        let database_path = get_optional_env("ADMIN_API_DB_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
        let log_format = get_optional_env("ADMIN_API_LOG_FORMAT")
            .map(|s| s.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_API_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate(get_optional_env("SENTRY_SAMPLE_RATE").as_deref());
        let sentry_traces_sample_rate =
            parse_rate(get_optional_env("SENTRY_TRACES_SAMPLE_RATE").as_deref());

        Ok(Self {
            host,
            port,
            database_path,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the `host:port` pair for binding the server.
    #[must_use]
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

/// Parse the listen port, falling back to [`DEFAULT_PORT`] on anything that
/// is not an integer in range.
fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|s| s.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn parse_rate(raw: Option<&str>) -> f32 {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|rate| (0.0..=1.0).contains(rate))
        .unwrap_or(1.0)
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
