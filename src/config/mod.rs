//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults.
//! `Config::from_env` validates numeric values so a typo in a deployment
//! surfaces at startup instead of as odd runtime behavior.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names. Public so tests and scripts can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_MAX_ATTEMPTS: &str = "FETCH_MAX_ATTEMPTS";
pub const ENV_FETCH_BACKOFF_MS: &str = "FETCH_BACKOFF_MS";
pub const ENV_CONFIDENCE_JITTER: &str = "CONFIDENCE_JITTER";
pub const ENV_CLASSIFIER_URL: &str = "CLASSIFIER_URL";
pub const ENV_LEXICON_PATH: &str = "LEXICON_PATH";
pub const ENV_SITE_SELECTORS_PATH: &str = "SITE_SELECTORS_PATH";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_STATIC_DIR: &str = "frontend";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_FETCH_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_FETCH_BACKOFF_MS: u64 = 500;
const DEFAULT_CONFIDENCE_JITTER: f64 = 0.0;

/// Upper bound on jitter amplitude; anything larger would swamp the score.
const MAX_CONFIDENCE_JITTER: f64 = 0.1;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    bind_addr: String,
    static_dir: PathBuf,
    fetch_timeout: Duration,
    fetch_max_attempts: u32,
    fetch_backoff: Duration,
    confidence_jitter: f64,
    classifier_url: Option<String>,
    lexicon_path: Option<PathBuf>,
    site_selectors_path: Option<PathBuf>,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let static_dir =
            PathBuf::from(env::var(ENV_STATIC_DIR).unwrap_or_else(|_| DEFAULT_STATIC_DIR.into()));

        let fetch_timeout_secs: u64 =
            parse_var(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?;
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_FETCH_TIMEOUT_SECS,
                reason: "must be at least 1 second".to_string(),
            });
        }

        let fetch_max_attempts: u32 =
            parse_var(ENV_FETCH_MAX_ATTEMPTS, DEFAULT_FETCH_MAX_ATTEMPTS)?;
        if fetch_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_FETCH_MAX_ATTEMPTS,
                reason: "must be at least 1".to_string(),
            });
        }

        let fetch_backoff_ms: u64 = parse_var(ENV_FETCH_BACKOFF_MS, DEFAULT_FETCH_BACKOFF_MS)?;

        let confidence_jitter: f64 =
            parse_var(ENV_CONFIDENCE_JITTER, DEFAULT_CONFIDENCE_JITTER)?;
        if !(0.0..=MAX_CONFIDENCE_JITTER).contains(&confidence_jitter) {
            return Err(ConfigError::InvalidValue {
                field: ENV_CONFIDENCE_JITTER,
                reason: format!("must be between 0 and {MAX_CONFIDENCE_JITTER}"),
            });
        }

        Ok(Self {
            bind_addr,
            static_dir,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_max_attempts,
            fetch_backoff: Duration::from_millis(fetch_backoff_ms),
            confidence_jitter,
            classifier_url: non_empty_var(ENV_CLASSIFIER_URL),
            lexicon_path: non_empty_var(ENV_LEXICON_PATH).map(PathBuf::from),
            site_selectors_path: non_empty_var(ENV_SITE_SELECTORS_PATH).map(PathBuf::from),
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Directory the frontend assets are served from.
    pub fn static_dir(&self) -> &PathBuf {
        &self.static_dir
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn fetch_max_attempts(&self) -> u32 {
        self.fetch_max_attempts
    }
    /// Base delay between fetch attempts; doubled on every retry.
    pub fn fetch_backoff(&self) -> Duration {
        self.fetch_backoff
    }
    /// Amplitude of the confidence jitter. Zero disables it.
    pub fn confidence_jitter(&self) -> f64 {
        self.confidence_jitter
    }
    /// Endpoint of the optional sequence classifier.
    pub fn classifier_url(&self) -> Option<&str> {
        self.classifier_url.as_deref()
    }
    pub fn lexicon_path(&self) -> Option<&PathBuf> {
        self.lexicon_path.as_ref()
    }
    pub fn site_selectors_path(&self) -> Option<&PathBuf> {
        self.site_selectors_path.as_ref()
    }
}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            fetch_max_attempts: DEFAULT_FETCH_MAX_ATTEMPTS,
            fetch_backoff: Duration::from_millis(DEFAULT_FETCH_BACKOFF_MS),
            confidence_jitter: DEFAULT_CONFIDENCE_JITTER,
            classifier_url: None,
            lexicon_path: None,
            site_selectors_path: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match non_empty_var(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
