//! Client configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once at startup and handed to the client context;
//! nothing reads it through a global.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_LEADERBOARD_REFRESH_SECONDS, DEFAULT_REQUEST_TIMEOUT_SECONDS,
    DEFAULT_SUBMISSION_POLL_INTERVAL_MS, SESSION_DIR_NAME, SESSION_FILE_NAME,
};

/// Main client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

/// Judge service connection settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8081/api`
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Polling intervals
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Interval between submission status checks
    pub submission_interval: Duration,
    /// Interval between leaderboard refreshes
    pub leaderboard_refresh: Duration,
}

/// Where the local session is kept
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api: ApiConfig::from_env()?,
            polling: PollingConfig::from_env()?,
            session: SessionConfig::from_env()?,
            log: LogConfig::from_env(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            },
            polling: PollingConfig {
                submission_interval: Duration::from_millis(DEFAULT_SUBMISSION_POLL_INTERVAL_MS),
                leaderboard_refresh: Duration::from_secs(DEFAULT_LEADERBOARD_REFRESH_SECONDS),
            },
            session: SessionConfig {
                path: default_session_path(env::var("HOME").ok()),
            },
            log: LogConfig {
                rust_log: "info".to_string(),
            },
        }
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("JUDGE_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("JUDGE_API_URL".to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(parse_var(
                "JUDGE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            )?),
        })
    }
}

impl PollingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let submission_ms = parse_var(
            "SUBMISSION_POLL_INTERVAL_MS",
            DEFAULT_SUBMISSION_POLL_INTERVAL_MS,
        )?;
        let leaderboard_secs = parse_var(
            "LEADERBOARD_REFRESH_SECS",
            DEFAULT_LEADERBOARD_REFRESH_SECONDS,
        )?;

        // tokio intervals panic on a zero period
        if submission_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "SUBMISSION_POLL_INTERVAL_MS".to_string(),
            ));
        }
        if leaderboard_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "LEADERBOARD_REFRESH_SECS".to_string(),
            ));
        }

        Ok(Self {
            submission_interval: Duration::from_millis(submission_ms),
            leaderboard_refresh: Duration::from_secs(leaderboard_secs),
        })
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let path = match env::var("SESSION_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            Ok(_) => return Err(ConfigError::InvalidValue("SESSION_FILE".to_string())),
            Err(_) => default_session_path(env::var("HOME").ok()),
        };

        Ok(Self { path })
    }
}

impl LogConfig {
    fn from_env() -> Self {
        Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// `$HOME/.shodh/session.json`, or a file in the working directory without a home
fn default_session_path(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home)
            .join(SESSION_DIR_NAME)
            .join(SESSION_FILE_NAME),
        None => PathBuf::from(SESSION_DIR_NAME).join(SESSION_FILE_NAME),
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
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
