// Runtime configuration, read once at startup from environment variables.

use crate::token;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.gradient.network/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Settings shared by the HTTP client, the logger and the UI.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Bearer token, from `GRADIENT_TOKEN` or the saved token file.
    pub token: Option<String>,
    pub request_timeout: Duration,
    pub log_dir: PathBuf,
    /// `DEBUG=true` shows probe errors on screen and logs at debug level.
    pub debug: bool,
}

impl Config {
    /// Load configuration from the process environment. Falls back to the
    /// token saved by a previous session when `GRADIENT_TOKEN` is unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        if config.token.is_none() {
            config.token = token::read_token(&token::token_path()).ok();
        }
        Ok(config)
    }

    /// Build a configuration from an arbitrary variable lookup. Does not
    /// touch the token file.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_ms = match non_empty("API_TIMEOUT") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("API_TIMEOUT must be a number of milliseconds, got {:?}", raw))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Config {
            api_base_url: non_empty("GRADIENT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            token: non_empty("GRADIENT_TOKEN"),
            request_timeout: Duration::from_millis(timeout_ms),
            log_dir: non_empty("GRADIENT_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            debug: non_empty("DEBUG").map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false),
        })
    }
}
