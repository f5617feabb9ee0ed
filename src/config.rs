//! Runtime configuration for the strichliste CLI
//!
//! Environment variables provide defaults that sit between CLI flags and the
//! configuration file. The resolved values end up in a [`Context`] that is
//! passed explicitly into every command handler.

use crate::config_file::ConfigFile;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// API endpoint used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://[::1]:8080";

/// Request timeout used when `STRICHLISTE_HTTP_TIMEOUT_SECS` is unset or invalid
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Values read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrichlisteCliConfig {
    /// `STRICHLISTE_API_URL`
    pub api_url: Option<String>,

    /// `STRICHLISTE_USER`
    pub user: Option<String>,

    /// Login name of the OS user (`USER`, or `USERNAME` on Windows)
    pub os_user: Option<String>,

    /// `STRICHLISTE_HTTP_TIMEOUT_SECS`
    pub http_timeout_secs: u64,
}

impl StrichlisteCliConfig {
    /// Create a new configuration instance from the process environment
    #[must_use]
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            api_url: non_empty("STRICHLISTE_API_URL"),
            user: non_empty("STRICHLISTE_USER"),
            os_user: non_empty("USER").or_else(|| non_empty("USERNAME")),
            http_timeout_secs: non_empty("STRICHLISTE_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for StrichlisteCliConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Ambient values shared by all command handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Account name credit/debit/buy/metrics act on by default
    pub acting_user: String,

    /// Strichliste API endpoint
    pub api_url: String,

    /// Configuration file the defaults came from, if any
    pub config_source: Option<PathBuf>,
}

impl Context {
    /// Resolve the effective context
    ///
    /// Precedence: CLI flag > environment > config file > built-in default.
    #[must_use]
    pub fn resolve(
        user_flag: Option<&str>,
        api_url_flag: Option<&str>,
        env_config: &StrichlisteCliConfig,
        config_file: &ConfigFile,
    ) -> Self {
        let acting_user = user_flag
            .map(str::to_string)
            .or_else(|| env_config.user.clone())
            .or_else(|| config_file.user.clone())
            .or_else(|| env_config.os_user.clone())
            .unwrap_or_default();

        let api_url = api_url_flag
            .map(str::to_string)
            .or_else(|| env_config.api_url.clone())
            .or_else(|| config_file.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            acting_user,
            api_url,
            config_source: config_file.source.clone(),
        }
    }

    /// Context for handler tests
    #[cfg(test)]
    #[must_use]
    pub fn for_user(name: &str) -> Self {
        Self {
            acting_user: name.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            config_source: None,
        }
    }
}
