//! Connection configuration types.
//!
//! Responsibilities:
//! - Define resolved endpoint, timeout, and retry settings.
//! - Define the top-level `Config` handed to the client and the TUI.
//!
//! Does NOT handle:
//! - Loading from env (see `loader` module).
//! - Actual network connections (see client crate).

use std::time::Duration;

use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS, PROD_API_BASE_URL,
    PROD_SSH_PROXY,
};
use crate::types::auth::AuthConfig;
use crate::types::environment::Environment;
use crate::types::theme::ColorTheme;
use secrecy::SecretString;

/// Connection settings for the Runloop API.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// API base URL without trailing slash (e.g. `https://api.runloop.ai`).
    pub base_url: String,
    /// SSH proxy endpoint as `host:port`.
    pub ssh_proxy: String,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: PROD_API_BASE_URL.to_string(),
            ssh_proxy: PROD_SSH_PROXY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    /// Interval between background list refreshes in the TUI.
    pub poll_interval: Duration,
    /// Theme forced through the environment; overrides the persisted choice.
    pub theme: Option<ColorTheme>,
}

impl Config {
    /// Create a config pointing at an explicit base URL, mainly for tests.
    pub fn with_api_key(base_url: String, api_key: SecretString) -> Self {
        Self {
            environment: Environment::Production,
            connection: ConnectionConfig {
                base_url,
                ..ConnectionConfig::default()
            },
            auth: AuthConfig { api_key },
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            theme: None,
        }
    }
}
