//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Collect connection settings from builder methods and environment variables.
//! - Resolve the platform environment into concrete API and SSH endpoints.
//! - Validate the merged values and produce the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - An explicit base URL wins over the one implied by `RUNLOOP_ENV`.
//! - The API key is mandatory; every other value has a default.
//! - Base URLs are normalized without a trailing slash.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES,
    MAX_TIMEOUT_SECS, MIN_POLL_INTERVAL_MS,
};
use crate::types::{AuthConfig, ColorTheme, Config, ConnectionConfig, Environment};

/// Configuration loader that builds config from builder overrides and the environment.
#[derive(Default)]
pub struct ConfigLoader {
    api_key: Option<SecretString>,
    environment: Option<Environment>,
    base_url: Option<String>,
    ssh_proxy: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    poll_interval: Option<Duration>,
    theme: Option<ColorTheme>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// Skipped entirely when `DOTENV_DISABLED` is `true` or `1`. Missing
    /// `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DotenvParse` for invalid syntax and
    /// `ConfigError::DotenvIo` when the file exists but cannot be read.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    ///
    /// Values already set through builder methods are kept.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: String) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Select the platform environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the SSH proxy endpoint (`host:port`).
    pub fn with_ssh_proxy(mut self, proxy: String) -> Self {
        self.ssh_proxy = Some(proxy);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the list polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let api_key = self.api_key.ok_or(ConfigError::MissingApiKey)?;
        let environment = self.environment.unwrap_or_default();

        let base_url = match self.base_url.as_deref() {
            Some(raw) => validate_and_normalize_base_url(raw)?,
            None => environment.api_base_url().to_string(),
        };
        let ssh_proxy = self
            .ssh_proxy
            .unwrap_or_else(|| environment.ssh_proxy().to_string());

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        validate_timeout(timeout)?;

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, max_retries
                ),
            });
        }

        let poll_interval = self
            .poll_interval
            .unwrap_or(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
            .max(Duration::from_millis(MIN_POLL_INTERVAL_MS));

        Ok(Config {
            environment,
            connection: ConnectionConfig {
                base_url,
                ssh_proxy,
                timeout,
                max_retries,
            },
            auth: AuthConfig { api_key },
            poll_interval,
            theme: self.theme,
        })
    }

    // Internal accessors for env.rs

    pub(crate) fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn has_base_url(&self) -> bool {
        self.base_url.is_some()
    }

    pub(crate) fn set_api_key(&mut self, key: Option<SecretString>) {
        self.api_key = key;
    }

    pub(crate) fn set_environment(&mut self, environment: Option<Environment>) {
        if self.environment.is_none() {
            self.environment = environment;
        }
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_ssh_proxy(&mut self, proxy: Option<String>) {
        if self.ssh_proxy.is_none() {
            self.ssh_proxy = proxy;
        }
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        if self.timeout.is_none() {
            self.timeout = timeout;
        }
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        if self.max_retries.is_none() {
            self.max_retries = retries;
        }
    }

    pub(crate) fn set_poll_interval(&mut self, interval: Option<Duration>) {
        if self.poll_interval.is_none() {
            self.poll_interval = interval;
        }
    }

    pub(crate) fn set_theme(&mut self, theme: Option<ColorTheme>) {
        self.theme = theme;
    }
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    let secs = timeout.as_secs();
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(())
}

fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!("must be an absolute http(s) URL (e.g. https://api.runloop.ai): {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://api.runloop.ai)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
