//! Client builder for constructing [`RunloopClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, api_key)
//! - Normalizing the base URL (removing trailing slashes)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`RunloopClient`] methods)
//! - Retry logic (handled by [`crate::endpoints::send_request_with_retry`])

use std::time::Duration;

use runloop_config::Config;
use runloop_config::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use secrecy::SecretString;

use crate::client::RunloopClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`RunloopClient`].
pub struct RunloopClientBuilder {
    base_url: Option<String>,
    api_key: Option<SecretString>,
    timeout: Duration,
    max_retries: usize,
    metrics: Option<MetricsCollector>,
}

impl Default for RunloopClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            metrics: None,
        }
    }
}

impl RunloopClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL, e.g. `https://api.runloop.ai`.
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient failures.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Record request latency, retries, and errors through the `metrics` facade.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-fill the builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.api_key = Some(config.auth.api_key.clone());
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`RunloopClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::Unauthorized`] if `api_key` was not provided.
    pub fn build(self) -> Result<RunloopClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let api_key = self
            .api_key
            .ok_or_else(|| ClientError::Unauthorized("api_key is required".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("runloop-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(RunloopClient {
            http,
            base_url,
            api_key,
            max_retries: self.max_retries,
            metrics: self.metrics,
        })
    }
}
