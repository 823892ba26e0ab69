//! Main Runloop API client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `devboxes`, `blueprints`, `snapshots`, `secrets`, `network`, `objects`,
//!   `benchmarks`: API methods grouped by resource
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - A client is an explicit handle. Callers share it as `Arc<RunloopClient>`;
//!   there is no process-global instance.
//! - `base_url` never ends with `/`.

pub mod builder;

mod benchmarks;
mod blueprints;
mod devboxes;
mod network;
mod objects;
mod secrets;
mod snapshots;

use secrecy::SecretString;

use crate::endpoints::RequestContext;
use crate::metrics::MetricsCollector;

/// Runloop REST API client.
///
/// ```rust,ignore
/// use runloop_client::RunloopClient;
///
/// let client = RunloopClient::builder().from_config(&config).build()?;
/// let page = client.list_devboxes(&ListParams::new().limit(20)).await?;
/// ```
pub struct RunloopClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: SecretString,
    pub(crate) max_retries: usize,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl std::fmt::Debug for RunloopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunloopClient")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl RunloopClient {
    /// Create a new client builder.
    pub fn builder() -> builder::RunloopClientBuilder {
        builder::RunloopClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn ctx(&self) -> RequestContext<'_> {
        RequestContext {
            http: &self.http,
            base_url: &self.base_url,
            api_key: &self.api_key,
            max_retries: self.max_retries,
            metrics: self.metrics.as_ref(),
        }
    }
}
