//! Shared request plumbing: auth header, retry with exponential backoff,
//! API error extraction, and JSON helpers.
//!
//! Invariants:
//! - Every request carries `Authorization: Bearer <api key>`.
//! - Only 429/502/503/504 are retried; the wait is `2^attempt` seconds.
//! - Non-success responses become `ClientError::ApiError` with the body's
//!   `message`/`error` field when the body is JSON.

use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ListParams, Page};

/// Header the API uses to echo a request id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Everything an endpoint function needs to issue a request.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub http: &'a Client,
    pub base_url: &'a str,
    pub api_key: &'a SecretString,
    pub max_retries: usize,
    pub metrics: Option<&'a MetricsCollector>,
}

impl<'a> RequestContext<'a> {
    /// Start a request for `path` (which must begin with `/`).
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(self.api_key.expose_secret())
    }

    /// Send with retry and record metrics under `endpoint`.
    pub async fn send(
        &self,
        builder: RequestBuilder,
        method: &Method,
        endpoint: &str,
    ) -> Result<Response> {
        let method = method.as_str();
        let started = Instant::now();
        let result =
            send_request_with_retry(builder, self.max_retries, endpoint, method, self.metrics)
                .await;

        if let Some(metrics) = self.metrics {
            let status = match &result {
                Ok(response) => Some(response.status().as_u16()),
                Err(ClientError::ApiError { status, .. }) => Some(*status),
                Err(_) => None,
            };
            metrics.record_request_duration(endpoint, method, started.elapsed(), status);
            if let Err(e) = &result {
                metrics.record_client_error(endpoint, method, e);
            }
        }

        result
    }
}

/// Sends a request, retrying transient failures with exponential backoff.
///
/// A request whose body cannot be cloned (e.g. a streaming multipart upload)
/// is sent exactly once.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None if attempt == 0 => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await?;
                return check_status(response).await;
            }
            None => return Err(ClientError::MaxRetriesExceeded(attempt)),
        };

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
        }

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if ClientError::is_retryable_status(status) {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    endpoint,
                    status,
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    backoff_secs,
                    "Transient API failure, retrying with exponential backoff"
                );
                if let Some(m) = metrics {
                    m.record_retry(endpoint, method, attempt + 1);
                }
                tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                continue;
            }
            debug!(endpoint, attempts = attempt + 1, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
        }

        if attempt > 0 {
            debug!(endpoint, attempt = attempt + 1, "Request succeeded after retry");
        }
        return check_status(response).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Convert a non-success response into `ClientError::ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    Err(ClientError::ApiError {
        status,
        url,
        message: extract_error_message(&body),
        request_id,
    })
}

/// Pull a human readable message out of an error body.
fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    ctx: &RequestContext<'_>,
    path: &str,
    query: &[(String, String)],
) -> Result<T> {
    let builder = ctx.request(Method::GET, path).query(query);
    decode(ctx.send(builder, &Method::GET, path).await?).await
}

pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    ctx: &RequestContext<'_>,
    path: &str,
    body: Option<&B>,
) -> Result<T> {
    let mut builder = ctx.request(Method::POST, path);
    builder = match body {
        Some(body) => builder.json(body),
        None => builder.json(&serde_json::json!({})),
    };
    decode(ctx.send(builder, &Method::POST, path).await?).await
}

/// Fetch one page from a cursor-paginated list endpoint.
///
/// `key` is the plural field holding the items (`devboxes`, `blueprints`, ...).
pub(crate) async fn get_page<T: DeserializeOwned>(
    ctx: &RequestContext<'_>,
    path: &str,
    key: &str,
    params: &ListParams,
) -> Result<Page<T>> {
    let value: serde_json::Value = get_json(ctx, path, &params.to_query()).await?;
    Page::from_response(value, key)
}
