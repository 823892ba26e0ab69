//! Error types for the Runloop client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Runloop client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Response body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Rate limited - too many requests.
    #[error("Rate limited: retry after {0:?}")]
    RateLimited(Option<Duration>),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Unauthorized access.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request parameters rejected before any network call.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Devbox reached a state it will not leave on its own, or never
    /// became `running` before the deadline.
    #[error("Devbox {id} is not ready (status: {status})")]
    DevboxNotReady { id: String, status: String },

    /// Local file I/O during upload or download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Shorthand for a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::Timeout(_) | Self::RateLimited(_) => true,
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable: 429 (rate limited), 502, 503, 504 (transient gateway errors).
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates an authentication failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// Check if this error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::ApiError { status, .. } => *status == 404,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(
            ClientError::ApiError {
                status: 503,
                url: "u".into(),
                message: "m".into(),
                request_id: None
            }
            .is_retryable()
        );
        assert!(!ClientError::validation("name", "required").is_retryable());
    }

    #[test]
    fn test_is_retryable_status() {
        for status in [429, 502, 503, 504] {
            assert!(ClientError::is_retryable_status(status));
        }
        for status in [200, 400, 401, 403, 404, 500, 501] {
            assert!(!ClientError::is_retryable_status(status));
        }
    }

    #[test]
    fn test_auth_and_not_found_classification() {
        let unauthorized = ClientError::ApiError {
            status: 401,
            url: "u".into(),
            message: "bad key".into(),
            request_id: None,
        };
        assert!(unauthorized.is_auth_error());
        assert!(!unauthorized.is_not_found());

        let missing = ClientError::ApiError {
            status: 404,
            url: "u".into(),
            message: "no such devbox".into(),
            request_id: Some("req-1".into()),
        };
        assert!(missing.is_not_found());
        assert!(missing.to_string().contains("[Request ID: req-1]"));
    }

    #[test]
    fn test_validation_display_names_field() {
        let err = ClientError::validation("user", "expected name:uid");
        assert_eq!(err.to_string(), "Invalid user: expected name:uid");
    }
}
