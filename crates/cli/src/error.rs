//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` and `ConfigError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see `cancellation` for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use runloop_client::ClientError;
use runloop_config::ConfigError;

/// Structured exit codes for `rl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Missing, invalid, or revoked API key (HTTP 401/403).
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure. Scripts may retry with backoff.
    ConnectionError = 3,

    /// Devbox, blueprint, object, etc. does not exist.
    NotFound = 4,

    /// Bad arguments or a request the API rejected as malformed.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// HTTP 429 after retries.
    RateLimited = 7,

    /// HTTP 502/503/504 after retries, or a devbox that never became ready.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Unauthorized(_) => ExitCode::AuthenticationFailed,
            ClientError::ApiError {
                status: 401 | 403, ..
            } => ExitCode::AuthenticationFailed,

            ClientError::Timeout(_) | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() || e.is_request() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::NotFound(_) => ExitCode::NotFound,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::Validation { .. } | ClientError::InvalidResponse(_) => {
                ExitCode::ValidationError
            }
            ClientError::ApiError {
                status: 400 | 422, ..
            } => ExitCode::ValidationError,

            ClientError::RateLimited(_) => ExitCode::RateLimited,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,

            // Only retryable statuses (429/502/503/504) exhaust retries.
            ClientError::MaxRetriesExceeded(_) => ExitCode::ServiceUnavailable,
            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,
            ClientError::DevboxNotReady { .. } => ExitCode::ServiceUnavailable,

            ClientError::ApiError { .. } | ClientError::Io(_) => ExitCode::GeneralError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingApiKey => ExitCode::AuthenticationFailed,
            ConfigError::InvalidValue { .. }
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::InvalidMaxRetries { .. } => ExitCode::ValidationError,
            _ => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns `GeneralError` when no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::time::Duration;

    fn api(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://api.runloop.ai/v1/devboxes".into(),
            message: "m".into(),
            request_id: None,
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
        assert_eq!(ExitCode::RateLimited.as_i32(), 7);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ExitCode::from(&api(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&api(403)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&api(404)), ExitCode::NotFound);
        assert_eq!(ExitCode::from(&api(400)), ExitCode::ValidationError);
        assert_eq!(ExitCode::from(&api(429)), ExitCode::RateLimited);
        assert_eq!(ExitCode::from(&api(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api(500)), ExitCode::GeneralError);
    }

    #[test]
    fn test_client_variant_mapping() {
        assert_eq!(
            ExitCode::from(&ClientError::Timeout(Duration::from_secs(30))),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::validation("user", "expected name:uid")),
            ExitCode::ValidationError
        );
        assert_eq!(
            ExitCode::from(&ClientError::MaxRetriesExceeded(4)),
            ExitCode::ServiceUnavailable
        );
        assert_eq!(
            ExitCode::from(&ClientError::DevboxNotReady {
                id: "dbx_1".into(),
                status: "failure".into()
            }),
            ExitCode::ServiceUnavailable
        );
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = Err::<(), _>(api(404))
            .context("Failed to get devbox dbx_1")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::NotFound);

        let err = anyhow::Error::new(ConfigError::MissingApiKey);
        assert_eq!(err.exit_code(), ExitCode::AuthenticationFailed);

        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_retryable_codes() {
        assert!(ExitCode::ConnectionError.is_retryable());
        assert!(ExitCode::RateLimited.is_retryable());
        assert!(!ExitCode::NotFound.is_retryable());
    }
}
