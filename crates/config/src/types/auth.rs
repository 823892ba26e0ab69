//! Authentication settings.

use secrecy::SecretString;

/// Authentication configuration for the Runloop API.
///
/// The key is sent as a bearer token; `Debug` output is redacted by `secrecy`.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub api_key: SecretString,
}
