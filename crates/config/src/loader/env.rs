//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read `RUNLOOP_*` variables and apply them to a `ConfigLoader`.
//! - Provide the shared helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::{ColorTheme, Environment};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_var<T: FromStr>(var: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub(crate) fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if !loader.has_api_key()
        && let Some(key) = env_var_or_none("RUNLOOP_API_KEY")
    {
        loader.set_api_key(Some(SecretString::new(key.into())));
    }

    if let Some(env) = env_var_or_none("RUNLOOP_ENV") {
        loader.set_environment(Some(Environment::from_env_value(&env)));
    }

    if !loader.has_base_url()
        && let Some(url) = env_var_or_none("RUNLOOP_BASE_URL")
    {
        loader.set_base_url(Some(url));
    }

    loader.set_ssh_proxy(env_var_or_none("RUNLOOP_SSH_PROXY"));

    let timeout: Option<u64> = parse_var("RUNLOOP_TIMEOUT", "must be a number of seconds")?;
    loader.set_timeout(timeout.map(Duration::from_secs));

    let retries: Option<usize> =
        parse_var("RUNLOOP_MAX_RETRIES", "must be a non-negative integer")?;
    loader.set_max_retries(retries);

    let poll_ms: Option<u64> =
        parse_var("RUNLOOP_POLL_INTERVAL_MS", "must be a number of milliseconds")?;
    loader.set_poll_interval(poll_ms.map(Duration::from_millis));

    if let Some(theme) = env_var_or_none("RUNLOOP_THEME") {
        let parsed = ColorTheme::from_str(&theme).map_err(|message| ConfigError::InvalidValue {
            var: "RUNLOOP_THEME".to_string(),
            message,
        })?;
        loader.set_theme(Some(parsed));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        temp_env::with_vars(
            [
                ("RUNLOOP_TEST_EMPTY", Some("")),
                ("RUNLOOP_TEST_SPACES", Some("   ")),
                ("RUNLOOP_TEST_PADDED", Some("  value  ")),
            ],
            || {
                assert_eq!(env_var_or_none("RUNLOOP_TEST_EMPTY"), None);
                assert_eq!(env_var_or_none("RUNLOOP_TEST_SPACES"), None);
                assert_eq!(
                    env_var_or_none("RUNLOOP_TEST_PADDED"),
                    Some("value".to_string())
                );
                assert_eq!(env_var_or_none("RUNLOOP_TEST_UNSET_VAR"), None);
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_reads_api_key_and_dev_environment() {
        temp_env::with_vars(
            [
                ("RUNLOOP_API_KEY", Some("ak_env")),
                ("RUNLOOP_ENV", Some("dev")),
                ("RUNLOOP_BASE_URL", None),
                ("RUNLOOP_TIMEOUT", Some("12")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.environment, Environment::Dev);
                assert_eq!(config.connection.base_url, "https://api.runloop.pro");
                assert_eq!(config.connection.timeout, Duration::from_secs(12));
            },
        );
    }

    #[test]
    #[serial]
    fn test_builder_values_win_over_env() {
        temp_env::with_vars(
            [
                ("RUNLOOP_API_KEY", Some("ak_env")),
                ("RUNLOOP_BASE_URL", Some("https://env.example.com")),
            ],
            || {
                let config = ConfigLoader::new()
                    .with_base_url("https://cli.example.com".to_string())
                    .from_env()
                    .unwrap()
                    .build()
                    .unwrap();
                assert_eq!(config.connection.base_url, "https://cli.example.com");
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_numeric_env_is_reported_with_variable_name() {
        temp_env::with_vars([("RUNLOOP_MAX_RETRIES", Some("many"))], || {
            let err = ConfigLoader::new().from_env().err().unwrap();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "RUNLOOP_MAX_RETRIES")
            );
        });
    }

    #[test]
    #[serial]
    fn test_unknown_theme_is_rejected() {
        temp_env::with_vars([("RUNLOOP_THEME", Some("sparkly"))], || {
            let err = ConfigLoader::new().from_env().err().unwrap();
            assert!(err.to_string().contains("RUNLOOP_THEME"));
        });
    }
}
