//! Property-based tests for configuration building.
//!
//! Test coverage:
//! - Any valid http(s) base URL is accepted and normalized without a trailing slash.
//! - Any API key survives the builder unchanged.
//! - Retry counts are accepted exactly up to the configured ceiling.

use proptest::prelude::*;
use secrecy::ExposeSecret;

use runloop_config::constants::MAX_MAX_RETRIES;
use runloop_config::{ConfigError, ConfigLoader};

fn base_url_strategy() -> impl Strategy<Value = String> {
    let scheme = prop_oneof![Just("http"), Just("https")];
    let host = prop_oneof![
        Just("localhost"),
        Just("api.runloop.ai"),
        Just("api.runloop.pro"),
        Just("gateway.internal.local"),
    ];
    let port = prop::option::of(1024u16..=65535u16);
    let trailing = prop::bool::ANY;

    (scheme, host, port, trailing).prop_map(|(scheme, host, port, trailing)| {
        let mut url = match port {
            Some(p) => format!("{scheme}://{host}:{p}"),
            None => format!("{scheme}://{host}"),
        };
        if trailing {
            url.push('/');
        }
        url
    })
}

proptest! {
    #[test]
    fn prop_base_url_is_normalized(url in base_url_strategy()) {
        let config = ConfigLoader::new()
            .with_api_key("ak_prop".to_string())
            .with_base_url(url.clone())
            .build()
            .unwrap();

        prop_assert!(!config.connection.base_url.ends_with('/'));
        prop_assert_eq!(config.connection.base_url, url.trim_end_matches('/'));
    }

    #[test]
    fn prop_api_key_is_preserved(key in "ak_[a-zA-Z0-9_]{8,48}") {
        let config = ConfigLoader::new().with_api_key(key.clone()).build().unwrap();
        prop_assert_eq!(config.auth.api_key.expose_secret(), key.as_str());
    }

    #[test]
    fn prop_retry_ceiling_is_enforced(retries in 0usize..=(MAX_MAX_RETRIES * 2)) {
        let result = ConfigLoader::new()
            .with_api_key("ak_prop".to_string())
            .with_max_retries(retries)
            .build();

        if retries <= MAX_MAX_RETRIES {
            prop_assert_eq!(result.unwrap().connection.max_retries, retries);
        } else {
            let is_retry_error = matches!(result, Err(ConfigError::InvalidMaxRetries { .. }));
            prop_assert!(is_retry_error);
        }
    }
}
