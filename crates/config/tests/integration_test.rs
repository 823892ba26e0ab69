//! End-to-end configuration loading through the public API.

use std::time::Duration;

use runloop_config::{ColorTheme, ConfigError, ConfigLoader, Environment};
use serial_test::serial;

const RUNLOOP_VARS: [&str; 8] = [
    "RUNLOOP_API_KEY",
    "RUNLOOP_ENV",
    "RUNLOOP_BASE_URL",
    "RUNLOOP_SSH_PROXY",
    "RUNLOOP_TIMEOUT",
    "RUNLOOP_MAX_RETRIES",
    "RUNLOOP_POLL_INTERVAL_MS",
    "RUNLOOP_THEME",
];

fn with_clean_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = RUNLOOP_VARS
        .iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| *v);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

#[test]
#[serial]
fn test_missing_api_key_is_reported() {
    with_clean_env(&[], || {
        let err = ConfigLoader::new().from_env().unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("RUNLOOP_API_KEY"));
    });
}

#[test]
#[serial]
fn test_full_environment_is_applied() {
    with_clean_env(
        &[
            ("RUNLOOP_API_KEY", "ak_full"),
            ("RUNLOOP_ENV", "dev"),
            ("RUNLOOP_SSH_PROXY", "ssh.example.com:2222"),
            ("RUNLOOP_TIMEOUT", "45"),
            ("RUNLOOP_MAX_RETRIES", "5"),
            ("RUNLOOP_POLL_INTERVAL_MS", "2500"),
            ("RUNLOOP_THEME", "dark"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.environment, Environment::Dev);
            assert_eq!(config.connection.base_url, "https://api.runloop.pro");
            assert_eq!(config.connection.ssh_proxy, "ssh.example.com:2222");
            assert_eq!(config.connection.timeout, Duration::from_secs(45));
            assert_eq!(config.connection.max_retries, 5);
            assert_eq!(config.poll_interval, Duration::from_millis(2500));
            assert_eq!(config.theme, Some(ColorTheme::Dark));
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_loading() {
    temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}

#[test]
#[serial]
fn test_api_key_is_redacted_in_debug_output() {
    with_clean_env(&[("RUNLOOP_API_KEY", "ak_supersecret")], || {
        let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ak_supersecret"));
    });
}
