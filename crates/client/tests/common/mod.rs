//! Common test utilities for client integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Test clients never retry unless a test opts in
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;

use secrecy::SecretString;

pub use runloop_client::{ClientError, ListParams, RunloopClient};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "ak_test_123";

/// Load a JSON fixture from `fixtures/<name>`.
pub fn load_fixture(name: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("invalid fixture {name}: {e}"))
}

/// Client pointed at `server` with retries disabled.
pub fn test_client(server: &MockServer) -> RunloopClient {
    test_client_with_retries(server, 0)
}

pub fn test_client_with_retries(server: &MockServer, retries: usize) -> RunloopClient {
    RunloopClient::builder()
        .base_url(server.uri())
        .api_key(SecretString::new(TEST_API_KEY.to_string().into()))
        .max_retries(retries)
        .build()
        .expect("client should build")
}
