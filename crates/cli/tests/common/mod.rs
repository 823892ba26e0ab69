//! Shared test utilities for `rl` integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that prevents dotenv loading and
//!   the update check.
//!
//! Invariants / Assumptions:
//! - `RUNLOOP_API_KEY` is set to "ak_test" unless overridden.
//! - Retries are disabled so error-path tests finish quickly.

use assert_cmd::Command;

/// Returns a hermetic `rl` command.
pub fn rl_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rl");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("RL_NO_UPDATE_CHECK", "1");
    cmd.env("RUNLOOP_API_KEY", "ak_test");
    cmd.env("RUNLOOP_MAX_RETRIES", "0");

    // Clear potential host leakage
    cmd.env_remove("RUNLOOP_BASE_URL")
        .env_remove("RUNLOOP_ENV")
        .env_remove("RUNLOOP_SSH_PROXY")
        .env_remove("RUNLOOP_METRICS_BIND")
        .env_remove("RUST_LOG");

    cmd
}

/// `rl_cmd()` pointed at a mock server.
#[allow(dead_code)]
pub fn rl_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = rl_cmd();
    cmd.env("RUNLOOP_BASE_URL", base_url);
    cmd
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";
