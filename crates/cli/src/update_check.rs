//! Daily check for a newer `rl` release on crates.io.
//!
//! Responsibilities:
//! - Ask crates.io for the newest stable version at most once a day.
//! - Print a one-line notice on stderr when it is newer than this build.
//!
//! Invariants:
//! - Never fails the command: every error is logged at debug and dropped.
//! - Disabled by `RL_NO_UPDATE_CHECK`.
//! - The stamp file is touched before the request, so an unreachable
//!   registry is not retried on every invocation.

use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use runloop_config::constants::{UPDATE_CHECK_INTERVAL_SECS, UPDATE_CHECK_TIMEOUT_SECS};
use runloop_config::env_var_or_none;
use runloop_config::persistence::update_check_stamp_path;
use serde::Deserialize;
use tracing::debug;

const CRATES_IO_URL: &str = "https://crates.io/api/v1/crates/runloop-cli";

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    max_stable_version: Option<String>,
}

pub async fn maybe_notify() {
    if env_var_or_none("RL_NO_UPDATE_CHECK").is_some() {
        return;
    }
    match check().await {
        Ok(Some(latest)) => eprintln!(
            "A new version of rl is available: {latest} (installed {}). Run `cargo install runloop-cli` to update.",
            env!("CARGO_PKG_VERSION")
        ),
        Ok(None) => {}
        Err(e) => debug!(error = %e, "Update check skipped"),
    }
}

async fn check() -> Result<Option<String>> {
    let stamp = update_check_stamp_path()?;
    if !is_due(&stamp, SystemTime::now()) {
        return Ok(None);
    }
    touch(&stamp)?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(UPDATE_CHECK_TIMEOUT_SECS))
        .user_agent(concat!("rl/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let response: CrateResponse = http
        .get(CRATES_IO_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Unexpected crates.io response")?;

    Ok(response
        .krate
        .max_stable_version
        .filter(|latest| is_newer(latest, env!("CARGO_PKG_VERSION"))))
}

fn is_due(stamp: &Path, now: SystemTime) -> bool {
    let Ok(modified) = std::fs::metadata(stamp).and_then(|m| m.modified()) else {
        return true;
    };
    now.duration_since(modified)
        .map(|age| age >= Duration::from_secs(UPDATE_CHECK_INTERVAL_SECS))
        .unwrap_or(false)
}

fn touch(stamp: &Path) -> Result<()> {
    if let Some(parent) = stamp.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(stamp, b"")?;
    Ok(())
}

fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let core = version.split(['-', '+']).next()?;
    let mut parts = core.split('.').map(|p| p.parse::<u64>().ok());
    Some((parts.next()??, parts.next()??, parts.next().flatten().unwrap_or(0)))
}

fn is_newer(candidate: &str, current: &str) -> bool {
    match (parse_version(candidate), parse_version(current)) {
        (Some(candidate), Some(current)) => candidate > current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison() {
        assert!(is_newer("0.3.0", "0.2.9"));
        assert!(is_newer("1.0.0", "0.99.99"));
        assert!(is_newer("0.2.10", "0.2.9"));
        assert!(!is_newer("0.2.0", "0.2.0"));
        assert!(!is_newer("0.1.5", "0.2.0"));
        assert!(!is_newer("garbage", "0.2.0"));
    }

    #[test]
    fn test_prerelease_suffix_ignored() {
        assert_eq!(parse_version("1.2.3-beta.1"), Some((1, 2, 3)));
        assert_eq!(parse_version("1.2"), Some((1, 2, 0)));
    }

    #[test]
    fn test_stamp_due_after_interval() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = dir.path().join("update-check");
        assert!(is_due(&stamp, SystemTime::now()));

        touch(&stamp).unwrap();
        assert!(!is_due(&stamp, SystemTime::now()));
        let later = SystemTime::now() + Duration::from_secs(UPDATE_CHECK_INTERVAL_SECS + 1);
        assert!(is_due(&stamp, later));
    }
}
