//! Path helpers for files the workspace reads and writes.
//!
//! Responsibilities:
//! - Determine platform-appropriate locations with the `directories` crate.
//! - Honor explicit overrides for the UI state file.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use anyhow::Context;

use crate::loader::env_var_or_none;

/// Returns the path of the persisted UI state file.
///
/// `RUNLOOP_STATE_PATH` overrides the default:
/// - Linux: `~/.config/runloop-tui/state.json`
/// - macOS: `~/Library/Application Support/runloop-tui/state.json`
pub fn default_state_path() -> Result<PathBuf, anyhow::Error> {
    if let Some(path) = env_var_or_none("RUNLOOP_STATE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = directories::ProjectDirs::from("", "", "runloop-tui")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("state.json"))
}

/// Directory for the TUI's rolling log files.
pub fn default_log_dir() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", "runloop-tui")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.data_local_dir().join("logs"))
}

/// Directory holding per-devbox SSH private keys (`~/.runloop/ssh_keys`).
pub fn ssh_key_dir() -> Result<PathBuf, anyhow::Error> {
    let base = directories::BaseDirs::new().context("Failed to determine home directory")?;

    Ok(base.home_dir().join(".runloop").join("ssh_keys"))
}

/// Marker file whose modification time records the last update check
/// (`~/.cache/rl-cli/last_update_check` on Linux).
pub fn update_check_stamp_path() -> Result<PathBuf, anyhow::Error> {
    let base = directories::BaseDirs::new().context("Failed to determine cache directory")?;

    Ok(base.cache_dir().join("rl-cli").join("last_update_check"))
}
