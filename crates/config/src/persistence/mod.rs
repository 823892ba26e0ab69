//! Persistence for user preferences and well-known local paths.
//!
//! Responsibilities:
//! - Read and write `PersistedState` (theme, last opened resource) as JSON.
//! - Resolve platform paths for state, logs, SSH keys, and the update-check stamp.
//! - Back up corrupt state files before they are overwritten.
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader`).
//! - Storing credentials; the API key only ever comes from env or flags.
//!
//! Invariants:
//! - A corrupt or unreadable state file never blocks startup.
//! - Writes are atomic (temporary file + rename).

use std::path::{Path, PathBuf};

mod path;
mod state;

pub use path::{default_log_dir, default_state_path, ssh_key_dir, update_check_stamp_path};
pub use state::{PersistedState, StateStore};

/// Renames a corrupt file to `<name>.corrupt.<unix-seconds>` and returns the new path.
pub(crate) fn create_corrupt_backup(path: &Path) -> Result<PathBuf, std::io::Error> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let backup_path = path.with_extension(format!("corrupt.{}", timestamp));
    std::fs::rename(path, &backup_path)?;

    Ok(backup_path)
}
