//! Persisted UI state and its on-disk store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::create_corrupt_backup;
use super::path::default_state_path;
use crate::types::ColorTheme;

/// User preferences that persist across application runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Persisted UI theme selection.
    pub selected_theme: ColorTheme,
    /// Resource list that was open when the TUI last exited.
    pub last_resource: Option<String>,
}

/// Reads and writes `PersistedState` at a fixed path.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: PersistedState,
}

impl StateStore {
    /// Open the store at the default platform path.
    pub fn new() -> Result<Self> {
        Ok(Self::open(default_state_path()?))
    }

    /// Open the store at `path`.
    ///
    /// A missing file yields defaults. A file that cannot be parsed is moved
    /// aside with a `.corrupt.<timestamp>` extension and defaults are used.
    pub fn open(path: PathBuf) -> Self {
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Corrupt state file, using defaults");
                    if let Err(backup_err) = create_corrupt_backup(&path) {
                        tracing::warn!(error = %backup_err, "Failed to back up corrupt state file");
                    }
                    PersistedState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedState::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable state file, using defaults");
                PersistedState::default()
            }
        };

        Self { path, state }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the loaded state.
    pub fn load(&self) -> PersistedState {
        self.state.clone()
    }

    /// Saves `state` to disk atomically.
    pub fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let temp_path = self.path.with_extension("tmp");
        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&temp_path, content).context("Failed to write temporary state file")?;
        std::fs::rename(&temp_path, &self.path).context("Failed to replace state file")?;

        self.state = state.clone();
        Ok(())
    }
}
