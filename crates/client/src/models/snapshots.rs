//! Disk snapshot models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskSnapshot {
    pub id: String,
    pub name: Option<String>,
    pub create_time_ms: Option<i64>,
    pub source_devbox_id: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Progress of an asynchronous snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotStatus {
    /// `in_progress`, `complete`, `error`, ...
    pub status: String,
    pub error_message: Option<String>,
    pub snapshot: Option<DiskSnapshot>,
}
