//! Blueprint models.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::devboxes::LaunchParameters;
use crate::error::ClientError;

/// Build parameters a blueprint was created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintParameters {
    pub name: Option<String>,
    pub dockerfile: Option<String>,
    pub system_setup_commands: Option<Vec<String>>,
    pub launch_parameters: Option<LaunchParameters>,
}

/// A blueprint (reusable devbox image).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blueprint {
    pub id: String,
    pub name: Option<String>,
    /// Build status (`provisioning`, `building`, `build_complete`, `failed`, ...).
    pub status: Option<String>,
    pub create_time_ms: Option<i64>,
    pub failure_reason: Option<String>,
    pub parameters: Option<BlueprintParameters>,
}

/// Body for `POST /v1/blueprints` and `/v1/blueprints/preview`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateBlueprintRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_setup_commands: Vec<String>,
    #[serde(skip_serializing_if = "LaunchParameters::is_empty")]
    pub launch_parameters: LaunchParameters,
}

impl CreateBlueprintRequest {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Dockerfile the platform would build for a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintPreview {
    pub dockerfile: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintLogEntry {
    pub timestamp_ms: Option<i64>,
    pub level: Option<String>,
    pub message: String,
}

impl BlueprintLogEntry {
    /// Render as `YYYY-MM-DD HH:MM:SS.mmm LEVEL message`.
    pub fn format_line(&self) -> String {
        let time = self
            .timestamp_ms
            .and_then(|ms| Local.timestamp_millis_opt(ms).single())
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
            .unwrap_or_default();
        let level = self.level.as_deref().unwrap_or("info");
        if time.is_empty() {
            format!("{level} {}", self.message)
        } else {
            format!("{time} {level} {}", self.message)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintBuildLogs {
    pub blueprint_id: Option<String>,
    pub logs: Vec<BlueprintLogEntry>,
}
