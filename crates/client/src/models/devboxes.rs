//! Devbox models: the devbox itself, launch parameters, executions, logs,
//! and SSH credentials.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Lifecycle status reported for a devbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DevboxStatus {
    Provisioning,
    Initializing,
    Running,
    Suspending,
    Suspended,
    Resuming,
    Failure,
    Shutdown,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DevboxStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provisioning => "provisioning",
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Suspending => "suspending",
            Self::Suspended => "suspended",
            Self::Resuming => "resuming",
            Self::Failure => "failure",
            Self::Shutdown => "shutdown",
            Self::Unknown => "unknown",
        }
    }

    /// States from which a devbox will not become `running` on its own.
    pub fn is_unreachable(self) -> bool {
        matches!(self, Self::Failure | Self::Shutdown | Self::Suspended)
    }
}

impl fmt::Display for DevboxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a devbox does once it has been idle for `idle_time_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleAction {
    Shutdown,
    Suspend,
}

impl FromStr for IdleAction {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shutdown" => Ok(Self::Shutdown),
            "suspend" => Ok(Self::Suspend),
            other => Err(ClientError::validation(
                "idle_action",
                format!("expected 'shutdown' or 'suspend', got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterIdle {
    pub idle_time_seconds: u64,
    pub on_idle: IdleAction,
}

/// Login user for a devbox or blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserParameters {
    pub username: String,
    pub uid: u32,
}

impl UserParameters {
    pub fn root() -> Self {
        Self {
            username: "root".to_string(),
            uid: 0,
        }
    }
}

impl FromStr for UserParameters {
    type Err = ClientError;

    /// Parse `name:uid`, e.g. `ubuntu:1000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, uid) = s
            .split_once(':')
            .ok_or_else(|| ClientError::validation("user", "expected format name:uid"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::validation("user", "username must not be empty"));
        }
        let uid = uid.trim().parse::<u32>().map_err(|_| {
            ClientError::validation("user", format!("uid must be a non-negative integer, got '{uid}'"))
        })?;
        Ok(Self {
            username: name.to_string(),
            uid,
        })
    }
}

/// Launch-time configuration shared by devboxes and blueprints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_size_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_commands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_ports: Option<Vec<u16>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive_time_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_idle: Option<AfterIdle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_parameters: Option<UserParameters>,
}

impl LaunchParameters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A devbox as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Devbox {
    pub id: String,
    pub name: Option<String>,
    pub status: DevboxStatus,
    pub create_time_ms: Option<i64>,
    pub end_time_ms: Option<i64>,
    pub blueprint_id: Option<String>,
    pub snapshot_id: Option<String>,
    pub failure_reason: Option<String>,
    pub shutdown_reason: Option<String>,
    pub launch_parameters: Option<LaunchParameters>,
    pub metadata: BTreeMap<String, String>,
}

impl Devbox {
    /// SSH login user: the configured username, else the platform default.
    pub fn ssh_user(&self) -> &str {
        self.launch_parameters
            .as_ref()
            .and_then(|p| p.user_parameters.as_ref())
            .map(|u| u.username.as_str())
            .unwrap_or(runloop_config::constants::DEFAULT_SSH_USER)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Body for `POST /v1/devboxes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDevboxRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blueprint_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blueprint_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub code_mounts: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "LaunchParameters::is_empty")]
    pub launch_parameters: LaunchParameters,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl CreateDevboxRequest {
    /// Reject combinations the API would refuse, before any request is sent.
    pub fn validate(&self) -> Result<(), ClientError> {
        let uses_blueprint = self.blueprint_id.is_some() || self.blueprint_name.is_some();
        if uses_blueprint && self.launch_parameters.architecture.is_some() {
            return Err(ClientError::validation(
                "architecture",
                "cannot be specified when using a blueprint (blueprint_id or blueprint_name)",
            ));
        }
        if self.blueprint_id.is_some() && self.blueprint_name.is_some() {
            return Err(ClientError::validation(
                "blueprint",
                "pass either blueprint_id or blueprint_name, not both",
            ));
        }
        Ok(())
    }
}

/// Body for the execute endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_name: Option<String>,
}

/// Result (or in-progress state) of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Execution {
    pub execution_id: Option<String>,
    pub devbox_id: Option<String>,
    pub status: Option<String>,
    pub exit_status: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// One devbox log line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevboxLogEntry {
    pub timestamp_ms: Option<i64>,
    pub source: Option<String>,
    pub level: Option<String>,
    pub cmd: Option<String>,
    pub message: Option<String>,
    pub exit_code: Option<i32>,
}

impl DevboxLogEntry {
    /// Render as `YYYY-MM-DD HH:MM:SS.mmm [source] -> cmd`, with two-space
    /// indented messages and `-> exit_code=N` for command exits.
    pub fn format_line(&self) -> String {
        let time = self
            .timestamp_ms
            .filter(|ms| *ms > 0)
            .and_then(|ms| Local.timestamp_millis_opt(ms).single())
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
            .unwrap_or_default();
        let source = self
            .source
            .as_deref()
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();

        if let Some(cmd) = &self.cmd {
            format!("{time}{source} -> {cmd}")
        } else if let Some(message) = &self.message {
            format!("{time}{source}  {message}")
        } else if let Some(code) = self.exit_code {
            format!("{time}{source} -> exit_code={code}")
        } else {
            format!("{time}{source}")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevboxLogs {
    pub logs: Vec<DevboxLogEntry>,
}

/// SSH credentials minted for a devbox.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SshKey {
    pub id: Option<String>,
    pub ssh_private_key: String,
    /// Hostname used as the TLS SNI through the SSH proxy.
    pub url: String,
}

impl fmt::Debug for SshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshKey")
            .field("id", &self.id)
            .field("ssh_private_key", &"[REDACTED]")
            .field("url", &self.url)
            .finish()
    }
}
