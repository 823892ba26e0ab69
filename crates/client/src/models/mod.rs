//! Data models for Runloop API requests and responses.
//!
//! Models deserialize leniently: optional fields default, unknown fields are
//! ignored, and enums carry an `Unknown` fallback so a new server-side status
//! never breaks a list.

mod benchmarks;
mod blueprints;
mod common;
mod devboxes;
mod gateway_configs;
mod mcp_configs;
mod network_policies;
mod objects;
mod secrets;
mod snapshots;

pub use benchmarks::BenchmarkRun;
pub use blueprints::{
    Blueprint, BlueprintBuildLogs, BlueprintLogEntry, BlueprintPreview, CreateBlueprintRequest,
};
pub use common::{ListParams, Page, format_timestamp_ms};
pub use devboxes::{
    AfterIdle, CreateDevboxRequest, Devbox, DevboxLogEntry, DevboxLogs, DevboxStatus, Execution,
    ExecutionRequest, IdleAction, LaunchParameters, SshKey, UserParameters,
};
pub use gateway_configs::{CreateGatewayConfigRequest, GatewayConfig};
pub use mcp_configs::{CreateMcpConfigRequest, McpConfig};
pub use network_policies::{CreateNetworkPolicyRequest, NetworkPolicy};
pub use objects::{CreateObjectRequest, DownloadUrl, ObjectContentType, StorageObject};
pub use secrets::{CreateSecretRequest, Secret};
pub use snapshots::{DiskSnapshot, SnapshotStatus};
