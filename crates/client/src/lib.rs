//! Runloop REST API client.
//!
//! This crate provides a typed async client for the Runloop platform API:
//! devboxes, blueprints, disk snapshots, secrets, network policies, gateway
//! configs, MCP configs, object storage, and benchmark runs. Every list
//! endpoint is cursor paginated and returns a [`Page`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod ssh;

pub use client::RunloopClient;
pub use client::builder::RunloopClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    AfterIdle, BenchmarkRun, Blueprint, BlueprintBuildLogs, BlueprintLogEntry, BlueprintPreview,
    CreateBlueprintRequest, CreateDevboxRequest, CreateGatewayConfigRequest,
    CreateMcpConfigRequest, CreateNetworkPolicyRequest, CreateObjectRequest, CreateSecretRequest,
    Devbox, DevboxLogEntry, DevboxLogs, DevboxStatus, DiskSnapshot, DownloadUrl, Execution,
    ExecutionRequest, GatewayConfig, IdleAction, LaunchParameters, ListParams, McpConfig,
    NetworkPolicy, ObjectContentType, Page, Secret, SnapshotStatus, SshKey, StorageObject,
    UserParameters,
};
