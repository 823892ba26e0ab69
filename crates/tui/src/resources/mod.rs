//! Resource catalog: one [`ResourceSpec`] per browsable Runloop resource.
//!
//! Responsibilities:
//! - Declare columns, search support, and operations for each resource.
//! - Bind list fetches and operations to `RunloopClient` calls.
//!
//! Does NOT handle:
//! - Interaction state (see `crate::engine`).
//! - Drawing (see `crate::ui`).
//!
//! Invariants:
//! - Operation ids are unique within a resource.
//! - Every operation listed by `operations` is handled by `execute` (for
//!   non-navigational ids) or `navigate` (for navigational ids).

use std::sync::Arc;

use futures_util::future::BoxFuture;
use runloop_client::models::format_timestamp_ms;
use runloop_client::{ClientError, ListParams, Page, RunloopClient};
use serde::Serialize;

use crate::engine::{Column, OperationSpec, ResourceNames};

pub mod benchmarks;
pub mod blueprints;
pub mod devboxes;
pub mod network;
pub mod objects;
pub mod secrets;
pub mod snapshots;

pub type FetchFn<T> =
    fn(Arc<RunloopClient>, ListParams) -> BoxFuture<'static, runloop_client::Result<Page<T>>>;
pub type ExecuteFn<T> =
    fn(Arc<RunloopClient>, &'static str, T) -> BoxFuture<'static, Result<String, ClientError>>;
pub type NavigateFn<T> = fn(Arc<RunloopClient>, &'static str, &T) -> Navigation;

/// Where a navigational operation leads.
pub enum Navigation {
    /// Static content rendered immediately.
    Detail { title: String, body: String },
    /// Content that must be fetched first (logs and similar).
    Fetch {
        title: String,
        load: BoxFuture<'static, Result<String, String>>,
    },
    /// Hand the terminal to an SSH session.
    Ssh { devbox_id: String },
    None,
}

pub struct ResourceSpec<T> {
    pub key: &'static str,
    pub title: &'static str,
    pub names: ResourceNames,
    pub columns: Vec<Column<T>>,
    pub item_id: fn(&T) -> &str,
    pub describe: fn(&T) -> String,
    pub searchable: bool,
    pub fetch: FetchFn<T>,
    pub operations: fn(&T) -> Vec<OperationSpec>,
    pub execute: ExecuteFn<T>,
    pub navigate: NavigateFn<T>,
}

/// Every resource reachable from the home menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Devboxes,
    Blueprints,
    Snapshots,
    Objects,
    Secrets,
    NetworkPolicies,
    GatewayConfigs,
    McpConfigs,
    BenchmarkRuns,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        Self::Devboxes,
        Self::Blueprints,
        Self::Snapshots,
        Self::Objects,
        Self::Secrets,
        Self::NetworkPolicies,
        Self::GatewayConfigs,
        Self::McpConfigs,
        Self::BenchmarkRuns,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Devboxes => "devboxes",
            Self::Blueprints => "blueprints",
            Self::Snapshots => "snapshots",
            Self::Objects => "objects",
            Self::Secrets => "secrets",
            Self::NetworkPolicies => "network-policies",
            Self::GatewayConfigs => "gateway-configs",
            Self::McpConfigs => "mcp-configs",
            Self::BenchmarkRuns => "benchmark-runs",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Devboxes => "Devboxes",
            Self::Blueprints => "Blueprints",
            Self::Snapshots => "Snapshots",
            Self::Objects => "Storage Objects",
            Self::Secrets => "Secrets",
            Self::NetworkPolicies => "Network Policies",
            Self::GatewayConfigs => "Gateway Configs",
            Self::McpConfigs => "MCP Configs",
            Self::BenchmarkRuns => "Benchmark Runs",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Menu shortcut on the home screen.
    pub fn shortcut(self) -> char {
        match self {
            Self::Devboxes => 'd',
            Self::Blueprints => 'b',
            Self::Snapshots => 's',
            Self::Objects => 'o',
            Self::Secrets => 'e',
            Self::NetworkPolicies => 'n',
            Self::GatewayConfigs => 'g',
            Self::McpConfigs => 'm',
            Self::BenchmarkRuns => 'r',
        }
    }

    /// Build the list screen for this resource.
    pub fn open(self, rows: u16) -> Box<dyn crate::screens::Screen> {
        use crate::screens::ListScreen;
        match self {
            Self::Devboxes => Box::new(ListScreen::new(devboxes::spec(), rows)),
            Self::Blueprints => Box::new(ListScreen::new(blueprints::spec(), rows)),
            Self::Snapshots => Box::new(ListScreen::new(snapshots::spec(), rows)),
            Self::Objects => Box::new(ListScreen::new(objects::spec(), rows)),
            Self::Secrets => Box::new(ListScreen::new(secrets::spec(), rows)),
            Self::NetworkPolicies => Box::new(ListScreen::new(network::policies_spec(), rows)),
            Self::GatewayConfigs => Box::new(ListScreen::new(network::gateways_spec(), rows)),
            Self::McpConfigs => Box::new(ListScreen::new(network::mcp_spec(), rows)),
            Self::BenchmarkRuns => Box::new(ListScreen::new(benchmarks::spec(), rows)),
        }
    }
}

/// Shared `view` operation.
pub const VIEW: OperationSpec = OperationSpec::navigational("view", "View details", 'v');
/// Shared `delete` operation.
pub const DELETE: OperationSpec = OperationSpec::destructive("delete", "Delete", 'd');

/// YAML rendering of an item for the detail screen.
pub fn detail<T: Serialize>(title: String, item: &T) -> Navigation {
    let body = serde_yaml::to_string(item).unwrap_or_else(|e| format!("<unrenderable: {e}>"));
    Navigation::Detail { title, body }
}

pub(crate) fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

pub(crate) fn timestamp(ms: Option<i64>) -> String {
    ms.map(format_timestamp_ms).unwrap_or_else(|| "-".to_string())
}

pub(crate) fn unknown_operation(operation: &str) -> ClientError {
    ClientError::validation("operation", format!("'{operation}' is not supported here"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_key() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ResourceKind::from_key("clusters"), None);
    }

    #[test]
    fn test_menu_shortcuts_are_unique() {
        let mut seen: Vec<char> = ResourceKind::ALL.iter().map(|k| k.shortcut()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_operation_ids_unique_and_shortcuts_unique_per_item() {
        fn check(ops: Vec<OperationSpec>) {
            let mut ids: Vec<_> = ops.iter().map(|o| o.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), ops.len());
            let mut keys: Vec<_> = ops.iter().filter_map(|o| o.shortcut).collect();
            let n = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), n);
        }
        for status in ["running", "suspended", "failure"] {
            let devbox: runloop_client::Devbox =
                serde_json::from_value(serde_json::json!({"id": "d", "status": status})).unwrap();
            check((devboxes::spec().operations)(&devbox));
        }
        check((blueprints::spec().operations)(&Default::default()));
        check((objects::spec().operations)(&Default::default()));
        check((benchmarks::spec().operations)(&Default::default()));
    }

    #[test]
    fn test_detail_renders_yaml() {
        #[derive(Serialize)]
        struct Item {
            id: &'static str,
            size: u32,
        }
        match detail("Item".into(), &Item { id: "x", size: 3 }) {
            Navigation::Detail { body, .. } => {
                assert!(body.contains("id: x"));
                assert!(body.contains("size: 3"));
            }
            _ => panic!("expected detail"),
        }
    }
}
