//! Network policies, gateway configs, and MCP configs.
//!
//! The three share a shape (named config, view, delete) and differ only in
//! columns and client calls.

use runloop_client::{GatewayConfig, McpConfig, NetworkPolicy};

use super::{DELETE, Navigation, ResourceSpec, VIEW, detail, opt, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, ResourceNames};

pub fn policies_spec() -> ResourceSpec<NetworkPolicy> {
    ResourceSpec {
        key: "network-policies",
        title: "Network Policies",
        names: ResourceNames {
            singular: "network policy",
            plural: "network policies",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |p: &NetworkPolicy| p.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |p: &NetworkPolicy| p.name.clone(),
            },
            Column {
                header: "Egress",
                width: ColumnWidth::Fixed(18),
                cell: |p: &NetworkPolicy| {
                    if p.allow_all {
                        "allow all".to_string()
                    } else {
                        format!("{} hosts", p.allowed_hostnames.len())
                    }
                },
            },
            Column {
                header: "Created",
                width: ColumnWidth::Fixed(20),
                cell: |p: &NetworkPolicy| timestamp(p.create_time_ms),
            },
        ],
        item_id: |p: &NetworkPolicy| p.id.as_str(),
        describe: |p: &NetworkPolicy| p.name.clone(),
        searchable: false,
        fetch: |client, params| {
            Box::pin(async move { client.list_network_policies(&params).await })
        },
        operations: |_| vec![VIEW, DELETE],
        execute: |client, operation, policy| {
            Box::pin(async move {
                match operation {
                    "delete" => {
                        client.delete_network_policy(&policy.id).await?;
                        Ok(format!("Deleted network policy {}", policy.name))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, policy| match operation {
            "view" => detail(format!("Network policy {}", policy.name), policy),
            _ => Navigation::None,
        },
    }
}

pub fn gateways_spec() -> ResourceSpec<GatewayConfig> {
    ResourceSpec {
        key: "gateway-configs",
        title: "Gateway Configs",
        names: ResourceNames {
            singular: "gateway config",
            plural: "gateway configs",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |g: &GatewayConfig| g.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Min(16),
                cell: |g: &GatewayConfig| g.name.clone(),
            },
            Column {
                header: "Endpoint",
                width: ColumnWidth::Fill,
                cell: |g: &GatewayConfig| opt(&g.endpoint),
            },
            Column {
                header: "Created",
                width: ColumnWidth::Fixed(20),
                cell: |g: &GatewayConfig| timestamp(g.create_time_ms),
            },
        ],
        item_id: |g: &GatewayConfig| g.id.as_str(),
        describe: |g: &GatewayConfig| g.name.clone(),
        searchable: false,
        fetch: |client, params| Box::pin(async move { client.list_gateway_configs(&params).await }),
        operations: |_| vec![VIEW, DELETE],
        execute: |client, operation, gateway| {
            Box::pin(async move {
                match operation {
                    "delete" => {
                        client.delete_gateway_config(&gateway.id).await?;
                        Ok(format!("Deleted gateway config {}", gateway.name))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, gateway| match operation {
            "view" => detail(format!("Gateway config {}", gateway.name), gateway),
            _ => Navigation::None,
        },
    }
}

pub fn mcp_spec() -> ResourceSpec<McpConfig> {
    ResourceSpec {
        key: "mcp-configs",
        title: "MCP Configs",
        names: ResourceNames {
            singular: "MCP config",
            plural: "MCP configs",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |m: &McpConfig| m.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Min(16),
                cell: |m: &McpConfig| m.name.clone(),
            },
            Column {
                header: "Endpoint",
                width: ColumnWidth::Fill,
                cell: |m: &McpConfig| opt(&m.endpoint),
            },
            Column {
                header: "Tools",
                width: ColumnWidth::Fixed(8),
                cell: |m: &McpConfig| m.allowed_tools.len().to_string(),
            },
        ],
        item_id: |m: &McpConfig| m.id.as_str(),
        describe: |m: &McpConfig| m.name.clone(),
        searchable: false,
        fetch: |client, params| Box::pin(async move { client.list_mcp_configs(&params).await }),
        operations: |_| vec![VIEW, DELETE],
        execute: |client, operation, config| {
            Box::pin(async move {
                match operation {
                    "delete" => {
                        client.delete_mcp_config(&config.id).await?;
                        Ok(format!("Deleted MCP config {}", config.name))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, config| match operation {
            "view" => detail(format!("MCP config {}", config.name), config),
            _ => Navigation::None,
        },
    }
}
