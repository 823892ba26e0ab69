//! Network policy, gateway config, and MCP config commands.
//!
//! The three resources share one argument shape (list/get/delete), so one
//! subcommand enum serves all of them and `run` dispatches on the
//! [`ResourceKind`] it is called for.

use anyhow::{Result, bail};
use clap::Subcommand;
use runloop_client::ListParams;
use runloop_tui::ResourceKind;

use super::{CommandContext, ListArgs, run_delete, run_get, run_list};
use crate::cancellation::CancellationToken;

#[derive(Debug, Subcommand)]
pub enum ConfigResourceCommand {
    /// List resources
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one resource
    Get {
        #[arg(long)]
        id: String,
    },

    /// Delete a resource
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigResourceCommand {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { list } if list.is_default())
    }
}

pub async fn run(
    ctx: &CommandContext,
    kind: ResourceKind,
    command: ConfigResourceCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match (kind, command) {
        (ResourceKind::NetworkPolicies, ConfigResourceCommand::List { list }) => {
            let params = list.params();
            run_list(ctx, kind, &list, params, cancel, |client, params: ListParams| async move {
                client.list_network_policies(&params).await
            })
            .await
        }
        (ResourceKind::GatewayConfigs, ConfigResourceCommand::List { list }) => {
            let params = list.params();
            run_list(ctx, kind, &list, params, cancel, |client, params: ListParams| async move {
                client.list_gateway_configs(&params).await
            })
            .await
        }
        (ResourceKind::McpConfigs, ConfigResourceCommand::List { list }) => {
            let params = list.params();
            run_list(ctx, kind, &list, params, cancel, |client, params: ListParams| async move {
                client.list_mcp_configs(&params).await
            })
            .await
        }

        (ResourceKind::NetworkPolicies, ConfigResourceCommand::Get { id }) => {
            let client = ctx.client()?;
            run_get(ctx, "network policy", &id, cancel, client.get_network_policy(&id)).await
        }
        (ResourceKind::GatewayConfigs, ConfigResourceCommand::Get { id }) => {
            let client = ctx.client()?;
            run_get(ctx, "gateway config", &id, cancel, client.get_gateway_config(&id)).await
        }
        (ResourceKind::McpConfigs, ConfigResourceCommand::Get { id }) => {
            let client = ctx.client()?;
            run_get(ctx, "MCP config", &id, cancel, client.get_mcp_config(&id)).await
        }

        (ResourceKind::NetworkPolicies, ConfigResourceCommand::Delete { id, force }) => {
            let client = ctx.client()?;
            run_delete(ctx, "network policy", &id, force, cancel, || {
                client.delete_network_policy(&id)
            })
            .await
        }
        (ResourceKind::GatewayConfigs, ConfigResourceCommand::Delete { id, force }) => {
            let client = ctx.client()?;
            run_delete(ctx, "gateway config", &id, force, cancel, || {
                client.delete_gateway_config(&id)
            })
            .await
        }
        (ResourceKind::McpConfigs, ConfigResourceCommand::Delete { id, force }) => {
            let client = ctx.client()?;
            run_delete(ctx, "MCP config", &id, force, cancel, || {
                client.delete_mcp_config(&id)
            })
            .await
        }

        (other, _) => bail!("{} are not a config resource", other.title()),
    }
}
