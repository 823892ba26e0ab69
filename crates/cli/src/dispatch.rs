//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - Every command except `completions` runs with a loaded configuration.
//! - All commands receive the process-wide cancellation token.

use anyhow::{Result, anyhow};
use runloop_tui::ResourceKind;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands::{self, CommandContext};

pub(crate) async fn run_command(
    cli: Cli,
    ctx: Option<CommandContext>,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell);
    }

    let ctx = ctx.ok_or_else(|| anyhow!("configuration was not loaded"))?;
    match cli.command {
        Commands::Devbox { command } => commands::devbox::run(&ctx, command, cancel).await,
        Commands::Blueprint { command } => commands::blueprint::run(&ctx, command, cancel).await,
        Commands::Snapshot { command } => commands::snapshot::run(&ctx, command, cancel).await,
        Commands::Secret { command } => commands::secret::run(&ctx, command, cancel).await,
        Commands::NetworkPolicy { command } => {
            commands::network::run(&ctx, ResourceKind::NetworkPolicies, command, cancel).await
        }
        Commands::GatewayConfig { command } => {
            commands::network::run(&ctx, ResourceKind::GatewayConfigs, command, cancel).await
        }
        Commands::McpConfig { command } => {
            commands::network::run(&ctx, ResourceKind::McpConfigs, command, cancel).await
        }
        Commands::Object { command } => commands::object::run(&ctx, command, cancel).await,
        Commands::BenchmarkRun { command } => commands::benchmark::run(&ctx, command, cancel).await,
        Commands::Mcp { command } => commands::mcp::run(&ctx, command, cancel).await,
        Commands::Completions { .. } => Ok(()),
    }
}
