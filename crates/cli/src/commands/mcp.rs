//! `rl mcp` command.

use anyhow::Result;
use clap::Subcommand;
use tokio::io::BufReader;

use super::CommandContext;
use crate::cancellation::CancellationToken;
use crate::mcp::McpServer;

#[derive(Debug, Subcommand)]
pub enum McpCommand {
    /// Serve Runloop tools over stdio (newline-delimited JSON-RPC)
    Start,
}

pub async fn run(ctx: &CommandContext, command: McpCommand, cancel: &CancellationToken) -> Result<()> {
    match command {
        McpCommand::Start => {
            let server = McpServer::new(ctx.client()?, ctx.metrics_collector());
            server
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), cancel)
                .await
        }
    }
}
