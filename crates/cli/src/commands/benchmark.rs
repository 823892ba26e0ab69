//! Benchmark run commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use runloop_client::ListParams;
use runloop_tui::ResourceKind;
use tracing::info;

use super::{CommandContext, ListArgs, run_get, run_list};
use crate::cancellation::{CancellationToken, cancellable};

#[derive(Debug, Subcommand)]
pub enum BenchmarkRunCommand {
    /// List benchmark runs
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only runs of this benchmark
        #[arg(long)]
        benchmark_id: Option<String>,
    },

    /// Show one benchmark run
    Get {
        #[arg(long)]
        id: String,
    },

    /// Cancel a running benchmark run
    Cancel {
        #[arg(long)]
        id: String,
    },
}

impl BenchmarkRunCommand {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { list, benchmark_id: None } if list.is_default())
    }
}

pub async fn run(
    ctx: &CommandContext,
    command: BenchmarkRunCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        BenchmarkRunCommand::List { list, benchmark_id } => {
            let params = list.params().filter_opt("benchmark_id", benchmark_id);
            run_list(
                ctx,
                ResourceKind::BenchmarkRuns,
                &list,
                params,
                cancel,
                |client, params: ListParams| async move {
                    client.list_benchmark_runs(&params).await
                },
            )
            .await
        }
        BenchmarkRunCommand::Get { id } => {
            let client = ctx.client()?;
            run_get(ctx, "benchmark run", &id, cancel, client.get_benchmark_run(&id)).await
        }
        BenchmarkRunCommand::Cancel { id } => {
            let client = ctx.client()?;
            info!(run_id = %id, "Cancelling benchmark run");
            let run = cancellable(cancel, client.cancel_benchmark_run(&id))
                .await
                .with_context(|| format!("Failed to cancel benchmark run {id}"))?;
            ctx.print_item(&run)
        }
    }
}
