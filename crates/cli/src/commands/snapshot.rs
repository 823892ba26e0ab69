//! Disk snapshot commands.
//!
//! Responsibilities:
//! - List snapshots (optionally for one source devbox).
//! - Report the status of an asynchronous snapshot.
//! - Delete snapshots after confirmation.

use anyhow::{Context, Result};
use clap::Subcommand;
use runloop_client::{ListParams, SnapshotStatus};
use runloop_tui::ResourceKind;

use super::{CommandContext, ListArgs, run_delete, run_list};
use crate::cancellation::{CancellationToken, cancellable};
use crate::formatters::{OutputFormat, format_value, output_result, render_detail};

#[derive(Debug, Subcommand)]
pub enum SnapshotCommand {
    /// List disk snapshots
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only snapshots taken from this devbox
        #[arg(long)]
        devbox_id: Option<String>,
    },

    /// Show the status of an asynchronous snapshot
    Status {
        #[arg(long)]
        id: String,
    },

    /// Delete a snapshot
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl SnapshotCommand {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { list, devbox_id: None } if list.is_default())
    }
}

pub async fn run(
    ctx: &CommandContext,
    command: SnapshotCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        SnapshotCommand::List { list, devbox_id } => {
            let params = list.params().filter_opt("devbox_id", devbox_id);
            run_list(
                ctx,
                ResourceKind::Snapshots,
                &list,
                params,
                cancel,
                |client, params: ListParams| async move { client.list_snapshots(&params).await },
            )
            .await
        }
        SnapshotCommand::Status { id } => print_status(ctx, &id, cancel).await,
        SnapshotCommand::Delete { id, force } => {
            let client = ctx.client()?;
            run_delete(ctx, "snapshot", &id, force, cancel, || {
                client.delete_snapshot(&id)
            })
            .await
        }
    }
}

/// Shared with `devbox snapshot-status`.
pub(crate) async fn print_status(
    ctx: &CommandContext,
    id: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = ctx.client()?;
    let status = cancellable(cancel, client.get_snapshot_status(id))
        .await
        .with_context(|| format!("Failed to get status of snapshot {id}"))?;

    match ctx.format()? {
        OutputFormat::Text => output_result(&render_status(id, &status)),
        format => output_result(&format_value(&status, format)?),
    }
    Ok(())
}

fn render_status(id: &str, status: &SnapshotStatus) -> String {
    let mut lines = vec![format!("Snapshot {id}: {}", status.status)];
    if let Some(message) = status.error_message.as_deref().filter(|m| !m.is_empty()) {
        lines.push(format!("Error: {message}"));
    }
    if let Some(snapshot) = &status.snapshot {
        lines.push(String::new());
        lines.push(render_detail(snapshot));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_status_includes_error() {
        let status = SnapshotStatus {
            status: "error".into(),
            error_message: Some("disk full".into()),
            snapshot: None,
        };
        assert_eq!(
            render_status("snp_1", &status),
            "Snapshot snp_1: error\nError: disk full"
        );
    }

    #[test]
    fn test_render_status_in_progress() {
        let status = SnapshotStatus {
            status: "in_progress".into(),
            ..SnapshotStatus::default()
        };
        assert_eq!(render_status("snp_1", &status), "Snapshot snp_1: in_progress");
    }
}
