//! CLI command implementations.
//!
//! Responsibilities:
//! - Hold per-invocation context (config, output format, flags).
//! - Provide the shared list/get/delete runners every resource command uses.
//!
//! Does NOT handle:
//! - Argument parsing (see `args`) or exit codes (see `error`).
//!
//! Invariants:
//! - Every API call is awaited through `cancellable`, so Ctrl+C ends it.
//! - A plain list on a terminal with no `--output` opens the interactive
//!   browser on that resource instead of printing.

pub mod benchmark;
pub mod blueprint;
pub mod completions;
pub mod devbox;
pub mod mcp;
pub mod network;
pub mod object;
pub mod secret;
pub mod snapshot;

use std::future::Future;

use anyhow::{Context, Result};
use clap::Args;
use runloop_client::{ListParams, MetricsCollector, Page, RunloopClient};
use runloop_config::Config;
use runloop_config::constants::DEFAULT_LIST_LIMIT;
use runloop_tui::{ResourceKind, RunOptions};
use serde::Serialize;
use tracing::info;

use crate::cancellation::{CancellationToken, cancellable};
use crate::formatters::{OutputFormat, Tabular, format_item, format_page, output_result};

/// Everything a command needs besides its own arguments.
pub struct CommandContext {
    pub config: Config,
    pub output: Option<String>,
    pub quiet: bool,
    /// Metrics exporter installed by `main`.
    pub metrics: bool,
    pub metrics_bind: Option<String>,
    /// Plain list commands open the interactive browser.
    pub interactive: bool,
}

impl CommandContext {
    pub fn client(&self) -> Result<RunloopClient> {
        RunloopClient::builder()
            .from_config(&self.config)
            .metrics(self.metrics_collector())
            .build()
            .context("Failed to build Runloop client")
    }

    pub fn metrics_collector(&self) -> MetricsCollector {
        if self.metrics {
            MetricsCollector::new()
        } else {
            MetricsCollector::disabled()
        }
    }

    pub fn format(&self) -> Result<OutputFormat> {
        match self.output.as_deref() {
            Some(raw) => OutputFormat::from_str(raw),
            None => Ok(OutputFormat::Text),
        }
    }

    pub fn print_item<T: Serialize + Tabular>(&self, item: &T) -> Result<()> {
        output_result(&format_item(item, self.format()?)?);
        Ok(())
    }

    /// Confirmation line for mutating commands; suppressed for structured
    /// output so stdout stays parseable.
    pub fn notice(&self, message: impl AsRef<str>) -> Result<()> {
        if self.format()? == OutputFormat::Text {
            println!("{}", message.as_ref());
        }
        Ok(())
    }
}

/// Pagination flags shared by every list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Maximum number of items to return
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub limit: usize,

    /// Return items after this ID (cursor from a previous page)
    #[arg(long)]
    pub starting_after: Option<String>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
}

impl ListArgs {
    pub fn params(&self) -> ListParams {
        ListParams::new()
            .limit(self.limit)
            .starting_after(self.starting_after.clone())
            .search(self.search.clone())
    }

    /// No flag changed from its default.
    pub fn is_default(&self) -> bool {
        self.limit == DEFAULT_LIST_LIMIT && self.starting_after.is_none() && self.search.is_none()
    }
}

/// Fetch and print one page, or open the browser for a plain list.
pub async fn run_list<T, F, Fut>(
    ctx: &CommandContext,
    kind: ResourceKind,
    args: &ListArgs,
    params: ListParams,
    cancel: &CancellationToken,
    fetch: F,
) -> Result<()>
where
    T: Serialize + Tabular,
    F: FnOnce(RunloopClient, ListParams) -> Fut,
    Fut: Future<Output = runloop_client::Result<Page<T>>>,
{
    if ctx.interactive {
        info!(resource = kind.key(), "Opening interactive browser");
        return runloop_tui::run(RunOptions {
            config: ctx.config.clone(),
            log_dir: None,
            metrics_bind: ctx.metrics_bind.clone(),
            resource: Some(kind),
            fresh: false,
        })
        .await;
    }

    info!(resource = kind.key(), limit = args.limit, "Listing");
    let format = ctx.format()?;
    let client = ctx.client()?;
    let page = cancellable(cancel, fetch(client, params))
        .await
        .with_context(|| format!("Failed to list {}", kind.key()))?;

    let plural = kind.title().to_lowercase();
    output_result(&format_page(
        &page,
        &plural,
        args.starting_after.is_none(),
        format,
    )?);
    Ok(())
}

/// Fetch and print one resource.
pub async fn run_get<T, Fut>(
    ctx: &CommandContext,
    what: &str,
    id: &str,
    cancel: &CancellationToken,
    fetch: Fut,
) -> Result<()>
where
    T: Serialize + Tabular,
    Fut: Future<Output = runloop_client::Result<T>>,
{
    let item = cancellable(cancel, fetch)
        .await
        .with_context(|| format!("Failed to get {what} {id}"))?;
    ctx.print_item(&item)
}

/// Confirm (unless forced), delete, and report.
pub async fn run_delete<Fut>(
    ctx: &CommandContext,
    what: &str,
    id: &str,
    force: bool,
    cancel: &CancellationToken,
    delete: impl FnOnce() -> Fut,
) -> Result<()>
where
    Fut: Future<Output = runloop_client::Result<()>>,
{
    if !force && !crate::interactive::confirm_delete(id, what)? {
        return Ok(());
    }

    info!(what, id, "Deleting");
    cancellable(cancel, delete())
        .await
        .with_context(|| format!("Failed to delete {what} {id}"))?;
    ctx.notice(format!("Deleted {what} {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args(limit: usize, search: Option<&str>) -> ListArgs {
        ListArgs {
            limit,
            starting_after: None,
            search: search.map(str::to_string),
        }
    }

    #[test]
    fn test_list_args_default_detection() {
        assert!(list_args(DEFAULT_LIST_LIMIT, None).is_default());
        assert!(!list_args(5, None).is_default());
        assert!(!list_args(DEFAULT_LIST_LIMIT, Some("web")).is_default());
    }

    #[test]
    fn test_list_args_params() {
        let params = list_args(5, Some("web")).params();
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.search.as_deref(), Some("web"));
        assert!(params.starting_after.is_none());
    }
}
