//! Runloop TUI - terminal user interface for Runloop.
//!
//! Responsibilities:
//! - Parse arguments and load configuration.
//! - Hand off to [`runloop_tui::run`].
//!
//! Does NOT handle:
//! - The event loop or terminal state (see `runloop_tui::runtime`).
//!
//! Invariants:
//! - `.env` is read before `RUNLOOP_*` variables.

use anyhow::Result;
use clap::Parser;
use runloop_config::ConfigLoader;
use runloop_tui::cli::Cli;
use runloop_tui::{RunOptions, run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new().load_dotenv()?;
    if let Some(key) = cli.api_key {
        loader = loader.with_api_key(key);
    }
    if let Some(url) = cli.base_url {
        loader = loader.with_base_url(url);
    }
    let config = loader.from_env()?.build()?;

    run(RunOptions {
        config,
        log_dir: cli.log_dir,
        metrics_bind: cli.metrics_bind,
        resource: cli.resource,
        fresh: cli.fresh,
    })
    .await
}
