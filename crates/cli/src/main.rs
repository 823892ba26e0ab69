//! Runloop CLI - command-line interface for the Runloop devbox platform.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Execute Runloop API commands via the shared client library.
//! - Format and display results (text, JSON, YAML), or open the interactive
//!   browser for plain list commands on a terminal.
//!
//! Does NOT handle:
//! - REST API implementation (see `crates/client`).
//! - Screen rendering (see `crates/tui`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Usage errors exit with the validation code (5), not clap's default.
//! - When the interactive browser may open, nothing logs to the terminal and
//!   the TUI installs its own subscriber and exporter.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod interactive;
mod mcp;
mod progress;
mod update_check;

use args::{Cli, Commands};
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use commands::CommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use runloop_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    let loader = match ConfigLoader::new().load_dotenv() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load environment: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(ExitCode::ValidationError.as_i32());
        }
        Err(e) => e.exit(),
    };

    let interactive = cli.may_launch_tui();

    if !interactive {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // The TUI installs its own exporter when it opens.
    let _metrics_exporter = match cli.metrics_bind.as_deref() {
        Some(bind_addr) if !interactive => match runloop_client::metrics_exporter::MetricsExporter::install(bind_addr) {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        },
        _ => None,
    };

    let ctx = if matches!(cli.command, Commands::Completions { .. }) {
        None
    } else {
        let mut loader = loader;
        if let Some(ref key) = cli.api_key {
            loader = loader.with_api_key(key.clone());
        }
        if let Some(ref url) = cli.base_url {
            loader = loader.with_base_url(url.clone());
        }
        let config = match loader.from_env().and_then(|l| l.build()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{:#}", e);
                std::process::exit(ExitCode::from(&e).as_i32());
            }
        };
        Some(CommandContext {
            config,
            output: cli.output.clone(),
            quiet: cli.quiet,
            metrics: cli.metrics_bind.is_some(),
            metrics_bind: cli.metrics_bind.clone(),
            interactive,
        })
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    if !interactive && !cli.is_machine_channel() {
        update_check::maybe_notify().await;
    }

    let exit_code = match run_command(cli, ctx, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
