//! File logging for the TUI.
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file.
//! `RUST_LOG` controls the filter; the default is `info`.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_FILE_NAME: &str = "runloop-tui.log";

/// Install the file subscriber. The returned guard must be held until exit so
/// buffered lines are flushed. A subscriber installed earlier (for example by
/// the `rl` CLI) is left in place.
pub fn init(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed, keeping it");
    }
    Ok(guard)
}
