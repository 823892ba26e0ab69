//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Re-export the cancellation token shared with the TUI runtime.
//! - Define a single, recognizable `Cancelled` error used to signal user-initiated
//!   cancellation (Ctrl+C/SIGINT) through `anyhow::Result`.
//! - Provide `cancellable`, the select wrapper every command awaits API calls with.
//!
//! Does NOT handle:
//! - Installing the signal handler (see `main`).
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled forever.
//! - A cancelled command exits with code 130.

use std::fmt;
use std::future::Future;

pub use tokio_util::sync::CancellationToken;

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Await `fut` unless `cancel` fires first.
pub async fn cancellable<T, E>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, E>>,
) -> anyhow::Result<T>
where
    E: Into<anyhow::Error>,
{
    tokio::select! {
        res = fut => res.map_err(Into::into),
        _ = cancel.cancelled() => Err(Cancelled.into()),
    }
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
