//! Runtime components for the TUI application.
//!
//! - Terminal management ([`terminal`]).
//! - File logging ([`logging`]).
//! - The main loop and job execution ([`event_loop`]).
//!
//! Does NOT handle:
//! - UI rendering or input handling (see `crate::app` and `crate::ui`).
//! - Runloop API calls (see `runloop_client`).

pub mod event_loop;
pub mod logging;
pub mod terminal;

pub use event_loop::{RunOptions, run};
