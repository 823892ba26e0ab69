//! Progress indicators for the Runloop CLI.
//!
//! Responsibilities:
//! - Provide a spinner for waits of unknown length (devbox readiness, uploads).
//! - Ensure ALL progress output is written to STDERR (never stdout), so
//!   command output stays machine-readable.
//! - Allow global suppression via a caller-provided `enabled` boolean (driven by `--quiet`).
//!
//! Non-responsibilities:
//! - This module does not decide *when* progress should be shown; callers do.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// An indefinite spinner. Always draws to STDERR; no-op when disabled.
pub(crate) struct Spinner {
    pb: Option<ProgressBar>,
}

impl Spinner {
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(label.into());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb: Some(pb) }
    }

    pub(crate) fn set_message(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.pb {
            pb.set_message(msg.into());
        }
    }

    /// Finish with a stable message left on STDERR.
    pub(crate) fn finish(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(msg.into());
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // Clear an unfinished line so error output does not interleave with it.
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
