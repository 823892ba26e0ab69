//! Actions flowing through the TUI event loop.
//!
//! Responsibilities:
//! - Carry terminal input, timer ticks, and async results to [`crate::app::App`].
//! - Describe work for the runtime: spawned jobs, SSH handoff, quit.
//!
//! Does NOT handle:
//! - Executing jobs (see `runtime::event_loop`).
//!
//! Invariants:
//! - Async results name the screen that requested them; results for a screen
//!   no longer on the stack are dropped.
//! - Page payloads are type-erased here and downcast by the owning screen.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::KeyEvent;
use futures_util::future::BoxFuture;

use crate::engine::{OperationOutcome, RequestId};
use crate::screens::Screen;

/// Identity of one mounted screen instance.
pub type ScreenId = u64;

static NEXT_SCREEN_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_screen_id() -> ScreenId {
    NEXT_SCREEN_ID.fetch_add(1, Ordering::Relaxed)
}

/// A completed page fetch addressed to a list screen.
pub struct Delivery {
    pub screen: ScreenId,
    pub request: RequestId,
    /// `Page<T>` for the screen's item type, or the error message.
    pub payload: Result<Box<dyn Any + Send>, String>,
}

/// Background work whose result re-enters the loop as an [`Action`].
pub struct Job {
    pub label: String,
    pub future: BoxFuture<'static, Action>,
}

impl Job {
    pub fn new(
        label: impl Into<String>,
        future: impl std::future::Future<Output = Action> + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            future: Box::pin(future),
        }
    }
}

pub enum Action {
    Input(KeyEvent),
    Resize { cols: u16, rows: u16 },
    /// UI animation tick.
    Tick,
    /// Background refresh tick.
    Poll,
    PageLoaded(Delivery),
    OperationFinished {
        screen: ScreenId,
        operation: &'static str,
        outcome: OperationOutcome,
    },
    TextLoaded {
        screen: ScreenId,
        result: Result<String, String>,
    },
    Push(Box<dyn Screen>),
    Back,
    Spawn(Job),
    /// Suspend the UI and hand the terminal to an interactive SSH session.
    Ssh { devbox_id: String },
    SshFinished(Result<(), String>),
    Status(String),
    CycleTheme,
    Quit,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(key) => f.debug_tuple("Input").field(key).finish(),
            Self::Resize { cols, rows } => f
                .debug_struct("Resize")
                .field("cols", cols)
                .field("rows", rows)
                .finish(),
            Self::Tick => f.write_str("Tick"),
            Self::Poll => f.write_str("Poll"),
            Self::PageLoaded(d) => f
                .debug_struct("PageLoaded")
                .field("screen", &d.screen)
                .field("request", &d.request)
                .field("ok", &d.payload.is_ok())
                .finish(),
            Self::OperationFinished {
                screen,
                operation,
                outcome,
            } => f
                .debug_struct("OperationFinished")
                .field("screen", screen)
                .field("operation", operation)
                .field("outcome", outcome)
                .finish(),
            Self::TextLoaded { screen, result } => f
                .debug_struct("TextLoaded")
                .field("screen", screen)
                .field("ok", &result.is_ok())
                .finish(),
            Self::Push(screen) => f.debug_tuple("Push").field(&screen.title()).finish(),
            Self::Back => f.write_str("Back"),
            Self::Spawn(job) => f.debug_tuple("Spawn").field(&job.label).finish(),
            Self::Ssh { devbox_id } => f.debug_struct("Ssh").field("devbox_id", devbox_id).finish(),
            Self::SshFinished(r) => f.debug_tuple("SshFinished").field(r).finish(),
            Self::Status(msg) => f.debug_tuple("Status").field(msg).finish(),
            Self::CycleTheme => f.write_str("CycleTheme"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_ids_are_unique() {
        let a = next_screen_id();
        let b = next_screen_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_omits_payloads() {
        let action = Action::PageLoaded(Delivery {
            screen: 3,
            request: 9,
            payload: Ok(Box::new(vec![1u8, 2, 3])),
        });
        let rendered = format!("{action:?}");
        assert!(rendered.contains("screen: 3"));
        assert!(rendered.contains("ok: true"));

        let job = Action::Spawn(Job::new("fetch devboxes", async { Action::Tick }));
        assert_eq!(format!("{job:?}"), "Spawn(\"fetch devboxes\")");
    }
}
