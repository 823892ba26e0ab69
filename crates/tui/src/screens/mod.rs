//! Screens on the navigation stack.
//!
//! Responsibilities:
//! - Define the [`Screen`] trait the app drives.
//! - Provide the home menu, the generic resource list, and the detail viewer.
//!
//! Does NOT handle:
//! - Running async work (screens return [`Action::Spawn`] jobs).
//! - Terminal setup (see `crate::runtime`).
//!
//! Invariants:
//! - Only the top screen receives input, polls, and resizes.
//! - Async results carry a [`ScreenId`] and reach only the screen that
//!   requested them.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use runloop_client::RunloopClient;
use runloop_config::Theme;

use crate::action::{Action, Delivery, ScreenId};
use crate::engine::{Hint, OperationOutcome};

pub mod detail;
pub mod home;
pub mod list;

pub use detail::DetailScreen;
pub use home::HomeScreen;
pub use list::ListScreen;

/// Shared dependencies handed to screen callbacks.
#[derive(Clone)]
pub struct ScreenContext {
    pub client: Arc<RunloopClient>,
    /// Full terminal height.
    pub rows: u16,
}

/// Frame-level inputs for drawing.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub spinner: char,
}

pub trait Screen: Send {
    fn id(&self) -> ScreenId;

    fn title(&self) -> String;

    /// Resource key persisted as the last visited resource.
    fn resource_key(&self) -> Option<&'static str> {
        None
    }

    /// True while the screen consumes printable keys as text.
    fn captures_text(&self) -> bool {
        false
    }

    fn on_mount(&mut self, _ctx: &ScreenContext) -> Vec<Action> {
        Vec::new()
    }

    fn on_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Vec<Action>;

    fn on_resize(&mut self, _ctx: &ScreenContext) -> Vec<Action> {
        Vec::new()
    }

    fn on_poll(&mut self, _ctx: &ScreenContext) -> Vec<Action> {
        Vec::new()
    }

    fn on_page(&mut self, _delivery: Delivery, _ctx: &ScreenContext) -> Vec<Action> {
        Vec::new()
    }

    fn on_operation(
        &mut self,
        _operation: &'static str,
        _outcome: OperationOutcome,
        _ctx: &ScreenContext,
    ) -> Vec<Action> {
        Vec::new()
    }

    fn on_text(&mut self, _result: Result<String, String>) {}

    fn hints(&self) -> Vec<Hint>;

    fn render(&self, f: &mut Frame, area: Rect, ctx: RenderContext<'_>);
}
