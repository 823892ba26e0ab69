//! Rendering for the TUI.
//!
//! Every function here draws from already-projected state and never
//! mutates it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub mod chrome;
pub mod detail;
pub mod home;
pub mod list;
pub mod overlay;
pub mod theme;

pub use theme::ThemeExt;

/// A rectangle of `percent_x` by `height` rows centered in `r`.
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
