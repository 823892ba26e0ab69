//! Viewport sizing and selection clamping.
//!
//! The page size of a list is its viewport height, so a resize that changes
//! the height restarts pagination.

use runloop_config::constants::DEFAULT_MIN_VIEWPORT_HEIGHT;

/// Rows of a list screen not available to table rows: borders, header,
/// status line, and hint bar.
pub const LIST_CHROME_ROWS: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: u16,
    pub min_height: u16,
}

impl Viewport {
    pub fn new(rows: u16) -> Self {
        Self {
            rows,
            min_height: DEFAULT_MIN_VIEWPORT_HEIGHT,
        }
    }

    /// `max(min_height, rows - overhead)`.
    pub fn height(&self, overhead: u16) -> u16 {
        self.rows.saturating_sub(overhead).max(self.min_height)
    }

    /// Page size for a list whose search UI uses `search_overhead` rows.
    pub fn page_size(&self, search_overhead: u16) -> usize {
        usize::from(self.height(LIST_CHROME_ROWS + search_overhead))
    }
}

/// Clamp `selected` into `[0, max(1, len))`.
pub fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}
