//! Search filter state: a draft being edited and the submitted query.
//!
//! Invariants:
//! - `submitted` only changes through [`SearchFilter::submit`] or
//!   [`SearchFilter::handle_escape`]; the caller resets pagination whenever
//!   either reports a change.
//! - Cancelling discards the draft and leaves `submitted` alone.

use runloop_config::constants::SEARCH_OVERHEAD_ROWS;
use tui_input::{Input, InputRequest};

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    draft: Input,
    submitted: String,
    active: bool,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the draft input currently owns the keyboard.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn draft(&self) -> &str {
        self.draft.value()
    }

    pub fn draft_cursor(&self) -> usize {
        self.draft.visual_cursor()
    }

    pub fn submitted(&self) -> &str {
        &self.submitted
    }

    /// Submitted query as a fetch parameter.
    pub fn query(&self) -> Option<String> {
        let q = self.submitted.trim();
        (!q.is_empty()).then(|| q.to_string())
    }

    /// Start editing, seeded from the submitted query.
    pub fn enter(&mut self) {
        self.draft = Input::new(self.submitted.clone());
        self.active = true;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.draft = Input::new(query.into());
    }

    /// Apply an editing request to the draft.
    pub fn edit(&mut self, request: InputRequest) {
        if self.active {
            self.draft.handle(request);
        }
    }

    /// Commit the draft. Always returns the new submitted query so the
    /// caller restarts pagination, even if unchanged.
    pub fn submit(&mut self) -> String {
        self.submitted = self.draft.value().trim().to_string();
        self.active = false;
        self.submitted.clone()
    }

    pub fn cancel(&mut self) {
        self.draft.reset();
        self.active = false;
    }

    /// Clear a submitted query. Returns true when the key was consumed.
    pub fn handle_escape(&mut self) -> bool {
        if self.submitted.is_empty() {
            return false;
        }
        self.submitted.clear();
        true
    }

    /// Rows the search bar takes while visible.
    pub fn overhead(&self) -> u16 {
        if self.active || !self.submitted.is_empty() {
            SEARCH_OVERHEAD_ROWS
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(filter: &mut SearchFilter, text: &str) {
        for c in text.chars() {
            filter.edit(InputRequest::InsertChar(c));
        }
    }

    #[test]
    fn test_enter_seeds_draft_from_submitted() {
        let mut filter = SearchFilter::new();
        filter.enter();
        typed(&mut filter, "web");
        filter.submit();

        filter.enter();
        assert_eq!(filter.draft(), "web");
    }

    #[test]
    fn test_cancel_keeps_submitted() {
        let mut filter = SearchFilter::new();
        filter.enter();
        typed(&mut filter, "api");
        filter.submit();

        filter.enter();
        typed(&mut filter, "-v2");
        filter.cancel();

        assert!(!filter.is_active());
        assert_eq!(filter.submitted(), "api");
    }

    #[test]
    fn test_escape_clears_then_falls_through() {
        let mut filter = SearchFilter::new();
        filter.set_query("x");
        filter.active = true;
        filter.submit();

        assert!(filter.handle_escape());
        assert_eq!(filter.query(), None);
        assert!(!filter.handle_escape());
    }

    #[test]
    fn test_overhead_tracks_visibility() {
        let mut filter = SearchFilter::new();
        assert_eq!(filter.overhead(), 0);
        filter.enter();
        assert_eq!(filter.overhead(), SEARCH_OVERHEAD_ROWS);
        filter.cancel();
        assert_eq!(filter.overhead(), 0);
    }

    #[test]
    fn test_edits_ignored_when_inactive() {
        let mut filter = SearchFilter::new();
        typed(&mut filter, "zzz");
        assert_eq!(filter.draft(), "");
    }
}
