//! Cursor pagination controller.
//!
//! Responsibilities:
//! - Track the current page, its items, and the forward cursor stack.
//! - Emit [`FetchRequest`]s for initial load, navigation, refresh, and polls.
//! - Apply fetch outcomes, discarding any that are not the one in flight.
//!
//! Does NOT handle:
//! - Performing the fetch (the caller runs the request and reports back).
//! - Selection or rendering.
//!
//! Invariants:
//! - `cursors.len() == current_page` at every observable point.
//! - At most one fetch is in flight. next/prev/refresh are rejected while a
//!   load or navigation is outstanding and supersede an outstanding poll;
//!   polls are rejected while anything is outstanding.
//! - A failed navigation rolls the page back and keeps the last good items.
//! - A failed reset drops the previous items, so no cursor from an older
//!   query or page size outlives it.
//! - Poll failures never set `error`.
//! - A total reported for the first page survives pages that omit it.

use runloop_client::Page;
use tracing::{debug, warn};

/// Monotonic id tagging each fetch issued by one controller.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page after mount or a dependency change.
    Initial,
    /// Next or previous page.
    Navigate,
    /// Re-fetch of the current page requested by the user or after a mutation.
    Refresh,
    /// Background re-fetch of the current page.
    Poll,
}

/// A page fetch the caller must perform and report back via
/// [`PaginationController::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub kind: FetchKind,
    pub limit: usize,
    /// `starting_after` cursor; `None` for the first page.
    pub cursor: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
struct InFlight {
    id: RequestId,
    kind: FetchKind,
    /// Page index and cursor stack to restore if a navigation fails.
    rollback: Option<(usize, Vec<String>)>,
}

/// What [`PaginationController::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Items replaced. `page_changed` is true after a successful navigation
    /// or reset.
    Loaded { page_changed: bool },
    /// Error recorded (or swallowed for polls); items untouched.
    Failed,
    /// Outcome did not match the in-flight request.
    Discarded,
}

pub struct PaginationController<T> {
    items: Vec<T>,
    current_page: usize,
    cursors: Vec<String>,
    loading: bool,
    navigating: bool,
    error: Option<String>,
    has_more: bool,
    total_count: Option<u64>,
    page_size: usize,
    search: Option<String>,
    next_id: RequestId,
    in_flight: Option<InFlight>,
    item_id: fn(&T) -> &str,
}

impl<T> PaginationController<T> {
    pub fn new(page_size: usize, item_id: fn(&T) -> &str) -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            cursors: Vec::new(),
            loading: false,
            navigating: false,
            error: None,
            has_more: false,
            total_count: None,
            page_size: page_size.max(1),
            search: None,
            next_id: 0,
            in_flight: None,
            item_id,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn cursor_depth(&self) -> usize {
        self.cursors.len()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn navigating(&self) -> bool {
        self.navigating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// True while a user-visible fetch (anything but a poll) is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| f.kind != FetchKind::Poll)
    }

    /// Restart from page one with new dependencies.
    ///
    /// Supersedes any in-flight fetch; its outcome will be discarded.
    pub fn reset(&mut self, page_size: usize, search: Option<String>) -> FetchRequest {
        self.page_size = page_size.max(1);
        self.search = search.filter(|s| !s.trim().is_empty());
        self.cursors.clear();
        self.current_page = 0;
        self.loading = true;
        self.navigating = false;
        self.issue(FetchKind::Initial, None)
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if !self.has_more || self.is_busy() {
            return None;
        }
        let cursor = self.items.last().map(|item| (self.item_id)(item).to_string())?;
        let rollback = (self.current_page, self.cursors.clone());

        self.cursors.push(cursor);
        self.current_page += 1;
        self.navigating = true;
        let request = self.issue(FetchKind::Navigate, Some(rollback));
        debug!(page = self.current_page, "Fetching next page");
        Some(request)
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if self.current_page == 0 || self.is_busy() {
            return None;
        }
        let rollback = (self.current_page, self.cursors.clone());

        self.cursors.pop();
        self.current_page -= 1;
        self.navigating = true;
        let request = self.issue(FetchKind::Navigate, Some(rollback));
        debug!(page = self.current_page, "Fetching previous page");
        Some(request)
    }

    /// Re-fetch the current page without moving.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        if self.is_busy() {
            return None;
        }
        self.navigating = true;
        Some(self.issue(FetchKind::Refresh, None))
    }

    /// Silent re-fetch of the current page. No loading flags are raised.
    pub fn poll(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        Some(self.issue(FetchKind::Poll, None))
    }

    /// Apply the outcome of request `id`.
    pub fn apply(&mut self, id: RequestId, result: Result<Page<T>, String>) -> Applied {
        let Some(in_flight) = self.in_flight.take_if(|f| f.id == id) else {
            debug!(request_id = id, "Discarding stale page outcome");
            return Applied::Discarded;
        };

        match result {
            Ok(page) => {
                self.items = page.items;
                self.has_more = page.has_more;
                // Later pages often omit the total; keep the last one reported.
                self.total_count = match in_flight.kind {
                    FetchKind::Initial => page.total_count,
                    _ => page.total_count.or(self.total_count),
                };
                self.error = None;
                self.loading = false;
                self.navigating = false;
                let page_changed =
                    matches!(in_flight.kind, FetchKind::Initial | FetchKind::Navigate);
                Applied::Loaded { page_changed }
            }
            Err(message) => {
                match in_flight.kind {
                    FetchKind::Poll => {
                        warn!(error = %message, "Background refresh failed");
                    }
                    FetchKind::Initial => {
                        // The old page belongs to the previous query or page
                        // size; it is no cursor source for the new one.
                        self.items.clear();
                        self.has_more = false;
                        self.total_count = None;
                        self.loading = false;
                        self.error = Some(message);
                    }
                    FetchKind::Navigate => {
                        if let Some((page, cursors)) = in_flight.rollback {
                            self.current_page = page;
                            self.cursors = cursors;
                        }
                        self.navigating = false;
                        self.error = Some(message);
                    }
                    FetchKind::Refresh => {
                        self.navigating = false;
                        self.error = Some(message);
                    }
                }
                Applied::Failed
            }
        }
    }

    fn issue(&mut self, kind: FetchKind, rollback: Option<(usize, Vec<String>)>) -> FetchRequest {
        self.next_id += 1;
        let id = self.next_id;
        self.in_flight = Some(InFlight { id, kind, rollback });
        FetchRequest {
            id,
            kind,
            limit: self.page_size,
            cursor: self.cursors.last().cloned(),
            search: self.search.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(s: &String) -> &str {
        s
    }

    fn page(range: std::ops::RangeInclusive<u32>, has_more: bool) -> Page<String> {
        Page::new(range.map(|i| format!("i{i}")).collect(), has_more, Some(35))
    }

    fn loaded() -> PaginationController<String> {
        let mut ctl = PaginationController::new(10, id_of);
        let req = ctl.reset(10, None);
        ctl.apply(req.id, Ok(page(1..=10, true)));
        ctl
    }

    #[test]
    fn test_reset_sets_loading_only() {
        let mut ctl = PaginationController::<String>::new(10, id_of);
        let req = ctl.reset(10, Some("  ".into()));
        assert!(ctl.loading());
        assert!(!ctl.navigating());
        assert_eq!(req.kind, FetchKind::Initial);
        assert_eq!(req.cursor, None);
        assert_eq!(req.search, None);
    }

    #[test]
    fn test_next_page_pushes_last_item_cursor() {
        let mut ctl = loaded();
        let req = ctl.next_page().unwrap();
        assert_eq!(req.cursor.as_deref(), Some("i10"));
        assert_eq!(ctl.current_page(), 1);
        assert!(ctl.navigating());
        assert_eq!(ctl.cursor_depth(), 1);
    }

    #[test]
    fn test_second_next_while_in_flight_is_rejected() {
        let mut ctl = loaded();
        assert!(ctl.next_page().is_some());
        assert!(ctl.next_page().is_none());
        assert!(ctl.refresh().is_none());
        assert!(ctl.poll().is_none());
        assert_eq!(ctl.current_page(), 1);
    }

    #[test]
    fn test_next_page_noop_without_more() {
        let mut ctl = PaginationController::new(10, id_of);
        let req = ctl.reset(10, None);
        ctl.apply(req.id, Ok(page(1..=4, false)));
        assert!(ctl.next_page().is_none());
    }

    #[test]
    fn test_prev_page_noop_on_first_page() {
        let mut ctl = loaded();
        assert!(ctl.prev_page().is_none());
    }

    #[test]
    fn test_failed_navigation_rolls_back() {
        let mut ctl = loaded();
        let req = ctl.next_page().unwrap();
        assert_eq!(ctl.apply(req.id, Err("timeout".into())), Applied::Failed);

        assert_eq!(ctl.current_page(), 0);
        assert_eq!(ctl.cursor_depth(), 0);
        assert_eq!(ctl.items().len(), 10);
        assert_eq!(ctl.error(), Some("timeout"));
        assert!(!ctl.navigating());
    }

    #[test]
    fn test_poll_failure_is_swallowed() {
        let mut ctl = loaded();
        let req = ctl.poll().unwrap();
        assert!(!ctl.navigating());
        ctl.apply(req.id, Err("502".into()));
        assert_eq!(ctl.error(), None);
        assert!(!ctl.is_busy());
    }

    #[test]
    fn test_user_fetch_supersedes_poll() {
        let mut ctl = loaded();
        let poll = ctl.poll().unwrap();
        assert!(ctl.poll().is_none());

        let refresh = ctl.refresh().unwrap();
        assert_eq!(ctl.apply(poll.id, Ok(page(1..=2, false))), Applied::Discarded);
        assert_eq!(
            ctl.apply(refresh.id, Ok(page(1..=10, true))),
            Applied::Loaded { page_changed: false }
        );
    }

    #[test]
    fn test_success_clears_error() {
        let mut ctl = loaded();
        let req = ctl.refresh().unwrap();
        ctl.apply(req.id, Err("boom".into()));
        assert!(ctl.error().is_some());

        let req = ctl.refresh().unwrap();
        ctl.apply(req.id, Ok(page(1..=10, true)));
        assert_eq!(ctl.error(), None);
    }

    #[test]
    fn test_failed_reset_drops_previous_results() {
        let mut ctl = loaded();
        let req = ctl.reset(7, Some("w".into()));
        assert_eq!(ctl.apply(req.id, Err("503".into())), Applied::Failed);

        assert!(ctl.items().is_empty());
        assert!(!ctl.has_more());
        assert_eq!(ctl.total_count(), None);
        assert_eq!(ctl.error(), Some("503"));
        assert!(ctl.next_page().is_none());

        // A retry under the new query starts from the first page.
        let retry = ctl.refresh().unwrap();
        assert_eq!(retry.cursor, None);
        assert_eq!(retry.search.as_deref(), Some("w"));
    }

    #[test]
    fn test_reset_supersedes_in_flight() {
        let mut ctl = loaded();
        let stale = ctl.next_page().unwrap();
        let fresh = ctl.reset(10, Some("web".into()));

        assert_eq!(ctl.apply(stale.id, Ok(page(11..=20, true))), Applied::Discarded);
        assert_eq!(ctl.current_page(), 0);
        assert_eq!(
            ctl.apply(fresh.id, Ok(page(1..=3, false))),
            Applied::Loaded { page_changed: true }
        );
        assert_eq!(ctl.items().len(), 3);
    }
}
