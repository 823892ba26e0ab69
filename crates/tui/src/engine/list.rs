//! The list interaction state machine.
//!
//! Responsibilities:
//! - Compose pagination, search, viewport, selection, and overlay state.
//! - Map abstract keys and async outcomes to state changes plus [`Effect`]s.
//!
//! Does NOT handle:
//! - Running fetches or operations (the caller executes effects).
//! - Terminal key decoding or drawing (see `crate::screens` and `crate::ui`).
//!
//! Invariants:
//! - `selected < max(1, items.len())` after every dispatch.
//! - Polls are issued only with no overlay open and no search being edited.
//! - At most one operation runs at a time.

use runloop_client::Page;
use tui_input::InputRequest;

use super::overlay::{OperationOutcome, OperationPolicy, OperationSpec, Overlay};
use super::pagination::{Applied, FetchRequest, PaginationController, RequestId};
use super::search::SearchFilter;
use super::viewport::{Viewport, clamp_selection};

/// Terminal-independent key vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Esc,
    Backspace,
    Delete,
    Char(char),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<T> {
    Key(ListKey),
    Resize { rows: u16 },
    PageLoaded {
        request: RequestId,
        result: Result<Page<T>, String>,
    },
    OperationFinished {
        operation: &'static str,
        outcome: OperationOutcome,
    },
    PollTick,
}

/// Work the caller must perform on the engine's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<T> {
    Fetch(FetchRequest),
    Execute { operation: OperationSpec, target: T },
    Navigate { operation: OperationSpec, target: T },
    Back,
}

/// Static configuration of one list.
pub struct ListConfig<T> {
    pub item_id: fn(&T) -> &str,
    pub operations: fn(&T) -> Vec<OperationSpec>,
    pub searchable: bool,
}

pub struct ListEngine<T> {
    config: ListConfig<T>,
    pagination: PaginationController<T>,
    search: SearchFilter,
    viewport: Viewport,
    selected: usize,
    overlay: Overlay<T>,
    /// Operation still running after its progress overlay was dismissed.
    pending: Option<(OperationSpec, T)>,
}

impl<T: Clone> ListEngine<T> {
    pub fn new(config: ListConfig<T>, rows: u16) -> Self {
        let viewport = Viewport::new(rows);
        let pagination = PaginationController::new(viewport.page_size(0), config.item_id);
        Self {
            config,
            pagination,
            search: SearchFilter::new(),
            viewport,
            selected: 0,
            overlay: Overlay::None,
            pending: None,
        }
    }

    /// Start the first fetch.
    pub fn mount(&mut self) -> Vec<Effect<T>> {
        vec![self.restart()]
    }

    pub fn pagination(&self) -> &PaginationController<T> {
        &self.pagination
    }

    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    pub fn overlay(&self) -> &Overlay<T> {
        &self.overlay
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.pagination.items().get(self.selected)
    }

    pub fn is_searchable(&self) -> bool {
        self.config.searchable
    }

    pub fn has_pending_operation(&self) -> bool {
        self.pending.is_some() || self.overlay.is_executing()
    }

    pub fn polling_enabled(&self) -> bool {
        self.overlay.is_none() && !self.search.is_active()
    }

    pub fn dispatch(&mut self, event: ListEvent<T>) -> Vec<Effect<T>> {
        let effects = match event {
            ListEvent::Key(key) => self.on_key(key),
            ListEvent::Resize { rows } => self.on_resize(rows),
            ListEvent::PageLoaded { request, result } => self.on_page(request, result),
            ListEvent::OperationFinished { operation, outcome } => {
                self.on_operation_finished(operation, outcome)
            }
            ListEvent::PollTick => self.on_poll(),
        };
        self.selected = clamp_selection(self.selected, self.pagination.items().len());
        effects
    }

    fn restart(&mut self) -> Effect<T> {
        self.selected = 0;
        let page_size = self.viewport.page_size(self.search.overhead());
        Effect::Fetch(self.pagination.reset(page_size, self.search.query()))
    }

    fn on_key(&mut self, key: ListKey) -> Vec<Effect<T>> {
        if self.search.is_active() {
            return self.on_search_key(key);
        }
        match self.overlay {
            Overlay::None => self.on_list_key(key),
            Overlay::ActionsPopup { .. } => self.on_popup_key(key),
            Overlay::Confirm { .. } => self.on_confirm_key(key),
            Overlay::Executing { .. } => self.on_executing_key(key),
            Overlay::Result { .. } => self.acknowledge_result(),
        }
    }

    fn on_list_key(&mut self, key: ListKey) -> Vec<Effect<T>> {
        let fetch = match key {
            ListKey::Up | ListKey::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            ListKey::Down | ListKey::Char('j') => {
                self.selected = self.selected.saturating_add(1);
                None
            }
            ListKey::Home | ListKey::Char('g') => {
                self.selected = 0;
                None
            }
            ListKey::End | ListKey::Char('G') => {
                self.selected = usize::MAX;
                None
            }
            ListKey::Right | ListKey::Char('n') => self.pagination.next_page(),
            ListKey::Left | ListKey::Char('p') => self.pagination.prev_page(),
            ListKey::Char('r') => self.pagination.refresh(),
            ListKey::Char('/') if self.config.searchable => {
                self.search.enter();
                return self.refit();
            }
            ListKey::Enter | ListKey::Char('a') => {
                self.open_actions();
                None
            }
            ListKey::Esc | ListKey::Char('q') => {
                if self.search.handle_escape() {
                    return vec![self.restart()];
                }
                return vec![Effect::Back];
            }
            _ => None,
        };
        fetch.map(Effect::Fetch).into_iter().collect()
    }

    fn on_search_key(&mut self, key: ListKey) -> Vec<Effect<T>> {
        let request = match key {
            ListKey::Enter => {
                self.search.submit();
                return vec![self.restart()];
            }
            ListKey::Esc => {
                self.search.cancel();
                return self.refit();
            }
            ListKey::Char(c) => InputRequest::InsertChar(c),
            ListKey::Backspace => InputRequest::DeletePrevChar,
            ListKey::Delete => InputRequest::DeleteNextChar,
            ListKey::Left => InputRequest::GoToPrevChar,
            ListKey::Right => InputRequest::GoToNextChar,
            ListKey::Home => InputRequest::GoToStart,
            ListKey::End => InputRequest::GoToEnd,
            ListKey::Up | ListKey::Down => return Vec::new(),
        };
        self.search.edit(request);
        Vec::new()
    }

    fn open_actions(&mut self) {
        if self.has_pending_operation() {
            return;
        }
        let Some(target) = self.selected_item().cloned() else {
            return;
        };
        let operations = (self.config.operations)(&target);
        if operations.is_empty() {
            return;
        }
        self.overlay = Overlay::ActionsPopup {
            operations,
            selected: 0,
            target,
        };
    }

    fn on_popup_key(&mut self, key: ListKey) -> Vec<Effect<T>> {
        match key {
            ListKey::Up | ListKey::Char('k') => {
                self.overlay.move_selection(-1);
                return Vec::new();
            }
            ListKey::Down | ListKey::Char('j') => {
                self.overlay.move_selection(1);
                return Vec::new();
            }
            ListKey::Esc | ListKey::Char('q') => {
                self.overlay = Overlay::None;
                return Vec::new();
            }
            _ => {}
        }

        let chosen = match (&self.overlay, key) {
            (
                Overlay::ActionsPopup {
                    operations,
                    selected,
                    ..
                },
                ListKey::Enter,
            ) => operations.get(*selected).copied(),
            (Overlay::ActionsPopup { operations, .. }, ListKey::Char(c)) => {
                operations.iter().find(|op| op.shortcut == Some(c)).copied()
            }
            _ => None,
        };
        let Some(operation) = chosen else {
            return Vec::new();
        };
        let Overlay::ActionsPopup { target, .. } =
            std::mem::replace(&mut self.overlay, Overlay::None)
        else {
            return Vec::new();
        };

        match operation.policy {
            OperationPolicy::Navigational => vec![Effect::Navigate { operation, target }],
            OperationPolicy::Destructive => {
                self.overlay = Overlay::Confirm { operation, target };
                Vec::new()
            }
            OperationPolicy::Immediate => self.execute(operation, target),
        }
    }

    fn on_confirm_key(&mut self, key: ListKey) -> Vec<Effect<T>> {
        match key {
            ListKey::Enter | ListKey::Char('y') | ListKey::Char('Y') => {
                let Overlay::Confirm { operation, target } =
                    std::mem::replace(&mut self.overlay, Overlay::None)
                else {
                    return Vec::new();
                };
                self.execute(operation, target)
            }
            ListKey::Esc | ListKey::Char('q') | ListKey::Char('n') | ListKey::Char('N') => {
                self.overlay = Overlay::None;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn execute(&mut self, operation: OperationSpec, target: T) -> Vec<Effect<T>> {
        self.overlay = Overlay::Executing {
            operation,
            target: target.clone(),
        };
        vec![Effect::Execute { operation, target }]
    }

    /// Escape hides the progress view; the operation keeps running and its
    /// result is still shown when it lands.
    fn on_executing_key(&mut self, key: ListKey) -> Vec<Effect<T>> {
        if matches!(key, ListKey::Esc) {
            if let Overlay::Executing { operation, target } =
                std::mem::replace(&mut self.overlay, Overlay::None)
            {
                self.pending = Some((operation, target));
            }
        }
        Vec::new()
    }

    fn on_operation_finished(
        &mut self,
        operation_id: &'static str,
        outcome: OperationOutcome,
    ) -> Vec<Effect<T>> {
        let running = match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::Executing { operation, target } if operation.id == operation_id => {
                Some((operation, target))
            }
            other => {
                self.overlay = other;
                self.pending.take_if(|(op, _)| op.id == operation_id)
            }
        };

        if let Some((operation, target)) = running {
            self.overlay = Overlay::Result {
                operation,
                target,
                outcome,
            };
        }
        Vec::new()
    }

    fn acknowledge_result(&mut self) -> Vec<Effect<T>> {
        let Overlay::Result {
            operation, outcome, ..
        } = std::mem::replace(&mut self.overlay, Overlay::None)
        else {
            return Vec::new();
        };
        if operation.mutates && outcome.is_ok() {
            return self.pagination.refresh().map(Effect::Fetch).into_iter().collect();
        }
        Vec::new()
    }

    fn on_resize(&mut self, rows: u16) -> Vec<Effect<T>> {
        self.viewport.rows = rows;
        self.refit()
    }

    /// Restart when the rows left for the table no longer match the page size.
    fn refit(&mut self) -> Vec<Effect<T>> {
        let page_size = self.viewport.page_size(self.search.overhead());
        if page_size != self.pagination.page_size() {
            return vec![self.restart()];
        }
        Vec::new()
    }

    fn on_page(&mut self, request: RequestId, result: Result<Page<T>, String>) -> Vec<Effect<T>> {
        if let Applied::Loaded { page_changed: true } = self.pagination.apply(request, result) {
            self.selected = 0;
        }
        Vec::new()
    }

    fn on_poll(&mut self) -> Vec<Effect<T>> {
        if !self.polling_enabled() {
            return Vec::new();
        }
        self.pagination.poll().map(Effect::Fetch).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pagination::FetchKind;
    use runloop_config::constants::SEARCH_OVERHEAD_ROWS;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    fn item_id(item: &Item) -> &str {
        &item.0
    }

    fn ops(_: &Item) -> Vec<OperationSpec> {
        vec![
            OperationSpec::navigational("view", "View", 'v'),
            OperationSpec::immediate("suspend", "Suspend", 's'),
            OperationSpec::destructive("delete", "Delete", 'd'),
        ]
    }

    fn engine() -> ListEngine<Item> {
        ListEngine::new(
            ListConfig {
                item_id,
                operations: ops,
                searchable: true,
            },
            17,
        )
    }

    fn fetch_of(effects: &[Effect<Item>]) -> FetchRequest {
        match effects {
            [Effect::Fetch(req)] => req.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n).map(|i| Item(format!("i{i}"))).collect()
    }

    fn mounted() -> ListEngine<Item> {
        let mut e = engine();
        let req = fetch_of(&e.mount());
        e.dispatch(ListEvent::PageLoaded {
            request: req.id,
            result: Ok(Page::new(items(10), true, Some(35))),
        });
        e
    }

    #[test]
    fn test_page_size_from_rows() {
        let mut e = engine();
        let req = fetch_of(&e.mount());
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut e = mounted();
        for _ in 0..20 {
            e.dispatch(ListEvent::Key(ListKey::Down));
        }
        assert_eq!(e.selected(), 9);
        e.dispatch(ListEvent::Key(ListKey::Char('g')));
        assert_eq!(e.selected(), 0);
    }

    #[test]
    fn test_immediate_operation_skips_confirm() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Enter));
        let effects = e.dispatch(ListEvent::Key(ListKey::Char('s')));
        assert!(matches!(effects.as_slice(), [Effect::Execute { operation, .. }] if operation.id == "suspend"));
        assert!(e.overlay().is_executing());
    }

    #[test]
    fn test_navigational_operation_closes_overlay() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Enter));
        let effects = e.dispatch(ListEvent::Key(ListKey::Enter));
        assert!(matches!(effects.as_slice(), [Effect::Navigate { .. }]));
        assert!(e.overlay().is_none());
    }

    #[test]
    fn test_confirm_cancel_returns_to_list() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Enter));
        e.dispatch(ListEvent::Key(ListKey::Char('d')));
        assert!(matches!(e.overlay(), Overlay::Confirm { .. }));
        let effects = e.dispatch(ListEvent::Key(ListKey::Char('n')));
        assert!(effects.is_empty());
        assert!(e.overlay().is_none());
    }

    #[test]
    fn test_escape_during_execution_still_shows_result() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Enter));
        e.dispatch(ListEvent::Key(ListKey::Char('s')));
        e.dispatch(ListEvent::Key(ListKey::Esc));
        assert!(e.overlay().is_none());
        assert!(e.has_pending_operation());

        // no new operation while one is in flight
        e.dispatch(ListEvent::Key(ListKey::Enter));
        assert!(e.overlay().is_none());

        e.dispatch(ListEvent::OperationFinished {
            operation: "suspend",
            outcome: Ok("suspended".into()),
        });
        assert!(matches!(e.overlay(), Overlay::Result { .. }));
        assert!(!e.has_pending_operation());
    }

    #[test]
    fn test_failed_operation_does_not_refresh() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Enter));
        e.dispatch(ListEvent::Key(ListKey::Char('s')));
        e.dispatch(ListEvent::OperationFinished {
            operation: "suspend",
            outcome: Err("409 conflict".into()),
        });
        let effects = e.dispatch(ListEvent::Key(ListKey::Char('x')));
        assert!(effects.is_empty());
        assert!(e.overlay().is_none());
    }

    #[test]
    fn test_poll_suppressed_under_overlay_and_search() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Enter));
        assert!(e.dispatch(ListEvent::PollTick).is_empty());
        e.dispatch(ListEvent::Key(ListKey::Esc));

        e.dispatch(ListEvent::Key(ListKey::Char('/')));
        assert!(e.dispatch(ListEvent::PollTick).is_empty());
        let req = fetch_of(&e.dispatch(ListEvent::Key(ListKey::Esc)));
        e.dispatch(ListEvent::PageLoaded {
            request: req.id,
            result: Ok(Page::new(items(10), true, Some(35))),
        });

        let req = fetch_of(&e.dispatch(ListEvent::PollTick));
        assert_eq!(req.kind, FetchKind::Poll);
    }

    #[test]
    fn test_escape_clears_search_before_going_back() {
        let mut e = mounted();
        e.dispatch(ListEvent::Key(ListKey::Char('/')));
        e.dispatch(ListEvent::Key(ListKey::Char('w')));
        let req = fetch_of(&e.dispatch(ListEvent::Key(ListKey::Enter)));
        assert_eq!(req.search.as_deref(), Some("w"));

        let req = fetch_of(&e.dispatch(ListEvent::Key(ListKey::Esc)));
        assert_eq!(req.search, None);
        assert_eq!(req.kind, FetchKind::Initial);

        let effects = e.dispatch(ListEvent::Key(ListKey::Esc));
        assert_eq!(effects, vec![Effect::Back]);
    }

    #[test]
    fn test_search_bar_shrinks_page_while_editing() {
        let mut e = mounted();
        let req = fetch_of(&e.dispatch(ListEvent::Key(ListKey::Char('/'))));
        assert_eq!(req.limit, 10 - SEARCH_OVERHEAD_ROWS as usize);
        assert_eq!(req.search, None);

        // Typing does not fetch.
        assert!(e.dispatch(ListEvent::Key(ListKey::Char('a'))).is_empty());

        let req = fetch_of(&e.dispatch(ListEvent::Key(ListKey::Esc)));
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn test_resize_restarts_only_when_page_size_changes() {
        let mut e = mounted();
        assert!(e.dispatch(ListEvent::Resize { rows: 17 }).is_empty());
        let req = fetch_of(&e.dispatch(ListEvent::Resize { rows: 30 }));
        assert_eq!(req.limit, 23);
        assert_eq!(e.pagination().current_page(), 0);
    }
}
