//! Property tests for the list engine.
//!
//! This module tests:
//! - Selection stays in range under any key and load sequence
//! - The cursor stack depth always equals the page index
//! - Only one fetch is outstanding at a time
//! - next then prev restores the original page
//! - Submitting a search always returns to page one
//! - Polls are suppressed under overlays and while editing a search
//!
//! ## Invariants
//! - Fetches are answered by a deterministic in-memory collection.

mod helpers;
use helpers::*;

use proptest::prelude::*;
use runloop_client::Page;
use runloop_tui::engine::{Effect, FetchRequest, ListEngine, ListEvent, ListKey};

/// In-memory collection of `len` items answering cursor requests.
fn serve(len: usize, req: &FetchRequest) -> Page<Item> {
    let start = match &req.cursor {
        Some(cursor) => cursor[1..].parse::<usize>().unwrap_or(0),
        None => 0,
    };
    let end = (start + req.limit).min(len);
    let items = if start < end {
        items(start + 1, end)
    } else {
        Vec::new()
    };
    Page::new(items, end < len, Some(len as u64))
}

#[derive(Debug, Clone)]
enum Step {
    Key(ListKey),
    Resolve,
    Fail,
    Poll,
    Resize(u16),
}

fn key_strategy() -> impl Strategy<Value = ListKey> {
    prop_oneof![
        Just(ListKey::Up),
        Just(ListKey::Down),
        Just(ListKey::Left),
        Just(ListKey::Right),
        Just(ListKey::Home),
        Just(ListKey::End),
        Just(ListKey::Enter),
        Just(ListKey::Esc),
        Just(ListKey::Char('r')),
        Just(ListKey::Char('/')),
        Just(ListKey::Char('x')),
        Just(ListKey::Char('y')),
        Just(ListKey::Char('d')),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => key_strategy().prop_map(Step::Key),
        3 => Just(Step::Resolve),
        1 => Just(Step::Fail),
        1 => Just(Step::Poll),
        1 => (10u16..60).prop_map(Step::Resize),
    ]
}

/// Drives an engine and answers its effects.
struct Harness {
    engine: ListEngine<Item>,
    len: usize,
    outstanding: Vec<FetchRequest>,
    issued: usize,
}

impl Harness {
    fn new(len: usize, rows: u16) -> Self {
        let mut engine = engine(rows);
        let effects = engine.mount();
        let mut h = Self {
            engine,
            len,
            outstanding: Vec::new(),
            issued: 0,
        };
        h.absorb(effects);
        h
    }

    fn absorb(&mut self, effects: Vec<Effect<Item>>) {
        for effect in effects {
            if let Effect::Fetch(req) = effect {
                self.issued += 1;
                self.outstanding.push(req);
            }
        }
    }

    fn dispatch(&mut self, event: ListEvent<Item>) {
        let effects = self.engine.dispatch(event);
        self.absorb(effects);
    }

    /// Answer the most recent request; older ones have been superseded.
    fn resolve(&mut self, ok: bool) {
        let Some(req) = self.outstanding.pop() else {
            return;
        };
        let result = if ok {
            Ok(serve(self.len, &req))
        } else {
            Err("boom".to_string())
        };
        self.dispatch(ListEvent::PageLoaded {
            request: req.id,
            result,
        });
    }

    fn settle(&mut self) {
        while !self.outstanding.is_empty() {
            self.resolve(true);
        }
    }

    fn step(&mut self, step: Step) {
        match step {
            Step::Key(key) => self.dispatch(ListEvent::Key(key)),
            Step::Resolve => self.resolve(true),
            Step::Fail => self.resolve(false),
            Step::Poll => self.dispatch(ListEvent::PollTick),
            Step::Resize(rows) => self.dispatch(ListEvent::Resize { rows }),
        }
    }
}

proptest! {
    #[test]
    fn selection_stays_in_range(len in 0usize..60, steps in prop::collection::vec(step_strategy(), 0..80)) {
        let mut h = Harness::new(len, 17);
        for step in steps {
            h.step(step);
            let n = h.engine.pagination().items().len();
            prop_assert!(h.engine.selected() < n.max(1));
        }
        h.settle();
        let n = h.engine.pagination().items().len();
        prop_assert!(h.engine.selected() < n.max(1));
    }

    #[test]
    fn cursor_depth_matches_page(len in 0usize..80, steps in prop::collection::vec(step_strategy(), 0..80)) {
        let mut h = Harness::new(len, 17);
        for step in steps {
            h.step(step);
            let p = h.engine.pagination();
            prop_assert_eq!(p.cursor_depth(), p.current_page());
        }
    }

    #[test]
    fn repeated_next_issues_one_fetch(presses in 2usize..6) {
        let mut h = Harness::new(50, 17);
        h.settle();
        let before = h.issued;
        for _ in 0..presses {
            h.dispatch(ListEvent::Key(ListKey::Right));
        }
        prop_assert_eq!(h.issued - before, 1);
        h.settle();
        prop_assert_eq!(h.engine.pagination().current_page(), 1);
    }

    #[test]
    fn next_then_prev_restores_page(len in 11usize..80, forward in 0usize..3) {
        let mut h = Harness::new(len, 17);
        h.settle();
        for _ in 0..forward {
            h.dispatch(ListEvent::Key(ListKey::Right));
            h.settle();
        }
        let page = h.engine.pagination().current_page();
        let items = h.engine.pagination().items().to_vec();
        prop_assume!(h.engine.pagination().has_more());

        h.dispatch(ListEvent::Key(ListKey::Right));
        h.settle();
        h.dispatch(ListEvent::Key(ListKey::Left));
        h.settle();

        prop_assert_eq!(h.engine.pagination().current_page(), page);
        prop_assert_eq!(h.engine.pagination().items(), items.as_slice());
    }

    #[test]
    fn search_submit_returns_to_first_page(forward in 0usize..4, query in "[a-z]{0,6}") {
        let mut h = Harness::new(100, 17);
        h.settle();
        for _ in 0..forward {
            h.dispatch(ListEvent::Key(ListKey::Right));
            h.settle();
        }

        h.dispatch(ListEvent::Key(ListKey::Char('/')));
        for c in query.chars() {
            h.dispatch(ListEvent::Key(ListKey::Char(c)));
        }
        h.dispatch(ListEvent::Key(ListKey::Enter));

        let p = h.engine.pagination();
        prop_assert_eq!(p.current_page(), 0);
        prop_assert_eq!(p.cursor_depth(), 0);
        let last = h.outstanding.last().cloned();
        prop_assert!(last.is_some_and(|r| r.cursor.is_none()));
    }

    #[test]
    fn polls_suppressed_under_overlay_or_search(use_search in any::<bool>(), ticks in 1usize..10) {
        let mut h = Harness::new(30, 17);
        h.settle();
        if use_search {
            h.dispatch(ListEvent::Key(ListKey::Char('/')));
        } else {
            h.dispatch(ListEvent::Key(ListKey::Enter));
        }
        let before = h.issued;
        for _ in 0..ticks {
            h.dispatch(ListEvent::PollTick);
        }
        prop_assert_eq!(h.issued, before);
    }
}

#[test]
fn test_poll_issued_when_idle() {
    let mut h = Harness::new(30, 17);
    h.settle();
    h.dispatch(ListEvent::PollTick);
    assert_eq!(h.outstanding.len(), 1);
    // A second tick while the poll is outstanding does nothing.
    h.dispatch(ListEvent::PollTick);
    assert_eq!(h.outstanding.len(), 1);
}
