//! Test helpers for TUI testing.
//!
//! Provides a small item type for driving the list engine directly, key
//! constructors for screen-level tests, and buffer dumps for render tests.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use runloop_client::Page;
use runloop_tui::engine::{
    Effect, FetchRequest, ListConfig, ListEngine, ListEvent, ListKey, OperationSpec,
};

/// Rows that give a page size of 10 with no search bar.
pub const ROWS_FOR_TEN: u16 = 17;

#[derive(Debug, Clone, PartialEq)]
pub struct Item(pub String);

pub fn item_id(item: &Item) -> &str {
    &item.0
}

pub fn operations(_: &Item) -> Vec<OperationSpec> {
    vec![
        OperationSpec::navigational("view", "View", 'v'),
        OperationSpec::immediate("suspend", "Suspend", 's'),
        OperationSpec::destructive("delete", "Delete", 'd'),
    ]
}

pub fn engine(rows: u16) -> ListEngine<Item> {
    ListEngine::new(
        ListConfig {
            item_id,
            operations,
            searchable: true,
        },
        rows,
    )
}

/// Items `i{from}..=i{to}`.
pub fn items(from: usize, to: usize) -> Vec<Item> {
    (from..=to).map(|i| Item(format!("i{i}"))).collect()
}

pub fn fetch_of(effects: &[Effect<Item>]) -> FetchRequest {
    match effects {
        [Effect::Fetch(req)] => req.clone(),
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

pub fn fetches(effects: &[Effect<Item>]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Fetch(_)))
        .count()
}

pub fn press(engine: &mut ListEngine<Item>, key: ListKey) -> Vec<Effect<Item>> {
    engine.dispatch(ListEvent::Key(key))
}

pub fn load(
    engine: &mut ListEngine<Item>,
    request: &FetchRequest,
    items: Vec<Item>,
    has_more: bool,
    total: Option<u64>,
) {
    engine.dispatch(ListEvent::PageLoaded {
        request: request.id,
        result: Ok(Page::new(items, has_more, total)),
    });
}

/// Engine showing page one of a 35-item collection.
pub fn first_page() -> ListEngine<Item> {
    let mut e = engine(ROWS_FOR_TEN);
    let req = fetch_of(&e.mount());
    load(&mut e, &req, items(1, 10), true, Some(35));
    e
}

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Flatten a ratatui buffer to lines of text.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut output = String::new();

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            output.push(cell.symbol().chars().next().unwrap_or(' '));
        }
        if y < area.bottom() - 1 {
            output.push('\n');
        }
    }

    output
}
