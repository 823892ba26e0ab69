//! Rendering tests for list screens and dialogs.
//!
//! This module tests:
//! - Table rows, status line, and busy indicator
//! - Actions, confirmation, and result dialogs
//! - Search bar visibility
//! - Loading and empty states
//!
//! ## Invariants
//! - Rendering reads projected state only; tests build state through the
//!   engine and draw with `TestBackend`.

mod helpers;
use helpers::*;

use ratatui::{Terminal, backend::TestBackend};
use runloop_config::{ColorTheme, Theme};
use runloop_tui::engine::{
    Column, ColumnWidth, ListEngine, ListEvent, ListKey, ResourceNames, project,
};
use runloop_tui::screens::RenderContext;
use runloop_tui::ui;

const NAMES: ResourceNames = ResourceNames {
    singular: "snapshot",
    plural: "snapshots",
};

fn columns() -> Vec<Column<Item>> {
    vec![
        Column {
            header: "ID",
            width: ColumnWidth::Min(10),
            cell: |i: &Item| i.0.clone(),
        },
        Column {
            header: "Label",
            width: ColumnWidth::Fill,
            cell: |i: &Item| format!("label-{}", i.0),
        },
    ]
}

fn draw(engine: &ListEngine<Item>) -> String {
    let theme = Theme::from_color_theme(ColorTheme::default());
    let view = project(engine, &columns(), NAMES, |i: &Item| i.0.clone());
    let mut terminal = Terminal::new(TestBackend::new(80, 22)).expect("terminal");
    terminal
        .draw(|f| {
            let ctx = RenderContext {
                theme: &theme,
                spinner: '*',
            };
            ui::list::render_list(f, f.area(), "Snapshots", &view, ctx);
        })
        .expect("draw");
    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn test_table_shows_rows_and_status() {
    let e = first_page();
    let screen = draw(&e);
    assert!(screen.contains(" Snapshots "));
    assert!(screen.contains("ID"));
    assert!(screen.contains("label-i1"));
    assert!(screen.contains("label-i10"));
    assert!(screen.contains("Showing 1-10 of 35  Page 1"));
}

#[test]
fn test_navigation_shows_busy_spinner() {
    let mut e = first_page();
    press(&mut e, ListKey::Right);
    let screen = draw(&e);
    assert!(screen.contains("Page 2  *"), "{screen}");
    // The previous rows stay up until the new page lands.
    assert!(screen.contains("label-i1 "));
}

#[test]
fn test_actions_dialog_lists_operations() {
    let mut e = first_page();
    press(&mut e, ListKey::Down);
    press(&mut e, ListKey::Enter);
    let screen = draw(&e);
    assert!(screen.contains("Actions: i2"), "{screen}");
    assert!(screen.contains("[v] View"));
    assert!(screen.contains("[d] Delete"));
}

#[test]
fn test_confirm_dialog_names_target() {
    let mut e = first_page();
    press(&mut e, ListKey::Enter);
    press(&mut e, ListKey::Char('d'));
    let screen = draw(&e);
    assert!(screen.contains("Delete?"));
    assert!(screen.contains("Delete snapshot i1?"), "{screen}");
}

#[test]
fn test_result_dialog_shows_failure() {
    let mut e = first_page();
    press(&mut e, ListKey::Enter);
    press(&mut e, ListKey::Char('s'));
    e.dispatch(ListEvent::OperationFinished {
        operation: "suspend",
        outcome: Err("devbox is busy".into()),
    });
    let screen = draw(&e);
    assert!(screen.contains("Suspend failed"));
    assert!(screen.contains("devbox is busy"));
}

#[test]
fn test_search_bar_visible_while_editing() {
    let mut e = first_page();
    press(&mut e, ListKey::Char('/'));
    press(&mut e, ListKey::Char('a'));
    press(&mut e, ListKey::Char('b'));
    let screen = draw(&e);
    assert!(screen.contains(" Search "));
    assert!(screen.contains("ab"));
}

#[test]
fn test_loading_and_empty_states() {
    let mut e = engine(ROWS_FOR_TEN);
    let req = fetch_of(&e.mount());
    assert!(draw(&e).contains("* Loading snapshots..."));

    load(&mut e, &req, Vec::new(), false, Some(0));
    let screen = draw(&e);
    assert!(screen.contains("No snapshots found"));
    assert!(screen.contains("Showing 0 of 0"));
}
