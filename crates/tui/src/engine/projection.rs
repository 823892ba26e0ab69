//! Render projection: engine state to plain display data.
//!
//! Pure functions with no terminal dependency. `crate::ui` draws the result.

use std::fmt::Write;

use super::list::ListEngine;
use super::overlay::{OperationSpec, Overlay};

/// Column width hint, mapped to a layout constraint by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    Fixed(u16),
    Min(u16),
    Fill,
}

pub struct Column<T> {
    pub header: &'static str,
    pub width: ColumnWidth,
    pub cell: fn(&T) -> String,
}

/// Strings a list needs to describe itself.
#[derive(Debug, Clone, Copy)]
pub struct ResourceNames {
    pub singular: &'static str,
    pub plural: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub key: &'static str,
    pub label: &'static str,
}

pub const fn hint(key: &'static str, label: &'static str) -> Hint {
    Hint { key, label }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayView {
    None,
    Actions {
        title: String,
        options: Vec<String>,
        selected: usize,
    },
    Confirm {
        title: String,
        message: String,
    },
    Executing {
        message: String,
    },
    Result {
        title: String,
        message: String,
        success: bool,
    },
}

/// What a list screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// First page not yet loaded.
    Loading { message: String },
    /// Nothing loaded and the load failed.
    Error { message: String },
    Empty { message: String },
    Table {
        headers: Vec<&'static str>,
        widths: Vec<ColumnWidth>,
        rows: Vec<Vec<String>>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub body: Body,
    /// `Some` while the search bar is visible.
    pub search: Option<SearchView>,
    pub status: String,
    /// Error from a failed refresh or navigation, shown under the table.
    pub inline_error: Option<String>,
    pub busy: bool,
    pub overlay: OverlayView,
    pub hints: Vec<Hint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub text: String,
    pub editing: bool,
    pub cursor: usize,
}

/// `Showing a-b of N`, with `+` when more pages exist beyond a total the
/// server did not report exactly.
pub fn range_label(
    page: usize,
    page_size: usize,
    shown: usize,
    total: Option<u64>,
    has_more: bool,
) -> String {
    if shown == 0 {
        return "Showing 0 of 0".to_string();
    }
    let start = page * page_size + 1;
    let end = start + shown - 1;
    let end_u64 = end as u64;
    match total {
        Some(total) if total > end_u64 || (total == end_u64 && !has_more) => {
            format!("Showing {start}-{end} of {total}")
        }
        _ if has_more => format!("Showing {start}-{end} of {end}+"),
        _ => format!("Showing {start}-{end} of {end}"),
    }
}

pub fn project<T: Clone>(
    engine: &ListEngine<T>,
    columns: &[Column<T>],
    names: ResourceNames,
    describe: fn(&T) -> String,
) -> ListView {
    let pagination = engine.pagination();
    let items = pagination.items();

    let body = if pagination.loading() && items.is_empty() {
        Body::Loading {
            message: format!("Loading {}...", names.plural),
        }
    } else if items.is_empty() {
        match pagination.error() {
            Some(err) => Body::Error {
                message: format!("Failed to load {}: {err}", names.plural),
            },
            None => Body::Empty {
                message: match engine.search().query() {
                    Some(q) => format!("No {} match \"{q}\"", names.plural),
                    None => format!("No {} found", names.plural),
                },
            },
        }
    } else {
        Body::Table {
            headers: columns.iter().map(|c| c.header).collect(),
            widths: columns.iter().map(|c| c.width).collect(),
            rows: items
                .iter()
                .map(|item| columns.iter().map(|c| (c.cell)(item)).collect())
                .collect(),
            selected: engine.selected(),
        }
    };

    let inline_error = match body {
        Body::Table { .. } => pagination.error().map(|e| format!("Error: {e}")),
        _ => None,
    };

    let search = engine.search();
    let search_view = if search.is_active() {
        Some(SearchView {
            text: search.draft().to_string(),
            editing: true,
            cursor: search.draft_cursor(),
        })
    } else {
        search.query().map(|q| SearchView {
            cursor: q.len(),
            text: q,
            editing: false,
        })
    };

    let mut status = range_label(
        pagination.current_page(),
        pagination.page_size(),
        items.len(),
        pagination.total_count(),
        pagination.has_more(),
    );
    let _ = write!(status, "  Page {}", pagination.current_page() + 1);

    ListView {
        body,
        search: search_view,
        status,
        inline_error,
        busy: pagination.loading()
            || pagination.navigating()
            || engine.has_pending_operation(),
        overlay: project_overlay(engine.overlay(), names, describe),
        hints: hints_for(engine),
    }
}

fn project_overlay<T>(
    overlay: &Overlay<T>,
    names: ResourceNames,
    describe: fn(&T) -> String,
) -> OverlayView {
    match overlay {
        Overlay::None => OverlayView::None,
        Overlay::ActionsPopup {
            operations,
            selected,
            target,
        } => OverlayView::Actions {
            title: format!("Actions: {}", describe(target)),
            options: operations.iter().map(option_label).collect(),
            selected: *selected,
        },
        Overlay::Confirm { operation, target } => OverlayView::Confirm {
            title: format!("{}?", operation.label),
            message: format!(
                "{} {} {}? This cannot be undone. [y/N]",
                operation.label,
                names.singular,
                describe(target)
            ),
        },
        Overlay::Executing { operation, target } => OverlayView::Executing {
            message: format!("{} {}...", operation.label, describe(target)),
        },
        Overlay::Result {
            operation,
            outcome,
            ..
        } => match outcome {
            Ok(message) => OverlayView::Result {
                title: format!("{} succeeded", operation.label),
                message: message.clone(),
                success: true,
            },
            Err(err) => OverlayView::Result {
                title: format!("{} failed", operation.label),
                message: err.clone(),
                success: false,
            },
        },
    }
}

fn option_label(op: &OperationSpec) -> String {
    match op.shortcut {
        Some(c) => format!("[{c}] {}", op.label),
        None => op.label.to_string(),
    }
}

fn hints_for<T: Clone>(engine: &ListEngine<T>) -> Vec<Hint> {
    if engine.search().is_active() {
        return vec![hint("Enter", "search"), hint("Esc", "cancel")];
    }
    match engine.overlay() {
        Overlay::ActionsPopup { .. } => {
            return vec![hint("↑↓", "select"), hint("Enter", "run"), hint("Esc", "close")];
        }
        Overlay::Confirm { .. } => return vec![hint("y", "confirm"), hint("n/Esc", "cancel")],
        Overlay::Executing { .. } => return vec![hint("Esc", "hide")],
        Overlay::Result { .. } => return vec![hint("any key", "dismiss")],
        Overlay::None => {}
    }

    let pagination = engine.pagination();
    let mut hints = vec![hint("↑↓", "select")];
    if pagination.has_prev() || pagination.has_more() {
        hints.push(hint("←→", "page"));
    }
    hints.push(hint("Enter", "actions"));
    if engine.is_searchable() {
        hints.push(hint("/", "search"));
    }
    hints.push(hint("r", "refresh"));
    let back = if engine.search().query().is_some() {
        "clear search"
    } else {
        "back"
    };
    hints.push(hint("Esc", back));
    hints
}
