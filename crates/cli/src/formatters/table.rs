//! Text table rendering.
//!
//! Responsibilities:
//! - Lay out a page of resources as aligned columns with a range footer.
//! - Lay out one resource as `Field  value` lines.
//!
//! Does NOT handle:
//! - Which columns a resource has (see `resources`).

use runloop_client::Page;
use runloop_tui::engine::range_label;

/// Representation for missing values in text output.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Column layout for one resource type in text output.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    /// Cell values, one per header.
    fn row(&self) -> Vec<String>;

    /// Cursor value for `--starting-after`.
    fn cursor(&self) -> &str;
}

/// `Some(v)` as its display string, `None` as `N/A`.
pub fn missing<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string())
}

pub fn render_table<T: Tabular>(page: &Page<T>, plural: &str, first_page: bool) -> String {
    if page.items.is_empty() {
        return format!("No {plural} found.");
    }

    let rows: Vec<Vec<String>> = page.items.iter().map(Tabular::row).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let header: Vec<String> = T::HEADERS.iter().map(|h| h.to_uppercase()).collect();
    push_line(&mut output, &header, &widths);
    for row in &rows {
        push_line(&mut output, row, &widths);
    }

    output.push('\n');
    let shown = page.items.len();
    if first_page {
        output.push_str(&range_label(0, shown, shown, page.total_count, page.has_more));
    } else {
        output.push_str(&format!("{shown} {plural}"));
    }
    if page.has_more
        && let Some(last) = page.items.last()
    {
        output.push_str(&format!("\nNext page: --starting-after {}", last.cursor()));
    }
    output
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            output.push_str(cell);
        } else {
            let pad = width.saturating_sub(cell.chars().count());
            output.push_str(cell);
            output.push_str(&" ".repeat(pad + 2));
        }
    }
    output.push('\n');
}

pub fn render_detail<T: Tabular>(item: &T) -> String {
    let width = T::HEADERS.iter().map(|h| h.len()).max().unwrap_or(0);
    T::HEADERS
        .iter()
        .zip(item.row())
        .map(|(header, value)| format!("{header:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
