//! Resource list rendering from a projected [`ListView`].
//!
//! Layout, top to bottom: optional search bar (3 rows), bordered table,
//! status line, inline error line. Together with the app header and footer
//! these match the chrome rows the viewport reserves.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::ThemeExt;
use crate::engine::{Body, ColumnWidth, ListView, SearchView};
use crate::screens::RenderContext;

fn constraint(width: ColumnWidth) -> Constraint {
    match width {
        ColumnWidth::Fixed(n) => Constraint::Length(n),
        ColumnWidth::Min(n) => Constraint::Min(n),
        ColumnWidth::Fill => Constraint::Fill(1),
    }
}

pub fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    view: &ListView,
    ctx: RenderContext<'_>,
) {
    let search_rows = if view.search.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(search_rows),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    if let Some(search) = &view.search {
        render_search(f, chunks[0], search, ctx);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border())
        .title(Span::styled(format!(" {title} "), ctx.theme.title()));

    match &view.body {
        Body::Loading { message } => f.render_widget(
            Paragraph::new(Span::styled(
                format!("{} {message}", ctx.spinner),
                ctx.theme.text_dim(),
            ))
            .block(block),
            chunks[1],
        ),
        Body::Error { message } => f.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(message.clone(), ctx.theme.error())),
                Line::from(Span::styled("Press r to retry", ctx.theme.text_dim())),
            ])
            .block(block),
            chunks[1],
        ),
        Body::Empty { message } => f.render_widget(
            Paragraph::new(Span::styled(message.clone(), ctx.theme.text_dim())).block(block),
            chunks[1],
        ),
        Body::Table {
            headers,
            widths,
            rows,
            selected,
        } => {
            let header = Row::new(headers.iter().map(|h| Cell::from(*h)))
                .style(ctx.theme.table_header());
            let rows = rows
                .iter()
                .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.as_str()))));
            let table = Table::new(rows, widths.iter().copied().map(constraint))
                .header(header)
                .block(block)
                .style(ctx.theme.text())
                .row_highlight_style(ctx.theme.highlight())
                .highlight_symbol("▶ ");
            let mut state = TableState::default().with_selected(Some(*selected));
            f.render_stateful_widget(table, chunks[1], &mut state);
        }
    }

    let mut status = vec![Span::styled(view.status.clone(), ctx.theme.text_dim())];
    if view.busy {
        status.push(Span::styled(format!("  {}", ctx.spinner), ctx.theme.info()));
    }
    f.render_widget(Paragraph::new(Line::from(status)), chunks[2]);

    if let Some(err) = &view.inline_error {
        f.render_widget(
            Paragraph::new(Span::styled(err.clone(), ctx.theme.error())),
            chunks[3],
        );
    }

    super::overlay::render_overlay(f, area, &view.overlay, ctx);
}

fn render_search(f: &mut Frame, area: Rect, search: &SearchView, ctx: RenderContext<'_>) {
    let style = if search.editing {
        ctx.theme.title()
    } else {
        ctx.theme.border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(" Search ");
    let inner = block.inner(area);
    f.render_widget(
        Paragraph::new(Span::styled(search.text.clone(), ctx.theme.text())).block(block),
        area,
    );
    if search.editing {
        let offset = u16::try_from(search.cursor).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        f.set_cursor_position((x, inner.y));
    }
}
