//! Header breadcrumb and footer hint bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ThemeExt;
use crate::engine::Hint;
use crate::screens::RenderContext;

pub fn render_header(f: &mut Frame, area: Rect, crumbs: &[String], ctx: RenderContext<'_>) {
    let mut spans = Vec::with_capacity(crumbs.len() * 2);
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", ctx.theme.text_dim()));
        }
        let style = if i + 1 == crumbs.len() {
            ctx.theme.title()
        } else {
            ctx.theme.text()
        };
        spans.push(Span::styled(crumb.clone(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn hint_spans(hints: &[Hint], ctx: RenderContext<'_>) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", ctx.theme.text_dim()));
        }
        spans.push(Span::styled(hint.key, ctx.theme.hint_key()));
        spans.push(Span::styled(format!(" {}", hint.label), ctx.theme.text_dim()));
    }
    spans
}

pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    hints: &[Hint],
    status: Option<&str>,
    ctx: RenderContext<'_>,
) {
    let status_width = status.map_or(0, |s| s.chars().count() as u16 + 1);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(status_width)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(hint_spans(hints, ctx))), chunks[0]);
    if let Some(status) = status {
        f.render_widget(
            Paragraph::new(Span::styled(status.to_string(), ctx.theme.info()))
                .alignment(Alignment::Right),
            chunks[1],
        );
    }
}
