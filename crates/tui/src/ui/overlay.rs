//! Action menu, confirmation, progress, and result dialogs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::{ThemeExt, centered_rect};
use crate::engine::OverlayView;
use crate::screens::RenderContext;

const DIALOG_WIDTH_PERCENT: u16 = 60;

fn dialog(title: String, border: Style, ctx: RenderContext<'_>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {title} "), ctx.theme.title()))
}

pub fn render_overlay(f: &mut Frame, area: Rect, overlay: &OverlayView, ctx: RenderContext<'_>) {
    match overlay {
        OverlayView::None => {}
        OverlayView::Actions {
            title,
            options,
            selected,
        } => {
            let height = options.len() as u16 + 2;
            let rect = centered_rect(DIALOG_WIDTH_PERCENT, height, area);
            f.render_widget(Clear, rect);
            let items: Vec<ListItem> = options
                .iter()
                .map(|o| ListItem::new(Span::styled(o.clone(), ctx.theme.text())))
                .collect();
            let list = List::new(items)
                .block(dialog(title.clone(), ctx.theme.border(), ctx))
                .highlight_style(ctx.theme.highlight())
                .highlight_symbol("▶ ");
            let mut state = ListState::default().with_selected(Some(*selected));
            f.render_stateful_widget(list, rect, &mut state);
        }
        OverlayView::Confirm { title, message } => {
            let rect = centered_rect(DIALOG_WIDTH_PERCENT, 5, area);
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(Span::styled(message.clone(), ctx.theme.warning()))
                    .wrap(Wrap { trim: true })
                    .block(dialog(title.clone(), ctx.theme.error(), ctx)),
                rect,
            );
        }
        OverlayView::Executing { message } => {
            let rect = centered_rect(DIALOG_WIDTH_PERCENT, 3, area);
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(Span::styled(
                    format!("{} {message}", ctx.spinner),
                    ctx.theme.info(),
                ))
                .block(dialog("Working".to_string(), ctx.theme.border(), ctx)),
                rect,
            );
        }
        OverlayView::Result {
            title,
            message,
            success,
        } => {
            let style = if *success {
                ctx.theme.success()
            } else {
                ctx.theme.error()
            };
            let rect = centered_rect(DIALOG_WIDTH_PERCENT, 7, area);
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(message.clone(), style)),
                    Line::from(""),
                    Line::from(Span::styled("Press any key to continue", ctx.theme.text_dim())),
                ])
                .wrap(Wrap { trim: false })
                .block(dialog(title.clone(), style, ctx)),
                rect,
            );
        }
    }
}
