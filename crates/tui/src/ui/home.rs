//! Home menu rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::{ThemeExt, centered_rect};
use crate::resources::ResourceKind;
use crate::screens::RenderContext;

pub fn render_home(f: &mut Frame, area: Rect, selected: usize, ctx: RenderContext<'_>) {
    let items: Vec<ListItem> = ResourceKind::ALL
        .iter()
        .map(|kind| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" [{}] ", kind.shortcut()), ctx.theme.hint_key()),
                Span::styled(kind.title(), ctx.theme.text()),
            ]))
        })
        .collect();

    let height = ResourceKind::ALL.len() as u16 + 2;
    let menu_area = centered_rect(50, height, area);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ctx.theme.border())
                .title(Span::styled(" Resources ", ctx.theme.title())),
        )
        .highlight_style(ctx.theme.highlight())
        .highlight_symbol("▶");

    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, menu_area, &mut state);
}
