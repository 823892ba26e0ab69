//! Detail and log viewer rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::ThemeExt;
use crate::screens::RenderContext;
use crate::screens::detail::DetailContent;

pub fn render_detail(
    f: &mut Frame,
    area: Rect,
    title: &str,
    content: &DetailContent,
    scroll: u16,
    ctx: RenderContext<'_>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border())
        .title(Span::styled(format!(" {title} "), ctx.theme.title()));

    let paragraph = match content {
        DetailContent::Loading => Paragraph::new(Span::styled(
            format!("{} Loading...", ctx.spinner),
            ctx.theme.text_dim(),
        )),
        DetailContent::Failed(err) => {
            Paragraph::new(Span::styled(format!("Error: {err}"), ctx.theme.error()))
                .wrap(Wrap { trim: false })
        }
        DetailContent::Text(text) => Paragraph::new(text.as_str())
            .style(ctx.theme.text())
            .scroll((scroll, 0)),
    };
    f.render_widget(paragraph.block(block), area);
}
