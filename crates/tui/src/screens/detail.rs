//! Scrollable read-only text: item details and fetched logs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

use super::{RenderContext, Screen, ScreenContext};
use crate::action::{Action, ScreenId, next_screen_id};
use crate::engine::{Hint, hint};
use crate::ui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailContent {
    Loading,
    Text(String),
    Failed(String),
}

pub struct DetailScreen {
    id: ScreenId,
    title: String,
    content: DetailContent,
    scroll: u16,
}

impl DetailScreen {
    pub fn new(title: String, body: String) -> Self {
        Self {
            id: next_screen_id(),
            title,
            content: DetailContent::Text(body),
            scroll: 0,
        }
    }

    /// Detail whose body arrives later through [`Screen::on_text`].
    pub fn loading(title: String) -> Self {
        Self {
            id: next_screen_id(),
            title,
            content: DetailContent::Loading,
            scroll: 0,
        }
    }

    pub fn content(&self) -> &DetailContent {
        &self.content
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        match &self.content {
            DetailContent::Text(text) => {
                u16::try_from(text.lines().count().saturating_sub(1)).unwrap_or(u16::MAX)
            }
            _ => 0,
        }
    }
}

impl Screen for DetailScreen {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn on_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Vec<Action> {
        let page = ctx.rows.saturating_sub(4).max(1);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return vec![Action::Back],
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll = self.scroll.saturating_add(page)
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = self.max_scroll(),
            _ => {}
        }
        self.scroll = self.scroll.min(self.max_scroll());
        Vec::new()
    }

    fn on_text(&mut self, result: Result<String, String>) {
        self.content = match result {
            Ok(text) => DetailContent::Text(text),
            Err(err) => DetailContent::Failed(err),
        };
        self.scroll = 0;
    }

    fn hints(&self) -> Vec<Hint> {
        vec![hint("↑↓/jk", "scroll"), hint("g/G", "top/bottom"), hint("Esc", "back")]
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        ui::detail::render_detail(f, area, &self.title, &self.content, self.scroll, ctx);
    }
}
