//! Home menu: pick a resource to browse.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

use super::{RenderContext, Screen, ScreenContext};
use crate::action::{Action, ScreenId, next_screen_id};
use crate::engine::{Hint, hint};
use crate::resources::ResourceKind;
use crate::ui;

pub struct HomeScreen {
    id: ScreenId,
    selected: usize,
}

impl HomeScreen {
    /// Menu with `initial` preselected, if given.
    pub fn new(initial: Option<ResourceKind>) -> Self {
        let selected = initial
            .and_then(|kind| ResourceKind::ALL.iter().position(|k| *k == kind))
            .unwrap_or(0);
        Self {
            id: next_screen_id(),
            selected,
        }
    }

    pub fn selected(&self) -> ResourceKind {
        ResourceKind::ALL[self.selected]
    }

    fn open(&self, kind: ResourceKind, ctx: &ScreenContext) -> Vec<Action> {
        vec![Action::Push(kind.open(ctx.rows))]
    }
}

impl Screen for HomeScreen {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn title(&self) -> String {
        "Runloop".to_string()
    }

    fn on_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Vec<Action> {
        let last = ResourceKind::ALL.len() - 1;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter => return self.open(self.selected(), ctx),
            KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('t') => return vec![Action::CycleTheme],
            KeyCode::Char(c) => {
                if let Some(kind) = ResourceKind::ALL.into_iter().find(|k| k.shortcut() == c) {
                    self.selected = ResourceKind::ALL
                        .iter()
                        .position(|k| *k == kind)
                        .unwrap_or(self.selected);
                    return self.open(kind, ctx);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            hint("↑↓", "select"),
            hint("Enter", "open"),
            hint("t", "theme"),
            hint("q", "quit"),
        ]
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        ui::home::render_home(f, area, self.selected, ctx);
    }
}
