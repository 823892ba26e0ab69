//! Application state: the screen stack and action routing.
//!
//! Responsibilities:
//! - Route input, ticks, and async results to the right screen.
//! - Own the theme and the persisted UI state.
//! - Render the header, the top screen, and the footer.
//!
//! Does NOT handle:
//! - Spawning jobs, SSH handoff, or quitting. [`App::update`] returns those
//!   actions to the runtime.
//!
//! Invariants:
//! - The stack is never empty; the home menu is always at the bottom.
//! - Results addressed to a screen that has been popped are dropped.

use std::collections::VecDeque;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use runloop_client::RunloopClient;
use runloop_config::{ColorTheme, PersistedState, Theme};

use crate::action::{Action, ScreenId};
use crate::resources::ResourceKind;
use crate::screens::{HomeScreen, RenderContext, Screen, ScreenContext};
use crate::ui;

pub const HEADER_HEIGHT: u16 = 1;
pub const FOOTER_HEIGHT: u16 = 1;

pub struct App {
    stack: Vec<Box<dyn Screen>>,
    ctx: ScreenContext,
    color_theme: ColorTheme,
    theme: Theme,
    status: Option<String>,
    last_resource: Option<String>,
    tick: u64,
}

impl App {
    pub fn new(client: Arc<RunloopClient>, rows: u16, state: PersistedState) -> Self {
        let last = state
            .last_resource
            .as_deref()
            .and_then(ResourceKind::from_key);
        Self {
            stack: vec![Box::new(HomeScreen::new(last))],
            ctx: ScreenContext { client, rows },
            color_theme: state.selected_theme,
            theme: Theme::from_color_theme(state.selected_theme),
            status: None,
            last_resource: state.last_resource,
            tick: 0,
        }
    }

    /// Open `kind` on top of the home menu. Returns runtime actions.
    pub fn open(&mut self, kind: ResourceKind) -> Vec<Action> {
        self.update(Action::Push(kind.open(self.ctx.rows)))
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            selected_theme: self.color_theme,
            last_resource: self.last_resource.clone(),
        }
    }

    pub fn color_theme(&self) -> ColorTheme {
        self.color_theme
    }

    pub fn top(&self) -> &dyn Screen {
        // The stack is never empty.
        self.stack[self.stack.len() - 1].as_ref()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn rows(&self) -> u16 {
        self.ctx.rows
    }

    fn top_mut(&mut self) -> &mut Box<dyn Screen> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn find_mut(&mut self, id: ScreenId) -> Option<&mut Box<dyn Screen>> {
        self.stack.iter_mut().find(|s| s.id() == id)
    }

    /// Apply `action` and everything it triggers. Returns the actions only
    /// the runtime can perform: [`Action::Spawn`], [`Action::Ssh`], and
    /// [`Action::Quit`].
    pub fn update(&mut self, action: Action) -> Vec<Action> {
        let mut queue = VecDeque::from([action]);
        let mut runtime = Vec::new();
        while let Some(action) = queue.pop_front() {
            let follow_up = match action {
                Action::Input(key) => self.handle_key(key),
                Action::Resize { rows, .. } => {
                    self.ctx.rows = rows;
                    let ctx = self.ctx.clone();
                    self.top_mut().on_resize(&ctx)
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                    Vec::new()
                }
                Action::Poll => {
                    let ctx = self.ctx.clone();
                    self.top_mut().on_poll(&ctx)
                }
                Action::PageLoaded(delivery) => {
                    let ctx = self.ctx.clone();
                    match self.find_mut(delivery.screen) {
                        Some(screen) => screen.on_page(delivery, &ctx),
                        None => {
                            tracing::debug!(screen = delivery.screen, "Dropping page for closed screen");
                            Vec::new()
                        }
                    }
                }
                Action::OperationFinished {
                    screen,
                    operation,
                    outcome,
                } => {
                    if let Err(err) = &outcome {
                        tracing::warn!(operation, error = %err, "Operation failed");
                    }
                    let ctx = self.ctx.clone();
                    match self.find_mut(screen) {
                        Some(screen) => screen.on_operation(operation, outcome, &ctx),
                        None => Vec::new(),
                    }
                }
                Action::TextLoaded { screen, result } => {
                    if let Some(screen) = self.find_mut(screen) {
                        screen.on_text(result);
                    }
                    Vec::new()
                }
                Action::Push(mut screen) => {
                    let ctx = self.ctx.clone();
                    let mounted = screen.on_mount(&ctx);
                    if let Some(key) = screen.resource_key() {
                        self.last_resource = Some(key.to_string());
                    }
                    tracing::debug!(title = %screen.title(), "Opening screen");
                    self.stack.push(screen);
                    mounted
                }
                Action::Back => {
                    if self.stack.len() > 1 {
                        self.stack.pop();
                        // The exposed screen may have missed resizes.
                        let ctx = self.ctx.clone();
                        self.top_mut().on_resize(&ctx)
                    } else {
                        Vec::new()
                    }
                }
                Action::SshFinished(result) => {
                    self.status = Some(match result {
                        Ok(()) => "SSH session ended".to_string(),
                        Err(err) => format!("SSH failed: {err}"),
                    });
                    Vec::new()
                }
                Action::Status(message) => {
                    self.status = Some(message);
                    Vec::new()
                }
                Action::CycleTheme => {
                    self.color_theme = self.color_theme.cycle_next();
                    self.theme = Theme::from_color_theme(self.color_theme);
                    self.status = Some(format!("Theme: {}", self.color_theme));
                    Vec::new()
                }
                action @ (Action::Spawn(_) | Action::Ssh { .. } | Action::Quit) => {
                    runtime.push(action);
                    Vec::new()
                }
            };
            queue.extend(follow_up);
        }
        runtime
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }
        self.status = None;
        let ctx = self.ctx.clone();
        self.top_mut().on_key(key, &ctx)
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        let ctx = RenderContext {
            theme: &self.theme,
            spinner: ui::theme::spinner_char(self.tick),
        };
        let crumbs: Vec<String> = self.stack.iter().map(|s| s.title()).collect();
        ui::chrome::render_header(f, chunks[0], &crumbs, ctx);
        self.top().render(f, chunks[1], ctx);
        ui::chrome::render_footer(f, chunks[2], &self.top().hints(), self.status(), ctx);
    }
}
