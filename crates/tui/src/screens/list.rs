//! Generic resource list screen.
//!
//! Adapts terminal events to [`ListEngine`] events and turns the engine's
//! effects into actions: fetches and operations become spawned jobs,
//! navigation pushes screens or hands off to SSH.

use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use runloop_client::{ListParams, Page};

use super::{DetailScreen, RenderContext, Screen, ScreenContext};
use crate::action::{Action, Delivery, Job, ScreenId, next_screen_id};
use crate::engine::{
    Effect, FetchRequest, Hint, ListConfig, ListEngine, ListEvent, ListKey, ListView,
    OperationOutcome, project,
};
use crate::resources::{Navigation, ResourceSpec};
use crate::ui;

/// Map a terminal key to the engine's key vocabulary.
pub fn to_list_key(key: KeyEvent) -> Option<ListKey> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    Some(match key.code {
        KeyCode::Up => ListKey::Up,
        KeyCode::Down => ListKey::Down,
        KeyCode::Left => ListKey::Left,
        KeyCode::Right => ListKey::Right,
        KeyCode::Home => ListKey::Home,
        KeyCode::End => ListKey::End,
        KeyCode::Enter => ListKey::Enter,
        KeyCode::Esc => ListKey::Esc,
        KeyCode::Backspace => ListKey::Backspace,
        KeyCode::Delete => ListKey::Delete,
        KeyCode::Char(c) => ListKey::Char(c),
        _ => return None,
    })
}

pub struct ListScreen<T> {
    id: ScreenId,
    spec: ResourceSpec<T>,
    engine: ListEngine<T>,
}

impl<T> ListScreen<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(spec: ResourceSpec<T>, rows: u16) -> Self {
        let engine = ListEngine::new(
            ListConfig {
                item_id: spec.item_id,
                operations: spec.operations,
                searchable: spec.searchable,
            },
            rows,
        );
        Self {
            id: next_screen_id(),
            spec,
            engine,
        }
    }

    pub fn engine(&self) -> &ListEngine<T> {
        &self.engine
    }

    pub fn view(&self) -> ListView {
        project(
            &self.engine,
            &self.spec.columns,
            self.spec.names,
            self.spec.describe,
        )
    }

    fn dispatch(&mut self, event: ListEvent<T>, ctx: &ScreenContext) -> Vec<Action> {
        let effects = self.engine.dispatch(event);
        effects
            .into_iter()
            .flat_map(|effect| self.perform(effect, ctx))
            .collect()
    }

    fn perform(&self, effect: Effect<T>, ctx: &ScreenContext) -> Vec<Action> {
        match effect {
            Effect::Fetch(request) => vec![self.fetch_job(request, ctx)],
            Effect::Execute { operation, target } => {
                let execute = self.spec.execute;
                let client = ctx.client.clone();
                let screen = self.id;
                let label = format!("{} {}", operation.id, (self.spec.describe)(&target));
                vec![Action::Spawn(Job::new(label, async move {
                    let outcome = execute(client, operation.id, target)
                        .await
                        .map_err(|e| e.to_string());
                    Action::OperationFinished {
                        screen,
                        operation: operation.id,
                        outcome,
                    }
                }))]
            }
            Effect::Navigate { operation, target } => {
                match (self.spec.navigate)(ctx.client.clone(), operation.id, &target) {
                    Navigation::Detail { title, body } => {
                        vec![Action::Push(Box::new(DetailScreen::new(title, body)))]
                    }
                    Navigation::Fetch { title, load } => {
                        let screen = DetailScreen::loading(title.clone());
                        let id = screen.id();
                        vec![
                            Action::Push(Box::new(screen)),
                            Action::Spawn(Job::new(title, async move {
                                Action::TextLoaded {
                                    screen: id,
                                    result: load.await,
                                }
                            })),
                        ]
                    }
                    Navigation::Ssh { devbox_id } => vec![Action::Ssh { devbox_id }],
                    Navigation::None => Vec::new(),
                }
            }
            Effect::Back => vec![Action::Back],
        }
    }

    fn fetch_job(&self, request: FetchRequest, ctx: &ScreenContext) -> Action {
        let params = ListParams::new()
            .limit(request.limit)
            .starting_after(request.cursor)
            .search(request.search);
        let fetch = self.spec.fetch;
        let client = ctx.client.clone();
        let screen = self.id;
        let id = request.id;
        tracing::debug!(
            resource = self.spec.key,
            request = id,
            kind = ?request.kind,
            "Fetching page"
        );
        Action::Spawn(Job::new(format!("list {}", self.spec.key), async move {
            let payload = fetch(client, params)
                .await
                .map(|page| Box::new(page) as Box<dyn Any + Send>)
                .map_err(|e| e.to_string());
            Action::PageLoaded(Delivery {
                screen,
                request: id,
                payload,
            })
        }))
    }
}

impl<T> Screen for ListScreen<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn id(&self) -> ScreenId {
        self.id
    }

    fn title(&self) -> String {
        self.spec.title.to_string()
    }

    fn resource_key(&self) -> Option<&'static str> {
        Some(self.spec.key)
    }

    fn captures_text(&self) -> bool {
        self.engine.search().is_active()
    }

    fn on_mount(&mut self, ctx: &ScreenContext) -> Vec<Action> {
        let effects = self.engine.mount();
        effects
            .into_iter()
            .flat_map(|effect| self.perform(effect, ctx))
            .collect()
    }

    fn on_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Vec<Action> {
        match to_list_key(key) {
            Some(key) => self.dispatch(ListEvent::Key(key), ctx),
            None => Vec::new(),
        }
    }

    fn on_resize(&mut self, ctx: &ScreenContext) -> Vec<Action> {
        self.dispatch(ListEvent::Resize { rows: ctx.rows }, ctx)
    }

    fn on_poll(&mut self, ctx: &ScreenContext) -> Vec<Action> {
        if !self.engine.polling_enabled() {
            return Vec::new();
        }
        self.dispatch(ListEvent::PollTick, ctx)
    }

    fn on_page(&mut self, delivery: Delivery, ctx: &ScreenContext) -> Vec<Action> {
        let result = delivery.payload.and_then(|payload| {
            payload
                .downcast::<Page<T>>()
                .map(|page| *page)
                .map_err(|_| format!("unexpected payload for {}", self.spec.key))
        });
        self.dispatch(
            ListEvent::PageLoaded {
                request: delivery.request,
                result,
            },
            ctx,
        )
    }

    fn on_operation(
        &mut self,
        operation: &'static str,
        outcome: OperationOutcome,
        ctx: &ScreenContext,
    ) -> Vec<Action> {
        self.dispatch(ListEvent::OperationFinished { operation, outcome }, ctx)
    }

    fn hints(&self) -> Vec<Hint> {
        self.view().hints
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        ui::list::render_list(f, area, self.spec.title, &self.view(), ctx);
    }
}
