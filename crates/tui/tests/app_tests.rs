//! App routing tests against a mock Runloop API.
//!
//! This module tests:
//! - Opening a resource spawns its first fetch and renders the page
//! - Results for popped screens are dropped
//! - Home menu shortcuts, theme cycling, and quitting
//! - Persisted state reflects the last resource and theme
//!
//! ## Invariants
//! - Jobs returned by `App::update` are awaited by the test, standing in for
//!   the runtime.

mod helpers;
use helpers::*;

use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::{Terminal, backend::TestBackend};
use runloop_client::RunloopClient;
use runloop_config::{ColorTheme, PersistedState};
use runloop_tui::{Action, App, ResourceKind};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Arc<RunloopClient> {
    Arc::new(
        RunloopClient::builder()
            .base_url(server.uri())
            .api_key(SecretString::new("ak_test_123".to_string().into()))
            .max_retries(0)
            .build()
            .expect("client should build"),
    )
}

async fn mock_devboxes(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/devboxes"))
        .and(query_param("limit", "17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devboxes": [
                {"id": "dbx_alpha", "name": "api-worker", "status": "running"},
                {"id": "dbx_beta", "status": "suspended"}
            ],
            "has_more": false,
            "total_count": 2
        })))
        .mount(server)
        .await;
}

/// Await every spawned job and feed its result back, until none remain.
async fn drain(app: &mut App, mut actions: Vec<Action>) -> Vec<Action> {
    let mut rest = Vec::new();
    while let Some(action) = actions.pop() {
        match action {
            Action::Spawn(job) => {
                let result = job.future.await;
                actions.extend(app.update(result));
            }
            other => rest.push(other),
        }
    }
    rest
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
    terminal.draw(|f| app.render(f)).expect("draw");
    buffer_to_string(terminal.backend().buffer())
}

#[tokio::test]
async fn test_open_devboxes_loads_and_renders_rows() {
    let server = MockServer::start().await;
    mock_devboxes(&server).await;
    let mut app = App::new(client(&server), 24, PersistedState::default());

    let actions = app.open(ResourceKind::Devboxes);
    assert!(matches!(actions.as_slice(), [Action::Spawn(_)]));
    let rest = drain(&mut app, actions).await;
    assert!(rest.is_empty());

    assert_eq!(app.depth(), 2);
    assert_eq!(app.top().title(), "Devboxes");
    let screen = render(&app);
    assert!(screen.contains("dbx_alpha"), "{screen}");
    assert!(screen.contains("api-worker"));
    assert!(screen.contains("Showing 1-2 of 2"));
}

#[tokio::test]
async fn test_result_for_popped_screen_is_dropped() {
    let server = MockServer::start().await;
    mock_devboxes(&server).await;
    let mut app = App::new(client(&server), 24, PersistedState::default());

    let actions = app.open(ResourceKind::Devboxes);
    app.update(Action::Input(code(KeyCode::Esc)));
    assert_eq!(app.depth(), 1);

    let rest = drain(&mut app, actions).await;
    assert!(rest.is_empty());
    assert_eq!(app.depth(), 1);
    assert_eq!(app.top().title(), "Runloop");
}

#[tokio::test]
async fn test_initial_failure_renders_error_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secrets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("kaboom"))
        .mount(&server)
        .await;
    let mut app = App::new(client(&server), 24, PersistedState::default());

    let actions = app.open(ResourceKind::Secrets);
    drain(&mut app, actions).await;

    let screen = render(&app);
    assert!(screen.contains("Failed to load secrets"), "{screen}");
    // Escape still leaves the screen.
    app.update(Action::Input(code(KeyCode::Esc)));
    assert_eq!(app.depth(), 1);
}

#[tokio::test]
async fn test_home_shortcut_opens_resource_and_remembers_it() {
    let server = MockServer::start().await;
    let mut app = App::new(client(&server), 24, PersistedState::default());

    let actions = app.update(Action::Input(key('b')));
    assert!(matches!(actions.as_slice(), [Action::Spawn(_)]));
    assert_eq!(app.top().title(), "Blueprints");
    assert_eq!(
        app.persisted_state().last_resource.as_deref(),
        Some("blueprints")
    );
}

#[tokio::test]
async fn test_theme_cycles_and_persists() {
    let server = MockServer::start().await;
    let mut app = App::new(client(&server), 24, PersistedState::default());
    let before = app.color_theme();

    app.update(Action::Input(key('t')));
    let after = app.color_theme();
    assert_ne!(before, after);
    assert_eq!(after, ColorTheme::default().cycle_next());
    assert_eq!(app.persisted_state().selected_theme, after);
    assert!(app.status().is_some_and(|s| s.starts_with("Theme:")));

    // Any key clears the status line.
    app.update(Action::Input(code(KeyCode::Down)));
    assert!(app.status().is_none());
}

#[tokio::test]
async fn test_quit_keys() {
    let server = MockServer::start().await;
    let mut app = App::new(client(&server), 24, PersistedState::default());

    let actions = app.update(Action::Input(key('q')));
    assert!(matches!(actions.as_slice(), [Action::Quit]));

    app.open(ResourceKind::Objects);
    let actions = app.update(Action::Input(ctrl('c')));
    assert!(matches!(actions.as_slice(), [Action::Quit]));
}

#[tokio::test]
async fn test_ssh_result_reported_in_status() {
    let server = MockServer::start().await;
    let mut app = App::new(client(&server), 24, PersistedState::default());

    app.update(Action::SshFinished(Err("ssh exited with 255".into())));
    assert_eq!(app.status(), Some("SSH failed: ssh exited with 255"));

    let screen = render(&app);
    assert!(screen.contains("SSH failed"));
}

#[tokio::test]
async fn test_resize_changes_page_size_of_top_list() {
    let server = MockServer::start().await;
    mock_devboxes(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/devboxes"))
        .and(query_param("limit", "33"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devboxes": [], "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    let mut app = App::new(client(&server), 24, PersistedState::default());
    let actions = app.open(ResourceKind::Devboxes);
    drain(&mut app, actions).await;

    let actions = app.update(Action::Resize { cols: 100, rows: 40 });
    assert!(matches!(actions.as_slice(), [Action::Spawn(_)]));
    drain(&mut app, actions).await;
    assert_eq!(app.rows(), 40);
}
