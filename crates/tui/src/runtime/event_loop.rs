//! The TUI main loop.
//!
//! Responsibilities:
//! - Set up logging, metrics, the client, and the terminal.
//! - Multiplex input, UI ticks, background polls, and job results.
//! - Run jobs on a `TaskTracker` and cancel them on exit.
//! - Hand the terminal to `ssh` and take it back.
//!
//! Does NOT handle:
//! - Interaction logic (see `crate::app` and `crate::engine`).
//!
//! Invariants:
//! - The input reader is stopped while a child process owns the terminal.
//! - Persisted state is saved on every exit path that reaches the end of `run`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use runloop_client::metrics_exporter::MetricsExporter;
use runloop_client::{MetricsCollector, RunloopClient, ssh};
use runloop_config::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_UI_TICK_MS};
use runloop_config::persistence::{default_log_dir, ssh_key_dir};
use runloop_config::{Config, PersistedState, StateStore};
use tokio::sync::mpsc::{self, Sender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::terminal::{self, TerminalGuard, TerminalHandoff, Tui};
use crate::action::Action;
use crate::app::App;
use crate::resources::ResourceKind;

/// Everything `run` needs from its caller.
pub struct RunOptions {
    pub config: Config,
    /// Defaults to the platform data directory.
    pub log_dir: Option<PathBuf>,
    pub metrics_bind: Option<String>,
    /// Open this resource instead of the home menu.
    pub resource: Option<ResourceKind>,
    /// Ignore persisted state.
    pub fresh: bool,
}

/// Run the TUI until the user quits.
pub async fn run(options: RunOptions) -> Result<()> {
    let log_dir = match options.log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };
    let _log_guard = super::logging::init(&log_dir)?;

    let metrics_exporter = match options.metrics_bind.as_deref() {
        Some(bind) => match MetricsExporter::install(bind) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind);
                Some(exporter)
            }
            Err(e) => {
                tracing::error!("Failed to start metrics exporter: {}", e);
                None
            }
        },
        None => None,
    };
    let metrics = if metrics_exporter.is_some() {
        MetricsCollector::new()
    } else {
        MetricsCollector::disabled()
    };

    let client = Arc::new(
        RunloopClient::builder()
            .from_config(&options.config)
            .metrics(metrics)
            .build()
            .context("Failed to build Runloop client")?,
    );

    let mut store = match StateStore::new() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "State file unavailable, preferences will not persist");
            None
        }
    };
    let mut state = match (&store, options.fresh) {
        (Some(store), false) => store.load(),
        _ => PersistedState::default(),
    };
    if let Some(theme) = options.config.theme {
        state.selected_theme = theme;
    }

    let mut tui = terminal::enter()?;
    let _guard = TerminalGuard;
    let rows = tui.size()?.height;

    let mut app = App::new(client.clone(), rows, state);
    let (tx, mut rx) = mpsc::channel::<Action>(DEFAULT_CHANNEL_CAPACITY);
    let tracker = TaskTracker::new();
    let cancel = CancellationToken::new();

    let mut pending: Vec<Action> = match options.resource {
        Some(kind) => app.open(kind),
        None => Vec::new(),
    };

    let mut input = spawn_input(tx.clone());
    let mut tick_interval = tokio::time::interval(Duration::from_millis(DEFAULT_UI_TICK_MS));
    let mut poll_interval = tokio::time::interval(options.config.poll_interval);
    // The first poll tick fires immediately; the mount fetch already covers it.
    poll_interval.tick().await;

    let ssh_proxy = options.config.connection.ssh_proxy.clone();

    'main: loop {
        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                match action {
                    Action::Quit => break 'main,
                    Action::Spawn(job) => spawn_job(&tracker, &cancel, &tx, job),
                    Action::Ssh { devbox_id } => {
                        input.abort();
                        let result = ssh_session(&mut tui, &client, &devbox_id, &ssh_proxy).await;
                        input = spawn_input(tx.clone());
                        pending.extend(app.update(Action::SshFinished(result)));
                        let size = tui.size()?;
                        pending.extend(app.update(Action::Resize {
                            cols: size.width,
                            rows: size.height,
                        }));
                    }
                    other => pending.extend(app.update(other)),
                }
            }
        }

        tui.draw(|f| app.render(f))?;

        tokio::select! {
            Some(action) = rx.recv() => pending.extend(app.update(action)),
            _ = tick_interval.tick() => pending.extend(app.update(Action::Tick)),
            _ = poll_interval.tick() => pending.extend(app.update(Action::Poll)),
        }
    }

    input.abort();
    cancel.cancel();
    tracker.close();
    tracker.wait().await;

    if let Some(store) = store.as_mut()
        && let Err(e) = store.save(&app.persisted_state())
    {
        tracing::error!(error = %e, "Failed to persist state");
    }

    terminal::release(&mut tui)?;
    Ok(())
}

fn spawn_job(
    tracker: &TaskTracker,
    cancel: &CancellationToken,
    tx: &Sender<Action>,
    job: crate::action::Job,
) {
    let tx = tx.clone();
    let cancel = cancel.clone();
    let label = job.label;
    let future = job.future;
    tracker.spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(job = %label, "Job cancelled");
            }
            action = future => {
                if tx.send(action).await.is_err() {
                    tracing::debug!(job = %label, "Event loop gone, dropping job result");
                }
            }
        }
    });
}

/// Terminal events become actions. Key and resize events use `send().await`
/// so they are never dropped under backpressure.
fn spawn_input(tx: Sender<Action>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            let action = match event {
                Ok(Event::Key(key)) => Action::Input(key),
                Ok(Event::Resize(cols, rows)) => Action::Resize { cols, rows },
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "Terminal event stream failed");
                    break;
                }
            };
            if tx.send(action).await.is_err() {
                break;
            }
        }
    })
}

async fn ssh_session(
    tui: &mut Tui,
    client: &RunloopClient,
    devbox_id: &str,
    proxy: &str,
) -> Result<(), String> {
    let key_dir = ssh_key_dir().map_err(|e| e.to_string())?;
    let target = ssh::prepare(client, devbox_id, proxy, &key_dir)
        .await
        .map_err(|e| e.to_string())?;

    let handoff = TerminalHandoff::begin(tui).map_err(|e| e.to_string())?;
    tracing::info!(devbox_id, "Starting SSH session");
    let mut command = target.ssh_command();
    let status = tokio::task::spawn_blocking(move || command.status()).await;
    handoff.finish().map_err(|e| e.to_string())?;

    let status = status
        .map_err(|e| e.to_string())?
        .map_err(|e| format!("could not start ssh: {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("ssh exited with {status}"))
    }
}
