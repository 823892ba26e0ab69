//! Command-line arguments for `runloop-tui`.
//!
//! Responsibilities:
//! - Define the argument structure with clap derive macros.
//!
//! Does NOT handle:
//! - Configuration loading (see `runloop_config::ConfigLoader`).
//! - Terminal state management (see `runtime::terminal`).
//!
//! Invariants:
//! - Configuration precedence: CLI args > `RUNLOOP_*` env vars > `.env` > defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::resources::ResourceKind;

#[derive(Debug, Parser)]
#[command(
    name = "runloop-tui",
    about = "Terminal user interface for Runloop devboxes and resources",
    version,
    after_help = "Examples:\n  runloop-tui\n  runloop-tui --resource devboxes\n  runloop-tui --log-dir /tmp/runloop-logs --fresh\n"
)]
pub struct Cli {
    /// API key (defaults to RUNLOOP_API_KEY)
    #[arg(long, env = "RUNLOOP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    /// Open a resource list directly (devboxes, blueprints, snapshots, ...)
    #[arg(long, short = 'r', value_parser = parse_resource)]
    pub resource: Option<ResourceKind>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Start with fresh state, ignoring any persisted state
    #[arg(long)]
    pub fresh: bool,

    /// Enable Prometheus metrics endpoint and bind address (e.g., "localhost:9090")
    #[arg(long, env = "RUNLOOP_METRICS_BIND")]
    pub metrics_bind: Option<String>,
}

pub fn parse_resource(value: &str) -> Result<ResourceKind, String> {
    ResourceKind::from_key(value).ok_or_else(|| {
        let known: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.key()).collect();
        format!("unknown resource '{value}' (expected one of: {})", known.join(", "))
    })
}
