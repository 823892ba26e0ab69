//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main`).

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "rl")]
#[command(about = "Runloop CLI - manage devboxes, blueprints, and platform resources", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  rl devbox list\n  rl devbox create --name api --blueprint-name python-base\n  rl devbox ssh --id dbx_123\n  rl devbox scp --id dbx_123 ./app.py :/home/user/app.py\n  rl -o json snapshot list --devbox-id dbx_123\n  rl mcp start\n"
)]
pub struct Cli {
    /// API base URL override (defaults to the RUNLOOP_ENV platform)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key
    #[arg(long, global = true, env = "RUNLOOP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format (text, json, yaml). Without it, list commands on a
    /// terminal open the interactive browser.
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Enable Prometheus metrics endpoint and bind address (e.g., "localhost:9090")
    #[arg(long, global = true, env = "RUNLOOP_METRICS_BIND")]
    pub metrics_bind: Option<String>,

    /// Suppress progress spinners (they always write to STDERR).
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage devboxes
    Devbox {
        #[command(subcommand)]
        command: commands::devbox::DevboxCommand,
    },

    /// Manage blueprints
    Blueprint {
        #[command(subcommand)]
        command: commands::blueprint::BlueprintCommand,
    },

    /// Manage disk snapshots
    Snapshot {
        #[command(subcommand)]
        command: commands::snapshot::SnapshotCommand,
    },

    /// Manage account secrets
    Secret {
        #[command(subcommand)]
        command: commands::secret::SecretCommand,
    },

    /// Manage network policies
    NetworkPolicy {
        #[command(subcommand)]
        command: commands::network::ConfigResourceCommand,
    },

    /// Manage gateway configs
    GatewayConfig {
        #[command(subcommand)]
        command: commands::network::ConfigResourceCommand,
    },

    /// Manage MCP configs
    McpConfig {
        #[command(subcommand)]
        command: commands::network::ConfigResourceCommand,
    },

    /// Manage storage objects
    Object {
        #[command(subcommand)]
        command: commands::object::ObjectCommand,
    },

    /// Manage benchmark runs
    BenchmarkRun {
        #[command(subcommand)]
        command: commands::benchmark::BenchmarkRunCommand,
    },

    /// Model Context Protocol server
    Mcp {
        #[command(subcommand)]
        command: commands::mcp::McpCommand,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// True when this invocation may open the interactive browser and so
    /// must not write logs to the terminal.
    pub fn may_launch_tui(&self) -> bool {
        self.output.is_none()
            && crate::interactive::is_interactive()
            && match &self.command {
                Commands::Devbox { command } => command.is_list(),
                Commands::Blueprint { command } => command.is_list(),
                Commands::Snapshot { command } => command.is_list(),
                Commands::Secret { command } => command.is_list(),
                Commands::NetworkPolicy { command }
                | Commands::GatewayConfig { command }
                | Commands::McpConfig { command } => command.is_list(),
                Commands::Object { command } => command.is_list(),
                Commands::BenchmarkRun { command } => command.is_list(),
                Commands::Mcp { .. } | Commands::Completions { .. } => false,
            }
    }

    /// True for commands whose stdout must stay free of notices.
    pub fn is_machine_channel(&self) -> bool {
        matches!(self.command, Commands::Mcp { .. } | Commands::Completions { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_output_after_subcommand() {
        let cli = Cli::try_parse_from(["rl", "devbox", "get", "--id", "dbx_1", "-o", "json"])
            .unwrap();
        assert_eq!(cli.output.as_deref(), Some("json"));
    }

    #[test]
    fn test_output_flag_disables_tui() {
        let cli = Cli::try_parse_from(["rl", "-o", "yaml", "devbox", "list"]).unwrap();
        assert!(!cli.may_launch_tui());
    }

    #[test]
    fn test_mcp_is_machine_channel() {
        let cli = Cli::try_parse_from(["rl", "mcp", "start"]).unwrap();
        assert!(cli.is_machine_channel());
        assert!(!cli.may_launch_tui());
    }
}
