//! Devbox command implementation.
//!
//! Responsibilities:
//! - Create, list, inspect, and change the lifecycle of devboxes.
//! - Run commands (sync and async) and read execution results and logs.
//! - Move files through the API (read/write/upload/download).
//! - Open SSH sessions, scp/rsync transfers, and port tunnels via the proxy.
//! - Start disk snapshots and query their status.
//!
//! Does NOT handle:
//! - Building ssh/scp/rsync command lines (see `runloop_client::ssh`).
//!
//! Invariants:
//! - Create arguments are validated before any request is sent: architecture
//!   is rejected with a blueprint, idle time and idle action come together,
//!   and `--root` excludes `--user`.
//! - `ssh` waits for `running` unless `--no-wait`; a devbox in `failure`,
//!   `shutdown`, or `suspended` fails immediately.
//! - Paths starting with `:` in scp/rsync are on the devbox.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use clap::builder::PossibleValuesParser;
use runloop_client::{
    AfterIdle, CreateDevboxRequest, ExecutionRequest, IdleAction, LaunchParameters, ListParams,
    UserParameters, ssh,
};
use runloop_config::constants::{DEFAULT_SSH_READY_POLL_SECS, DEFAULT_SSH_READY_TIMEOUT_SECS};
use runloop_config::persistence::ssh_key_dir;
use runloop_tui::ResourceKind;
use tracing::info;

use super::{CommandContext, ListArgs, run_get, run_list};
use crate::cancellation::{CancellationToken, Cancelled, cancellable};
use crate::formatters::{OutputFormat, format_value, output_result};
use crate::progress::Spinner;

pub(crate) const DEVBOX_STATUSES: [&str; 8] = [
    "provisioning",
    "initializing",
    "running",
    "suspending",
    "suspended",
    "resuming",
    "failure",
    "shutdown",
];

pub(crate) const RESOURCE_SIZES: [&str; 6] =
    ["X_SMALL", "SMALL", "MEDIUM", "LARGE", "X_LARGE", "XX_LARGE"];

pub(crate) const ARCHITECTURES: [&str; 2] = ["x86_64", "arm64"];

#[derive(Debug, Subcommand)]
pub enum DevboxCommand {
    /// Create a devbox
    Create(CreateArgs),

    /// List devboxes
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only devboxes in this status
        #[arg(long, value_parser = PossibleValuesParser::new(DEVBOX_STATUSES))]
        status: Option<String>,
    },

    /// Show one devbox
    Get {
        /// ID of the devbox
        #[arg(long)]
        id: String,
    },

    /// Execute a command and wait for it to finish
    Exec {
        #[arg(long)]
        id: String,
        /// Command to run
        #[arg(long)]
        command: String,
        /// Named shell session to run in
        #[arg(long)]
        shell_name: Option<String>,
    },

    /// Start a command without waiting for it
    ExecAsync {
        #[arg(long)]
        id: String,
        #[arg(long)]
        command: String,
        #[arg(long)]
        shell_name: Option<String>,
    },

    /// Show the state of an async execution
    GetAsyncExec {
        #[arg(long)]
        id: String,
        #[arg(long)]
        execution_id: String,
    },

    /// Print devbox logs
    Logs {
        #[arg(long)]
        id: String,
        /// Only logs of this execution
        #[arg(long)]
        execution_id: Option<String>,
    },

    /// Suspend a running devbox
    Suspend {
        #[arg(long)]
        id: String,
    },

    /// Resume a suspended devbox
    Resume {
        #[arg(long)]
        id: String,
    },

    /// Shut a devbox down
    Shutdown {
        #[arg(long)]
        id: String,
    },

    /// Open an SSH session to a devbox
    Ssh {
        #[arg(long)]
        id: String,
        /// Print an ~/.ssh/config Host block instead of connecting
        #[arg(long)]
        config_only: bool,
        /// Do not wait for the devbox to be running
        #[arg(long)]
        no_wait: bool,
        /// Seconds to wait for the devbox to be running
        #[arg(long, default_value_t = DEFAULT_SSH_READY_TIMEOUT_SECS)]
        timeout: u64,
        /// Seconds between readiness checks
        #[arg(long, default_value_t = DEFAULT_SSH_READY_POLL_SECS)]
        poll_interval: u64,
    },

    /// Copy files with scp (prefix devbox paths with ':')
    Scp {
        #[arg(long)]
        id: String,
        src: String,
        dst: String,
        /// Extra scp options, split like a shell would
        #[arg(long, allow_hyphen_values = true)]
        scp_options: Option<String>,
    },

    /// Sync files with rsync (prefix devbox paths with ':')
    Rsync {
        #[arg(long)]
        id: String,
        src: String,
        dst: String,
        /// Extra rsync options, split like a shell would
        #[arg(long, allow_hyphen_values = true)]
        rsync_options: Option<String>,
    },

    /// Forward a local port to a devbox port
    Tunnel {
        #[arg(long)]
        id: String,
        /// Ports as local:remote
        ports: String,
    },

    /// Read a file from a devbox
    Read {
        #[arg(long)]
        id: String,
        /// Path on the devbox
        #[arg(long)]
        remote: String,
        /// Local file to write (prints to stdout when omitted)
        #[arg(long)]
        output_path: Option<PathBuf>,
    },

    /// Write a local text file to a devbox
    Write {
        #[arg(long)]
        id: String,
        /// Local file to read
        #[arg(long)]
        input: PathBuf,
        /// Path on the devbox
        #[arg(long)]
        remote: String,
    },

    /// Upload a local file to a devbox
    Upload {
        #[arg(long)]
        id: String,
        /// Destination path on the devbox
        #[arg(long)]
        path: String,
        /// Local file to upload
        #[arg(long)]
        file: PathBuf,
    },

    /// Download a file from a devbox
    Download {
        #[arg(long)]
        id: String,
        /// Path on the devbox
        #[arg(long)]
        file_path: String,
        /// Local destination
        #[arg(long)]
        output_path: PathBuf,
    },

    /// Snapshot a devbox disk (returns immediately)
    Snapshot {
        #[arg(long)]
        id: String,
        /// Snapshot name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the status of a disk snapshot
    SnapshotStatus {
        #[arg(long)]
        snapshot_id: String,
    },
}

impl DevboxCommand {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { list, status: None } if list.is_default())
    }
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    /// Devbox name
    #[arg(long)]
    pub name: Option<String>,

    /// Command run when the devbox starts
    #[arg(long)]
    pub entrypoint: Option<String>,

    /// Environment variable as KEY=VALUE (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub env_vars: Vec<(String, String)>,

    /// Metadata entry as KEY=VALUE (repeatable)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub metadata: Vec<(String, String)>,

    /// Blueprint to boot from
    #[arg(long)]
    pub blueprint_id: Option<String>,

    /// Blueprint to boot from, by name
    #[arg(long)]
    pub blueprint_name: Option<String>,

    /// Disk snapshot to boot from
    #[arg(long)]
    pub snapshot_id: Option<String>,

    /// Code mount as a JSON object (repeatable)
    #[arg(long, value_name = "JSON", value_parser = parse_json_object)]
    pub code_mounts: Vec<serde_json::Value>,

    /// Command run at launch (repeatable)
    #[arg(long)]
    pub launch_commands: Vec<String>,

    /// Resource size
    #[arg(long, value_parser = PossibleValuesParser::new(RESOURCE_SIZES))]
    pub resources: Option<String>,

    /// CPU architecture (not allowed with a blueprint)
    #[arg(long, value_parser = PossibleValuesParser::new(ARCHITECTURES))]
    pub architecture: Option<String>,

    /// Idle seconds before the idle action runs
    #[arg(long, requires = "idle_action")]
    pub idle_time: Option<u64>,

    /// What to do once idle
    #[arg(long, requires = "idle_time", value_parser = parse_idle_action)]
    pub idle_action: Option<IdleAction>,

    /// Run as root
    #[arg(long, conflicts_with = "user")]
    pub root: bool,

    /// Run as this user (name:uid)
    #[arg(long, value_name = "NAME:UID", value_parser = parse_user)]
    pub user: Option<UserParameters>,
}

impl CreateArgs {
    /// Build and validate the request without touching the network.
    pub fn into_request(self) -> runloop_client::Result<CreateDevboxRequest> {
        let after_idle = match (self.idle_time, self.idle_action) {
            (Some(idle_time_seconds), Some(on_idle)) => Some(AfterIdle {
                idle_time_seconds,
                on_idle,
            }),
            (None, None) => None,
            _ => {
                return Err(runloop_client::ClientError::validation(
                    "idle",
                    "--idle-time and --idle-action must be set together",
                ));
            }
        };
        let user_parameters = user_parameters(self.root, self.user)?;

        let request = CreateDevboxRequest {
            name: self.name,
            entrypoint: self.entrypoint,
            environment_variables: self.env_vars.into_iter().collect(),
            blueprint_id: self.blueprint_id,
            blueprint_name: self.blueprint_name,
            snapshot_id: self.snapshot_id,
            code_mounts: self.code_mounts,
            launch_parameters: LaunchParameters {
                resource_size_request: self.resources,
                architecture: self.architecture,
                launch_commands: (!self.launch_commands.is_empty()).then_some(self.launch_commands),
                after_idle,
                user_parameters,
                ..LaunchParameters::default()
            },
            metadata: self.metadata.into_iter().collect::<BTreeMap<_, _>>(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// `--root` and `--user` are exclusive.
pub(crate) fn user_parameters(
    root: bool,
    user: Option<UserParameters>,
) -> runloop_client::Result<Option<UserParameters>> {
    match (root, user) {
        (true, Some(_)) => Err(runloop_client::ClientError::validation(
            "user",
            "only one of --user or --root can be specified",
        )),
        (true, None) => Ok(Some(UserParameters::root())),
        (false, user) => Ok(user),
    }
}

pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json_object(raw: &str) -> Result<serde_json::Value, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    Ok(value)
}

pub(crate) fn parse_user(raw: &str) -> Result<UserParameters, String> {
    raw.parse::<UserParameters>().map_err(|e| e.to_string())
}

fn parse_idle_action(raw: &str) -> Result<IdleAction, String> {
    raw.parse::<IdleAction>().map_err(|e| e.to_string())
}

pub async fn run(
    ctx: &CommandContext,
    command: DevboxCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        DevboxCommand::Create(args) => {
            let request = args.into_request()?;
            info!(name = ?request.name, "Creating devbox");
            let client = ctx.client()?;
            let devbox = cancellable(cancel, client.create_devbox(&request))
                .await
                .context("Failed to create devbox")?;
            ctx.print_item(&devbox)
        }
        DevboxCommand::List { list, status } => {
            let params = list.params().filter_opt("status", status);
            run_list(
                ctx,
                ResourceKind::Devboxes,
                &list,
                params,
                cancel,
                |client, params: ListParams| async move { client.list_devboxes(&params).await },
            )
            .await
        }
        DevboxCommand::Get { id } => {
            let client = ctx.client()?;
            run_get(ctx, "devbox", &id, cancel, client.get_devbox(&id)).await
        }
        DevboxCommand::Exec {
            id,
            command,
            shell_name,
        } => run_exec(ctx, &id, command, shell_name, cancel).await,
        DevboxCommand::ExecAsync {
            id,
            command,
            shell_name,
        } => {
            let client = ctx.client()?;
            let request = ExecutionRequest {
                command,
                shell_name,
            };
            info!(devbox_id = %id, "Starting async execution");
            let execution = cancellable(cancel, client.execute_async(&id, &request))
                .await
                .with_context(|| format!("Failed to start command on devbox {id}"))?;
            output_result(&format_value(&execution, ctx.format()?)?);
            Ok(())
        }
        DevboxCommand::GetAsyncExec { id, execution_id } => {
            let client = ctx.client()?;
            let execution = cancellable(cancel, client.get_execution(&id, &execution_id))
                .await
                .with_context(|| format!("Failed to get execution {execution_id}"))?;
            output_result(&format_value(&execution, ctx.format()?)?);
            Ok(())
        }
        DevboxCommand::Logs { id, execution_id } => {
            let client = ctx.client()?;
            let logs = cancellable(cancel, client.get_devbox_logs(&id, execution_id.as_deref()))
                .await
                .with_context(|| format!("Failed to get logs for devbox {id}"))?;
            match ctx.format()? {
                OutputFormat::Text => {
                    for entry in &logs.logs {
                        println!("{}", entry.format_line());
                    }
                }
                format => output_result(&format_value(&logs, format)?),
            }
            Ok(())
        }
        DevboxCommand::Suspend { id } => {
            let client = ctx.client()?;
            info!(devbox_id = %id, "Suspending devbox");
            let devbox = cancellable(cancel, client.suspend_devbox(&id))
                .await
                .with_context(|| format!("Failed to suspend devbox {id}"))?;
            ctx.print_item(&devbox)
        }
        DevboxCommand::Resume { id } => {
            let client = ctx.client()?;
            info!(devbox_id = %id, "Resuming devbox");
            let devbox = cancellable(cancel, client.resume_devbox(&id))
                .await
                .with_context(|| format!("Failed to resume devbox {id}"))?;
            ctx.print_item(&devbox)
        }
        DevboxCommand::Shutdown { id } => {
            let client = ctx.client()?;
            info!(devbox_id = %id, "Shutting down devbox");
            let devbox = cancellable(cancel, client.shutdown_devbox(&id))
                .await
                .with_context(|| format!("Failed to shut down devbox {id}"))?;
            ctx.print_item(&devbox)
        }
        DevboxCommand::Ssh {
            id,
            config_only,
            no_wait,
            timeout,
            poll_interval,
        } => {
            if !no_wait {
                wait_until_running(ctx, &id, timeout, poll_interval, cancel).await?;
            }
            let target = prepare_target(ctx, &id, cancel).await?;
            if config_only {
                print!("{}", target.config_block());
                return Ok(());
            }
            run_child(target.ssh_command(), cancel).await
        }
        DevboxCommand::Scp {
            id,
            src,
            dst,
            scp_options,
        } => {
            let target = prepare_target(ctx, &id, cancel).await?;
            run_child(target.scp_command(&src, &dst, scp_options.as_deref())?, cancel).await
        }
        DevboxCommand::Rsync {
            id,
            src,
            dst,
            rsync_options,
        } => {
            let target = prepare_target(ctx, &id, cancel).await?;
            run_child(
                target.rsync_command(&src, &dst, rsync_options.as_deref())?,
                cancel,
            )
            .await
        }
        DevboxCommand::Tunnel { id, ports } => {
            let (local, remote) = ssh::parse_port_pair(&ports)?;
            let target = prepare_target(ctx, &id, cancel).await?;
            eprintln!("Starting tunnel: local port {local} -> remote port {remote}");
            eprintln!("Press Ctrl+C to stop the tunnel.");
            match run_child(target.tunnel_command(local, remote), cancel).await {
                Err(e) if crate::cancellation::is_cancelled_error(&e) => {
                    eprintln!("\nStopping tunnel...");
                    Ok(())
                }
                other => other,
            }
        }
        DevboxCommand::Read {
            id,
            remote,
            output_path,
        } => {
            let client = ctx.client()?;
            let contents = cancellable(cancel, client.read_file_contents(&id, &remote))
                .await
                .with_context(|| format!("Failed to read {remote} on devbox {id}"))?;
            match output_path {
                Some(path) => {
                    write_local(&path, contents.as_bytes())?;
                    eprintln!(
                        "Wrote remote file {remote} from devbox {id} to local file {}",
                        path.display()
                    );
                }
                None => print!("{contents}"),
            }
            Ok(())
        }
        DevboxCommand::Write { id, input, remote } => {
            let contents = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read input file {}", input.display()))?;
            let client = ctx.client()?;
            cancellable(cancel, client.write_file_contents(&id, &remote, &contents))
                .await
                .with_context(|| format!("Failed to write {remote} on devbox {id}"))?;
            ctx.notice(format!(
                "Wrote local file {} to remote file {remote} on devbox {id}",
                input.display()
            ))
        }
        DevboxCommand::Upload { id, path, file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let client = ctx.client()?;
            let spinner = Spinner::new(!ctx.quiet, format!("Uploading {}", file.display()));
            cancellable(cancel, client.upload_file(&id, &path, &file_name, bytes))
                .await
                .with_context(|| format!("Failed to upload {} to devbox {id}", file.display()))?;
            drop(spinner);
            ctx.notice(format!("Uploaded file {} to {path}", file.display()))
        }
        DevboxCommand::Download {
            id,
            file_path,
            output_path,
        } => {
            let client = ctx.client()?;
            let bytes = cancellable(cancel, client.download_file(&id, &file_path))
                .await
                .with_context(|| format!("Failed to download {file_path} from devbox {id}"))?;
            write_local(&output_path, &bytes)?;
            ctx.notice(format!("File downloaded to {}", output_path.display()))
        }
        DevboxCommand::Snapshot { id, name } => {
            let client = ctx.client()?;
            info!(devbox_id = %id, "Starting disk snapshot");
            let snapshot = cancellable(cancel, client.snapshot_disk_async(&id, name.as_deref()))
                .await
                .with_context(|| format!("Failed to snapshot devbox {id}"))?;
            ctx.print_item(&snapshot)
        }
        DevboxCommand::SnapshotStatus { snapshot_id } => {
            super::snapshot::print_status(ctx, &snapshot_id, cancel).await
        }
    }
}

async fn run_exec(
    ctx: &CommandContext,
    id: &str,
    command: String,
    shell_name: Option<String>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = ctx.client()?;
    let request = ExecutionRequest {
        command,
        shell_name,
    };
    info!(devbox_id = %id, "Executing command");
    let execution = cancellable(cancel, client.execute_sync(id, &request))
        .await
        .with_context(|| format!("Failed to execute command on devbox {id}"))?;

    match ctx.format()? {
        OutputFormat::Text => {
            if let Some(stdout) = execution.stdout.as_deref() {
                print!("{stdout}");
            }
            if let Some(stderr) = execution.stderr.as_deref() {
                eprint!("{stderr}");
            }
            match execution.exit_status {
                Some(0) | None => Ok(()),
                Some(code) => bail!("command exited with status {code}"),
            }
        }
        format => {
            output_result(&format_value(&execution, format)?);
            Ok(())
        }
    }
}

async fn wait_until_running(
    ctx: &CommandContext,
    id: &str,
    timeout: u64,
    poll_interval: u64,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = ctx.client()?;
    let spinner = Spinner::new(!ctx.quiet, format!("Waiting for devbox {id} to be ready..."));
    let wait = ssh::wait_for_running(
        &client,
        id,
        Duration::from_secs(timeout),
        Duration::from_secs(poll_interval.max(1)),
        |status, elapsed| {
            let remaining = timeout.saturating_sub(elapsed.as_secs());
            spinner.set_message(format!(
                "Devbox {id} is still {status}... (elapsed: {}s, remaining: {remaining}s)",
                elapsed.as_secs()
            ));
        },
    );
    cancellable(cancel, wait).await?;
    spinner.finish(format!("Devbox {id} is ready!"));
    Ok(())
}

async fn prepare_target(
    ctx: &CommandContext,
    id: &str,
    cancel: &CancellationToken,
) -> Result<ssh::SshTarget> {
    let client = ctx.client()?;
    let key_dir = ssh_key_dir()?;
    cancellable(
        cancel,
        ssh::prepare(&client, id, &ctx.config.connection.ssh_proxy, &key_dir),
    )
    .await
    .with_context(|| format!("Failed to prepare SSH access to devbox {id}"))
}

/// Run a child process on the caller's terminal until it exits or Ctrl+C.
async fn run_child(command: Command, cancel: &CancellationToken) -> Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = tokio::process::Command::from(command)
        .spawn()
        .with_context(|| format!("Failed to start {program}"))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.with_context(|| format!("Failed to wait for {program}"))?;
            if !status.success() {
                match status.code() {
                    Some(code) => bail!("{program} exited with status {code}"),
                    None => bail!("{program} was terminated by a signal"),
                }
            }
            Ok(())
        }
        _ = cancel.cancelled() => {
            let _ = child.kill().await;
            Err(Cancelled.into())
        }
    }
}

/// Write `bytes` to `path`, creating parent directories.
fn write_local(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
