//! Blueprint commands.
//!
//! Responsibilities:
//! - Create blueprints and preview the Dockerfile a request would build.
//! - List, inspect, and delete blueprints; print build logs.
//!
//! Invariants:
//! - The Dockerfile comes from exactly one of `--dockerfile` and
//!   `--dockerfile-path`.
//! - `--root` and `--user` are exclusive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use clap::builder::PossibleValuesParser;
use runloop_client::{CreateBlueprintRequest, LaunchParameters, ListParams, UserParameters};
use runloop_tui::ResourceKind;
use tracing::info;

use super::devbox::{ARCHITECTURES, RESOURCE_SIZES, parse_user, user_parameters};
use super::{CommandContext, ListArgs, run_delete, run_get, run_list};
use crate::cancellation::{CancellationToken, cancellable};
use crate::formatters::{OutputFormat, format_value, output_result};

#[derive(Debug, Subcommand)]
pub enum BlueprintCommand {
    /// Create a blueprint and start its build
    Create(BlueprintArgs),

    /// Show the Dockerfile a create request would build
    Preview(BlueprintArgs),

    /// List blueprints
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only blueprints with this name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show one blueprint
    Get {
        #[arg(long)]
        id: String,
    },

    /// Print build logs
    Logs {
        #[arg(long)]
        id: String,
    },

    /// Delete a blueprint
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl BlueprintCommand {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { list, name: None } if list.is_default())
    }
}

#[derive(Debug, clap::Args)]
pub struct BlueprintArgs {
    /// Blueprint name
    #[arg(long)]
    pub name: String,

    /// Dockerfile contents
    #[arg(long, conflicts_with = "dockerfile_path")]
    pub dockerfile: Option<String>,

    /// File holding the Dockerfile
    #[arg(long)]
    pub dockerfile_path: Option<PathBuf>,

    /// Setup command run during the build (repeatable)
    #[arg(long)]
    pub system_setup_commands: Vec<String>,

    /// Resource size of devboxes booted from this blueprint
    #[arg(long, value_parser = PossibleValuesParser::new(RESOURCE_SIZES))]
    pub resources: Option<String>,

    /// CPU architecture
    #[arg(long, value_parser = PossibleValuesParser::new(ARCHITECTURES))]
    pub architecture: Option<String>,

    /// Port to expose (repeatable)
    #[arg(long)]
    pub available_ports: Vec<u16>,

    /// Run as root
    #[arg(long, conflicts_with = "user")]
    pub root: bool,

    /// Run as this user (name:uid)
    #[arg(long, value_name = "NAME:UID", value_parser = parse_user)]
    pub user: Option<UserParameters>,
}

impl BlueprintArgs {
    pub fn into_request(self) -> Result<CreateBlueprintRequest> {
        let dockerfile = match (self.dockerfile, self.dockerfile_path) {
            (Some(_), Some(_)) => {
                return Err(runloop_client::ClientError::validation(
                    "dockerfile",
                    "use either --dockerfile or --dockerfile-path, not both",
                )
                .into());
            }
            (Some(contents), None) => Some(contents),
            (None, Some(path)) => Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read Dockerfile {}", path.display()))?,
            ),
            (None, None) => None,
        };

        let request = CreateBlueprintRequest {
            name: self.name,
            dockerfile,
            system_setup_commands: self.system_setup_commands,
            launch_parameters: LaunchParameters {
                resource_size_request: self.resources,
                architecture: self.architecture,
                available_ports: (!self.available_ports.is_empty())
                    .then_some(self.available_ports),
                user_parameters: user_parameters(self.root, self.user)?,
                ..LaunchParameters::default()
            },
        };
        request.validate()?;
        Ok(request)
    }
}

pub async fn run(
    ctx: &CommandContext,
    command: BlueprintCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        BlueprintCommand::Create(args) => {
            let request = args.into_request()?;
            info!(name = %request.name, "Creating blueprint");
            let client = ctx.client()?;
            let blueprint = cancellable(cancel, client.create_blueprint(&request))
                .await
                .context("Failed to create blueprint")?;
            ctx.print_item(&blueprint)
        }
        BlueprintCommand::Preview(args) => {
            let request = args.into_request()?;
            let client = ctx.client()?;
            let preview = cancellable(cancel, client.preview_blueprint(&request))
                .await
                .context("Failed to preview blueprint")?;
            match ctx.format()? {
                OutputFormat::Text => output_result(preview.dockerfile.trim_end()),
                format => output_result(&format_value(&preview, format)?),
            }
            Ok(())
        }
        BlueprintCommand::List { list, name } => {
            let params = list.params().filter_opt("name", name);
            run_list(
                ctx,
                ResourceKind::Blueprints,
                &list,
                params,
                cancel,
                |client, params: ListParams| async move { client.list_blueprints(&params).await },
            )
            .await
        }
        BlueprintCommand::Get { id } => {
            let client = ctx.client()?;
            run_get(ctx, "blueprint", &id, cancel, client.get_blueprint(&id)).await
        }
        BlueprintCommand::Logs { id } => {
            let client = ctx.client()?;
            let logs = cancellable(cancel, client.get_blueprint_logs(&id))
                .await
                .with_context(|| format!("Failed to get build logs for blueprint {id}"))?;
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
        BlueprintCommand::Delete { id, force } => {
            let client = ctx.client()?;
            run_delete(ctx, "blueprint", &id, force, cancel, || {
                client.delete_blueprint(&id)
            })
            .await
        }
    }
}
