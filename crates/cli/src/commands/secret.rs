//! Secret commands.
//!
//! Responsibilities:
//! - List secret names, create, update, and delete secrets.
//!
//! Invariants:
//! - Secret values are never printed or logged.
//! - A value comes from `--value`, `--value-stdin`, or a masked prompt, in
//!   that order of precedence.

use anyhow::{Context, Result};
use clap::Subcommand;
use runloop_client::{CreateSecretRequest, ListParams};
use runloop_tui::ResourceKind;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use super::{CommandContext, ListArgs, run_delete, run_list};
use crate::cancellation::{CancellationToken, cancellable};
use crate::interactive::{prompt_secret, read_secret_stdin};

#[derive(Debug, Subcommand)]
pub enum SecretCommand {
    /// List secrets (names only)
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Create a secret
    Create {
        /// Secret name (the environment variable it is exposed as)
        #[arg(long)]
        name: String,
        #[command(flatten)]
        value: ValueArgs,
    },

    /// Replace the value of a secret
    Update {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        value: ValueArgs,
    },

    /// Delete a secret
    Delete {
        #[arg(long)]
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl SecretCommand {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { list } if list.is_default())
    }
}

#[derive(Debug, clap::Args)]
pub struct ValueArgs {
    /// Secret value (visible in shell history; prefer --value-stdin)
    #[arg(long, conflicts_with = "value_stdin")]
    pub value: Option<String>,

    /// Read the value from stdin
    #[arg(long)]
    pub value_stdin: bool,
}

impl ValueArgs {
    fn resolve(self, name: &str) -> Result<SecretString> {
        let value = match (self.value, self.value_stdin) {
            (Some(value), _) => value,
            (None, true) => read_secret_stdin()?,
            (None, false) => prompt_secret(name)?,
        };
        if value.is_empty() {
            return Err(runloop_client::ClientError::validation("value", "must not be empty").into());
        }
        Ok(SecretString::from(value))
    }
}

pub async fn run(
    ctx: &CommandContext,
    command: SecretCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        SecretCommand::List { list } => {
            let params = list.params();
            run_list(
                ctx,
                ResourceKind::Secrets,
                &list,
                params,
                cancel,
                |client, params: ListParams| async move { client.list_secrets(&params).await },
            )
            .await
        }
        SecretCommand::Create { name, value } => {
            let value = value.resolve(&name)?;
            let request = CreateSecretRequest {
                name: name.clone(),
                value: value.expose_secret().to_string(),
            };
            info!(name = %name, "Creating secret");
            let client = ctx.client()?;
            let secret = cancellable(cancel, client.create_secret(&request))
                .await
                .with_context(|| format!("Failed to create secret {name}"))?;
            ctx.print_item(&secret)
        }
        SecretCommand::Update { name, value } => {
            let value = value.resolve(&name)?;
            info!(name = %name, "Updating secret");
            let client = ctx.client()?;
            let secret = cancellable(cancel, client.update_secret(&name, value.expose_secret()))
                .await
                .with_context(|| format!("Failed to update secret {name}"))?;
            ctx.print_item(&secret)
        }
        SecretCommand::Delete { name, force } => {
            let client = ctx.client()?;
            run_delete(ctx, "secret", &name, force, cancel, || {
                client.delete_secret(&name)
            })
            .await
        }
    }
}
