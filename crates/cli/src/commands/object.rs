//! Object storage commands.
//!
//! Responsibilities:
//! - List objects (account or public), inspect, upload, download, delete.
//!
//! Invariants:
//! - Upload guesses the content type from the file name unless
//!   `--content-type` is given.
//! - Download goes through a short-lived presigned URL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use runloop_client::{CreateObjectRequest, ListParams, ObjectContentType};
use runloop_config::constants::DEFAULT_DOWNLOAD_URL_DURATION_SECS;
use runloop_tui::ResourceKind;
use tracing::info;

use super::devbox::parse_key_value;
use super::{CommandContext, ListArgs, run_delete, run_get, run_list};
use crate::cancellation::{CancellationToken, cancellable};
use crate::progress::Spinner;

/// `--content-type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentTypeArg {
    Unspecified,
    Text,
    Binary,
    Gzip,
    Tar,
    Tgz,
}

impl From<ContentTypeArg> for ObjectContentType {
    fn from(value: ContentTypeArg) -> Self {
        match value {
            ContentTypeArg::Unspecified => Self::Unspecified,
            ContentTypeArg::Text => Self::Text,
            ContentTypeArg::Binary => Self::Binary,
            ContentTypeArg::Gzip => Self::Gzip,
            ContentTypeArg::Tar => Self::Tar,
            ContentTypeArg::Tgz => Self::Tgz,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ObjectCommand {
    /// List storage objects
    List {
        #[command(flatten)]
        list: ListArgs,
        /// List public objects instead of the account's own
        #[arg(long)]
        public: bool,
        /// Only objects with this name
        #[arg(long)]
        name: Option<String>,
        /// Only objects of this content type
        #[arg(long, value_enum)]
        content_type: Option<ContentTypeArg>,
        /// Only objects in this state
        #[arg(long)]
        state: Option<String>,
    },

    /// Show one object
    Get {
        #[arg(long)]
        id: String,
    },

    /// Upload a local file
    Upload {
        /// Local file to upload
        #[arg(long)]
        path: PathBuf,
        /// Object name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
        /// Content type (guessed from the file name when omitted)
        #[arg(long, value_enum)]
        content_type: Option<ContentTypeArg>,
        /// Metadata entry as KEY=VALUE (repeatable)
        #[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_value)]
        metadata: Vec<(String, String)>,
    },

    /// Download an object to a local file
    Download {
        #[arg(long)]
        id: String,
        /// Local destination
        #[arg(long)]
        path: PathBuf,
        /// Lifetime of the presigned download URL
        #[arg(long, default_value_t = DEFAULT_DOWNLOAD_URL_DURATION_SECS)]
        duration_seconds: u64,
    },

    /// Delete an object
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl ObjectCommand {
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::List {
                list,
                public: false,
                name: None,
                content_type: None,
                state: None,
            } if list.is_default()
        )
    }
}

pub async fn run(
    ctx: &CommandContext,
    command: ObjectCommand,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        ObjectCommand::List {
            list,
            public,
            name,
            content_type,
            state,
        } => {
            let params = list
                .params()
                .filter_opt("name", name)
                .filter_opt(
                    "content_type",
                    content_type.map(|c| ObjectContentType::from(c).as_str()),
                )
                .filter_opt("state", state);
            run_list(
                ctx,
                ResourceKind::Objects,
                &list,
                params,
                cancel,
                move |client, params: ListParams| async move {
                    client.list_objects(&params, public).await
                },
            )
            .await
        }
        ObjectCommand::Get { id } => {
            let client = ctx.client()?;
            run_get(ctx, "object", &id, cancel, client.get_object(&id)).await
        }
        ObjectCommand::Upload {
            path,
            name,
            content_type,
            metadata,
        } => {
            let request = upload_request(&path, name, content_type, metadata)?;
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            info!(name = %request.name, size = bytes.len(), "Uploading object");

            let client = ctx.client()?;
            let spinner = Spinner::new(!ctx.quiet, format!("Uploading {}", path.display()));
            let object = cancellable(cancel, client.upload_object(&request, bytes))
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            spinner.finish(format!("Uploaded {}", object.name));
            ctx.print_item(&object)
        }
        ObjectCommand::Download {
            id,
            path,
            duration_seconds,
        } => {
            let client = ctx.client()?;
            let spinner = Spinner::new(!ctx.quiet, format!("Downloading object {id}"));
            let written = cancellable(cancel, client.download_object(&id, &path, duration_seconds))
                .await
                .with_context(|| format!("Failed to download object {id}"))?;
            drop(spinner);
            ctx.notice(format!(
                "Downloaded object {id} to {} ({written} bytes)",
                path.display()
            ))
        }
        ObjectCommand::Delete { id, force } => {
            let client = ctx.client()?;
            run_delete(ctx, "object", &id, force, cancel, || client.delete_object(&id)).await
        }
    }
}

fn upload_request(
    path: &std::path::Path,
    name: Option<String>,
    content_type: Option<ContentTypeArg>,
    metadata: Vec<(String, String)>,
) -> Result<CreateObjectRequest> {
    let name = match name {
        Some(name) => name,
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                runloop_client::ClientError::validation("name", "pass --name for this path")
            })?,
    };
    Ok(CreateObjectRequest {
        name,
        content_type: content_type
            .map(ObjectContentType::from)
            .unwrap_or_else(|| ObjectContentType::from_path(path)),
        metadata: metadata.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_upload_request_guesses_type_and_name() {
        let request = upload_request(Path::new("/tmp/build.tar.gz"), None, None, vec![]).unwrap();
        assert_eq!(request.name, "build.tar.gz");
        assert_eq!(request.content_type, ObjectContentType::Tgz);
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let request = upload_request(
            Path::new("notes.txt"),
            Some("raw".into()),
            Some(ContentTypeArg::Binary),
            vec![("team".into(), "infra".into())],
        )
        .unwrap();
        assert_eq!(request.name, "raw");
        assert_eq!(request.content_type, ObjectContentType::Binary);
        assert_eq!(request.metadata["team"], "infra");
    }

    #[test]
    fn test_path_without_file_name_needs_name() {
        assert!(upload_request(Path::new("/"), None, None, vec![]).is_err());
    }
}
