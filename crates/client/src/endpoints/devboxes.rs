//! Devbox endpoints: lifecycle, command execution, logs, SSH keys, and file
//! transfer.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{
    CreateDevboxRequest, Devbox, DevboxLogs, DiskSnapshot, Execution, ExecutionRequest,
    ListParams, Page, SshKey,
};

const DEVBOXES: &str = "/v1/devboxes";

fn devbox_path(id: &str, suffix: &str) -> String {
    format!("{DEVBOXES}/{}{suffix}", encode_path_segment(id))
}

/// List devboxes, newest first. Supports a `status` filter and `search`.
pub async fn list_devboxes(ctx: &RequestContext<'_>, params: &ListParams) -> Result<Page<Devbox>> {
    get_page(ctx, DEVBOXES, "devboxes", params).await
}

pub async fn get_devbox(ctx: &RequestContext<'_>, id: &str) -> Result<Devbox> {
    get_json(ctx, &devbox_path(id, ""), &[]).await
}

pub async fn create_devbox(ctx: &RequestContext<'_>, request: &CreateDevboxRequest) -> Result<Devbox> {
    request.validate()?;
    post_json(ctx, DEVBOXES, Some(request)).await
}

/// Run a command and wait for it to finish.
pub async fn execute_sync(
    ctx: &RequestContext<'_>,
    id: &str,
    request: &ExecutionRequest,
) -> Result<Execution> {
    post_json(ctx, &devbox_path(id, "/execute_sync"), Some(request)).await
}

/// Start a command and return immediately with its execution id.
pub async fn execute_async(
    ctx: &RequestContext<'_>,
    id: &str,
    request: &ExecutionRequest,
) -> Result<Execution> {
    post_json(ctx, &devbox_path(id, "/execute_async"), Some(request)).await
}

pub async fn get_execution(
    ctx: &RequestContext<'_>,
    id: &str,
    execution_id: &str,
) -> Result<Execution> {
    let suffix = format!("/executions/{}", encode_path_segment(execution_id));
    get_json(ctx, &devbox_path(id, &suffix), &[]).await
}

/// Fetch devbox logs, optionally narrowed to one execution.
pub async fn get_logs(
    ctx: &RequestContext<'_>,
    id: &str,
    execution_id: Option<&str>,
) -> Result<DevboxLogs> {
    let query: Vec<(String, String)> = execution_id
        .map(|e| vec![("execution_id".to_string(), e.to_string())])
        .unwrap_or_default();
    get_json(ctx, &devbox_path(id, "/logs"), &query).await
}

pub async fn suspend_devbox(ctx: &RequestContext<'_>, id: &str) -> Result<Devbox> {
    post_json::<(), _>(ctx, &devbox_path(id, "/suspend"), None).await
}

pub async fn resume_devbox(ctx: &RequestContext<'_>, id: &str) -> Result<Devbox> {
    post_json::<(), _>(ctx, &devbox_path(id, "/resume"), None).await
}

pub async fn shutdown_devbox(ctx: &RequestContext<'_>, id: &str) -> Result<Devbox> {
    post_json::<(), _>(ctx, &devbox_path(id, "/shutdown"), None).await
}

/// Mint an SSH key pair for the devbox. The private key is returned once.
pub async fn create_ssh_key(ctx: &RequestContext<'_>, id: &str) -> Result<SshKey> {
    post_json::<(), _>(ctx, &devbox_path(id, "/create_ssh_key"), None).await
}

/// Read a UTF-8 file from the devbox.
pub async fn read_file_contents(ctx: &RequestContext<'_>, id: &str, file_path: &str) -> Result<String> {
    let path = devbox_path(id, "/read_file_contents");
    let builder = ctx
        .request(Method::POST, &path)
        .json(&json!({ "file_path": file_path }));
    let response = ctx.send(builder, &Method::POST, &path).await?;
    Ok(response.text().await?)
}

/// Write a UTF-8 file on the devbox, replacing any existing content.
pub async fn write_file_contents(
    ctx: &RequestContext<'_>,
    id: &str,
    file_path: &str,
    contents: &str,
) -> Result<()> {
    let body = json!({ "file_path": file_path, "contents": contents });
    let _: serde_json::Value =
        post_json(ctx, &devbox_path(id, "/write_file_contents"), Some(&body)).await?;
    Ok(())
}

/// Upload raw bytes to `remote_path` as a multipart form.
pub async fn upload_file(
    ctx: &RequestContext<'_>,
    id: &str,
    remote_path: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<()> {
    let path = devbox_path(id, "/upload_file");
    let form = Form::new()
        .text("path", remote_path.to_string())
        .part("file", Part::bytes(bytes).file_name(file_name.to_string()));
    let builder = ctx.request(Method::POST, &path).multipart(form);
    ctx.send(builder, &Method::POST, &path).await?;
    Ok(())
}

/// Download a file from the devbox as raw bytes.
pub async fn download_file(ctx: &RequestContext<'_>, id: &str, remote_path: &str) -> Result<Vec<u8>> {
    let path = devbox_path(id, "/download_file");
    let builder = ctx
        .request(Method::POST, &path)
        .json(&json!({ "path": remote_path }));
    let response = ctx.send(builder, &Method::POST, &path).await?;
    Ok(response.bytes().await?.to_vec())
}

/// Start an asynchronous disk snapshot. Poll with
/// [`super::snapshots::get_snapshot_status`].
pub async fn snapshot_disk_async(
    ctx: &RequestContext<'_>,
    id: &str,
    name: Option<&str>,
) -> Result<DiskSnapshot> {
    let body = match name {
        Some(name) => json!({ "name": name }),
        None => json!({}),
    };
    post_json(ctx, &devbox_path(id, "/snapshot_disk_async"), Some(&body)).await
}
