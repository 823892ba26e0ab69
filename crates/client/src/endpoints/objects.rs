//! Object storage endpoints.
//!
//! Uploads are three steps: create the object (which returns a pre-signed
//! `upload_url`), PUT the bytes to that URL, then mark the object complete.
//! Downloads go through a short-lived pre-signed URL.
//!
//! Pre-signed URLs are absolute and must not carry the API bearer token.

use std::path::Path;

use reqwest::Method;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::{CreateObjectRequest, DownloadUrl, ListParams, Page, StorageObject};

const OBJECTS: &str = "/v1/objects";

fn object_path(id: &str, suffix: &str) -> String {
    format!("{OBJECTS}/{}{suffix}", encode_path_segment(id))
}

/// List objects owned by the account. Supports `name`, `content_type`,
/// `state` filters and `search`.
pub async fn list_objects(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<StorageObject>> {
    get_page(ctx, OBJECTS, "objects", params).await
}

/// List objects that have been made public.
pub async fn list_public_objects(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<StorageObject>> {
    get_page(ctx, &format!("{OBJECTS}/list_public"), "objects", params).await
}

pub async fn get_object(ctx: &RequestContext<'_>, id: &str) -> Result<StorageObject> {
    get_json(ctx, &object_path(id, ""), &[]).await
}

pub async fn create_object(
    ctx: &RequestContext<'_>,
    request: &CreateObjectRequest,
) -> Result<StorageObject> {
    if request.name.trim().is_empty() {
        return Err(ClientError::validation("name", "must not be empty"));
    }
    post_json(ctx, OBJECTS, Some(request)).await
}

/// PUT bytes to a pre-signed upload URL.
pub async fn put_upload(ctx: &RequestContext<'_>, upload_url: &str, bytes: Vec<u8>) -> Result<()> {
    let builder = ctx.http.request(Method::PUT, upload_url).body(bytes);
    send_request_with_retry(builder, ctx.max_retries, "objects/upload", "PUT", ctx.metrics).await?;
    Ok(())
}

pub async fn complete_object(ctx: &RequestContext<'_>, id: &str) -> Result<StorageObject> {
    post_json::<(), _>(ctx, &object_path(id, "/complete"), None).await
}

/// Create, upload, and complete in one call.
pub async fn upload_object(
    ctx: &RequestContext<'_>,
    request: &CreateObjectRequest,
    bytes: Vec<u8>,
) -> Result<StorageObject> {
    let created = create_object(ctx, request).await?;
    let upload_url = created.upload_url.as_deref().ok_or_else(|| {
        ClientError::InvalidResponse("create object response has no upload_url".to_string())
    })?;
    debug!(object_id = %created.id, size = bytes.len(), "Uploading object bytes");
    put_upload(ctx, upload_url, bytes).await?;
    complete_object(ctx, &created.id).await
}

/// Request a pre-signed download URL valid for `duration_secs`.
pub async fn get_download_url(
    ctx: &RequestContext<'_>,
    id: &str,
    duration_secs: u64,
) -> Result<DownloadUrl> {
    let query = vec![("duration_seconds".to_string(), duration_secs.to_string())];
    get_json(ctx, &object_path(id, "/download"), &query).await
}

/// Stream a pre-signed URL into `dest`, creating parent directories.
///
/// Returns the number of bytes written.
pub async fn download_to_path(ctx: &RequestContext<'_>, url: &str, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let builder = ctx.http.request(Method::GET, url);
    let mut response =
        send_request_with_retry(builder, ctx.max_retries, "objects/download", "GET", ctx.metrics)
            .await?;

    let mut file = tokio::fs::File::create(dest).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

pub async fn delete_object(ctx: &RequestContext<'_>, id: &str) -> Result<()> {
    let _: serde_json::Value = post_json::<(), _>(ctx, &object_path(id, "/delete"), None).await?;
    Ok(())
}
