//! Disk snapshot endpoints.

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{DiskSnapshot, ListParams, Page, SnapshotStatus};

const SNAPSHOTS: &str = "/v1/devboxes/disk_snapshots";

/// List snapshots. Supports a `devbox_id` filter.
pub async fn list_snapshots(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<DiskSnapshot>> {
    get_page(ctx, SNAPSHOTS, "snapshots", params).await
}

pub async fn get_snapshot_status(ctx: &RequestContext<'_>, id: &str) -> Result<SnapshotStatus> {
    let path = format!("{SNAPSHOTS}/{}/status", encode_path_segment(id));
    get_json(ctx, &path, &[]).await
}

pub async fn delete_snapshot(ctx: &RequestContext<'_>, id: &str) -> Result<()> {
    let path = format!("{SNAPSHOTS}/{}/delete", encode_path_segment(id));
    let _: serde_json::Value = post_json::<(), _>(ctx, &path, None).await?;
    Ok(())
}
