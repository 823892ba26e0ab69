//! Blueprint endpoints.

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{
    Blueprint, BlueprintBuildLogs, BlueprintPreview, CreateBlueprintRequest, ListParams, Page,
};

const BLUEPRINTS: &str = "/v1/blueprints";

fn blueprint_path(id: &str, suffix: &str) -> String {
    format!("{BLUEPRINTS}/{}{suffix}", encode_path_segment(id))
}

/// List blueprints. Supports a `name` filter.
pub async fn list_blueprints(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<Blueprint>> {
    get_page(ctx, BLUEPRINTS, "blueprints", params).await
}

pub async fn get_blueprint(ctx: &RequestContext<'_>, id: &str) -> Result<Blueprint> {
    get_json(ctx, &blueprint_path(id, ""), &[]).await
}

/// Start a blueprint build.
pub async fn create_blueprint(
    ctx: &RequestContext<'_>,
    request: &CreateBlueprintRequest,
) -> Result<Blueprint> {
    request.validate()?;
    post_json(ctx, BLUEPRINTS, Some(request)).await
}

/// Render the Dockerfile a create request would build, without building it.
pub async fn preview_blueprint(
    ctx: &RequestContext<'_>,
    request: &CreateBlueprintRequest,
) -> Result<BlueprintPreview> {
    request.validate()?;
    post_json(ctx, &format!("{BLUEPRINTS}/preview"), Some(request)).await
}

pub async fn get_build_logs(ctx: &RequestContext<'_>, id: &str) -> Result<BlueprintBuildLogs> {
    get_json(ctx, &blueprint_path(id, "/logs"), &[]).await
}

pub async fn delete_blueprint(ctx: &RequestContext<'_>, id: &str) -> Result<()> {
    let _: serde_json::Value = post_json::<(), _>(ctx, &blueprint_path(id, "/delete"), None).await?;
    Ok(())
}
