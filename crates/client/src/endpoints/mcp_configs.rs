//! MCP config endpoints.

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{CreateMcpConfigRequest, ListParams, McpConfig, Page};

const MCP_CONFIGS: &str = "/v1/mcp_configs";

pub async fn list_mcp_configs(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<McpConfig>> {
    get_page(ctx, MCP_CONFIGS, "mcp_configs", params).await
}

pub async fn get_mcp_config(ctx: &RequestContext<'_>, id: &str) -> Result<McpConfig> {
    let path = format!("{MCP_CONFIGS}/{}", encode_path_segment(id));
    get_json(ctx, &path, &[]).await
}

pub async fn create_mcp_config(
    ctx: &RequestContext<'_>,
    request: &CreateMcpConfigRequest,
) -> Result<McpConfig> {
    post_json(ctx, MCP_CONFIGS, Some(request)).await
}

pub async fn delete_mcp_config(ctx: &RequestContext<'_>, id: &str) -> Result<()> {
    let path = format!("{MCP_CONFIGS}/{}/delete", encode_path_segment(id));
    let _: serde_json::Value = post_json::<(), _>(ctx, &path, None).await?;
    Ok(())
}
