//! Gateway config endpoints.

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{CreateGatewayConfigRequest, GatewayConfig, ListParams, Page};

const GATEWAY_CONFIGS: &str = "/v1/gateway_configs";

pub async fn list_gateway_configs(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<GatewayConfig>> {
    get_page(ctx, GATEWAY_CONFIGS, "gateway_configs", params).await
}

pub async fn get_gateway_config(ctx: &RequestContext<'_>, id: &str) -> Result<GatewayConfig> {
    let path = format!("{GATEWAY_CONFIGS}/{}", encode_path_segment(id));
    get_json(ctx, &path, &[]).await
}

pub async fn create_gateway_config(
    ctx: &RequestContext<'_>,
    request: &CreateGatewayConfigRequest,
) -> Result<GatewayConfig> {
    post_json(ctx, GATEWAY_CONFIGS, Some(request)).await
}

pub async fn delete_gateway_config(ctx: &RequestContext<'_>, id: &str) -> Result<()> {
    let path = format!("{GATEWAY_CONFIGS}/{}/delete", encode_path_segment(id));
    let _: serde_json::Value = post_json::<(), _>(ctx, &path, None).await?;
    Ok(())
}
