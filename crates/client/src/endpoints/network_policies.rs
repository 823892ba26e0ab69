//! Network policy endpoints.

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{CreateNetworkPolicyRequest, ListParams, NetworkPolicy, Page};

const NETWORK_POLICIES: &str = "/v1/network_policies";

pub async fn list_network_policies(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<NetworkPolicy>> {
    get_page(ctx, NETWORK_POLICIES, "network_policies", params).await
}

pub async fn get_network_policy(ctx: &RequestContext<'_>, id: &str) -> Result<NetworkPolicy> {
    let path = format!("{NETWORK_POLICIES}/{}", encode_path_segment(id));
    get_json(ctx, &path, &[]).await
}

pub async fn create_network_policy(
    ctx: &RequestContext<'_>,
    request: &CreateNetworkPolicyRequest,
) -> Result<NetworkPolicy> {
    post_json(ctx, NETWORK_POLICIES, Some(request)).await
}

pub async fn delete_network_policy(ctx: &RequestContext<'_>, id: &str) -> Result<()> {
    let path = format!("{NETWORK_POLICIES}/{}/delete", encode_path_segment(id));
    let _: serde_json::Value = post_json::<(), _>(ctx, &path, None).await?;
    Ok(())
}
