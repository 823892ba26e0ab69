//! Secret endpoints. Secrets are addressed by name.

use serde_json::json;

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_page, post_json};
use crate::error::{ClientError, Result};
use crate::models::{CreateSecretRequest, ListParams, Page, Secret};

const SECRETS: &str = "/v1/secrets";

pub async fn list_secrets(ctx: &RequestContext<'_>, params: &ListParams) -> Result<Page<Secret>> {
    get_page(ctx, SECRETS, "secrets", params).await
}

pub async fn create_secret(ctx: &RequestContext<'_>, request: &CreateSecretRequest) -> Result<Secret> {
    if request.name.trim().is_empty() {
        return Err(ClientError::validation("name", "must not be empty"));
    }
    post_json(ctx, SECRETS, Some(request)).await
}

pub async fn update_secret(ctx: &RequestContext<'_>, name: &str, value: &str) -> Result<Secret> {
    let path = format!("{SECRETS}/{}", encode_path_segment(name));
    post_json(ctx, &path, Some(&json!({ "value": value }))).await
}

pub async fn delete_secret(ctx: &RequestContext<'_>, name: &str) -> Result<()> {
    let path = format!("{SECRETS}/{}/delete", encode_path_segment(name));
    let _: serde_json::Value = post_json::<(), _>(ctx, &path, None).await?;
    Ok(())
}
