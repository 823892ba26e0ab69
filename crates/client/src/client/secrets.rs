//! Secret API methods for [`RunloopClient`].
//!
//! # Invariants
//! - Secret values are write-only; no method returns one.

use crate::client::RunloopClient;
use crate::endpoints::secrets as ep;
use crate::error::Result;
use crate::models::{CreateSecretRequest, ListParams, Page, Secret};

impl RunloopClient {
    pub async fn list_secrets(&self, params: &ListParams) -> Result<Page<Secret>> {
        ep::list_secrets(&self.ctx(), params).await
    }

    pub async fn create_secret(&self, request: &CreateSecretRequest) -> Result<Secret> {
        ep::create_secret(&self.ctx(), request).await
    }

    pub async fn update_secret(&self, name: &str, value: &str) -> Result<Secret> {
        ep::update_secret(&self.ctx(), name, value).await
    }

    pub async fn delete_secret(&self, name: &str) -> Result<()> {
        ep::delete_secret(&self.ctx(), name).await
    }
}
