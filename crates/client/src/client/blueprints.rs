//! Blueprint API methods for [`RunloopClient`].

use crate::client::RunloopClient;
use crate::endpoints::blueprints as ep;
use crate::error::Result;
use crate::models::{
    Blueprint, BlueprintBuildLogs, BlueprintPreview, CreateBlueprintRequest, ListParams, Page,
};

impl RunloopClient {
    pub async fn list_blueprints(&self, params: &ListParams) -> Result<Page<Blueprint>> {
        ep::list_blueprints(&self.ctx(), params).await
    }

    pub async fn get_blueprint(&self, id: &str) -> Result<Blueprint> {
        ep::get_blueprint(&self.ctx(), id).await
    }

    pub async fn create_blueprint(&self, request: &CreateBlueprintRequest) -> Result<Blueprint> {
        ep::create_blueprint(&self.ctx(), request).await
    }

    pub async fn preview_blueprint(
        &self,
        request: &CreateBlueprintRequest,
    ) -> Result<BlueprintPreview> {
        ep::preview_blueprint(&self.ctx(), request).await
    }

    pub async fn get_blueprint_logs(&self, id: &str) -> Result<BlueprintBuildLogs> {
        ep::get_build_logs(&self.ctx(), id).await
    }

    pub async fn delete_blueprint(&self, id: &str) -> Result<()> {
        ep::delete_blueprint(&self.ctx(), id).await
    }
}
