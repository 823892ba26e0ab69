//! Network policy, gateway config, and MCP config methods for [`RunloopClient`].

use crate::client::RunloopClient;
use crate::endpoints::{gateway_configs, mcp_configs, network_policies};
use crate::error::Result;
use crate::models::{
    CreateGatewayConfigRequest, CreateMcpConfigRequest, CreateNetworkPolicyRequest,
    GatewayConfig, ListParams, McpConfig, NetworkPolicy, Page,
};

impl RunloopClient {
    pub async fn list_network_policies(&self, params: &ListParams) -> Result<Page<NetworkPolicy>> {
        network_policies::list_network_policies(&self.ctx(), params).await
    }

    pub async fn get_network_policy(&self, id: &str) -> Result<NetworkPolicy> {
        network_policies::get_network_policy(&self.ctx(), id).await
    }

    pub async fn create_network_policy(
        &self,
        request: &CreateNetworkPolicyRequest,
    ) -> Result<NetworkPolicy> {
        network_policies::create_network_policy(&self.ctx(), request).await
    }

    pub async fn delete_network_policy(&self, id: &str) -> Result<()> {
        network_policies::delete_network_policy(&self.ctx(), id).await
    }

    pub async fn list_gateway_configs(&self, params: &ListParams) -> Result<Page<GatewayConfig>> {
        gateway_configs::list_gateway_configs(&self.ctx(), params).await
    }

    pub async fn get_gateway_config(&self, id: &str) -> Result<GatewayConfig> {
        gateway_configs::get_gateway_config(&self.ctx(), id).await
    }

    pub async fn create_gateway_config(
        &self,
        request: &CreateGatewayConfigRequest,
    ) -> Result<GatewayConfig> {
        gateway_configs::create_gateway_config(&self.ctx(), request).await
    }

    pub async fn delete_gateway_config(&self, id: &str) -> Result<()> {
        gateway_configs::delete_gateway_config(&self.ctx(), id).await
    }

    pub async fn list_mcp_configs(&self, params: &ListParams) -> Result<Page<McpConfig>> {
        mcp_configs::list_mcp_configs(&self.ctx(), params).await
    }

    pub async fn get_mcp_config(&self, id: &str) -> Result<McpConfig> {
        mcp_configs::get_mcp_config(&self.ctx(), id).await
    }

    pub async fn create_mcp_config(&self, request: &CreateMcpConfigRequest) -> Result<McpConfig> {
        mcp_configs::create_mcp_config(&self.ctx(), request).await
    }

    pub async fn delete_mcp_config(&self, id: &str) -> Result<()> {
        mcp_configs::delete_mcp_config(&self.ctx(), id).await
    }
}
