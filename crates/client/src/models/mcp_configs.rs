//! MCP config models.

use serde::{Deserialize, Serialize};

/// Remote MCP server registration usable from devboxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    pub id: String,
    pub name: String,
    pub endpoint: Option<String>,
    pub allowed_tools: Vec<String>,
    pub description: Option<String>,
    pub create_time_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateMcpConfigRequest {
    pub name: String,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
