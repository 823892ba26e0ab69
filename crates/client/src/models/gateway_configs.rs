//! Gateway config models.

use serde::{Deserialize, Serialize};

/// Credential-injecting gateway in front of an upstream HTTP API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub id: String,
    pub name: String,
    pub endpoint: Option<String>,
    pub description: Option<String>,
    pub create_time_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateGatewayConfigRequest {
    pub name: String,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
