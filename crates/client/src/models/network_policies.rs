//! Network policy models.

use serde::{Deserialize, Serialize};

/// Egress policy that can be attached to devboxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkPolicy {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub allow_all: bool,
    pub allowed_hostnames: Vec<String>,
    pub create_time_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateNetworkPolicyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub allow_all: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_hostnames: Vec<String>,
}
