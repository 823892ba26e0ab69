//! Secret models. The API never returns secret values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Secret {
    pub id: String,
    pub name: String,
    pub create_time_ms: Option<i64>,
    pub update_time_ms: Option<i64>,
}

/// Body for creating or updating a secret.
#[derive(Clone, Serialize)]
pub struct CreateSecretRequest {
    pub name: String,
    pub value: String,
}

impl std::fmt::Debug for CreateSecretRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateSecretRequest")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_debug_hides_value() {
        let request = CreateSecretRequest {
            name: "GITHUB_TOKEN".into(),
            value: "ghp_secret".into(),
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("GITHUB_TOKEN"));
        assert!(!debug.contains("ghp_secret"));
    }
}
