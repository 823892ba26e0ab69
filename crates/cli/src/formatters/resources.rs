//! Text columns for each Runloop resource.

use runloop_client::models::format_timestamp_ms;
use runloop_client::{
    BenchmarkRun, Blueprint, Devbox, DiskSnapshot, GatewayConfig, McpConfig, NetworkPolicy,
    Secret, StorageObject,
};

use super::table::{Tabular, missing};

fn time(ms: Option<i64>) -> String {
    missing(ms.map(format_timestamp_ms))
}

impl Tabular for Devbox {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Status", "Created", "Blueprint"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            missing(self.name.as_deref()),
            self.status.to_string(),
            time(self.create_time_ms),
            missing(self.blueprint_id.as_deref()),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for Blueprint {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Status", "Created"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            missing(self.name.as_deref()),
            missing(self.status.as_deref()),
            time(self.create_time_ms),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for DiskSnapshot {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Source Devbox", "Created"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            missing(self.name.as_deref()),
            missing(self.source_devbox_id.as_deref()),
            time(self.create_time_ms),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for Secret {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Created", "Updated"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            time(self.create_time_ms),
            time(self.update_time_ms),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for NetworkPolicy {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Egress", "Description"];

    fn row(&self) -> Vec<String> {
        let egress = if self.allow_all {
            "allow all".to_string()
        } else if self.allowed_hostnames.is_empty() {
            "deny all".to_string()
        } else {
            self.allowed_hostnames.join(",")
        };
        vec![
            self.id.clone(),
            self.name.clone(),
            egress,
            missing(self.description.as_deref()),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for GatewayConfig {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Endpoint", "Description"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            missing(self.endpoint.as_deref()),
            missing(self.description.as_deref()),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for McpConfig {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Endpoint", "Allowed Tools"];

    fn row(&self) -> Vec<String> {
        let tools = if self.allowed_tools.is_empty() {
            None
        } else {
            Some(self.allowed_tools.join(","))
        };
        vec![
            self.id.clone(),
            self.name.clone(),
            missing(self.endpoint.as_deref()),
            missing(tools),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for StorageObject {
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "Type", "State", "Size", "Public", "Created"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.content_type.to_string(),
            missing(self.state.as_deref()),
            missing(self.size_bytes),
            if self.is_public { "yes" } else { "no" }.to_string(),
            time(self.create_time_ms),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}

impl Tabular for BenchmarkRun {
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "Benchmark", "State", "Started", "Score"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            missing(self.name.as_deref()),
            missing(self.benchmark_id.as_deref()),
            missing(self.state.as_deref()),
            time(self.start_time_ms),
            missing(self.score.map(|s| format!("{s:.2}"))),
        ]
    }

    fn cursor(&self) -> &str {
        &self.id
    }
}
