//! Benchmark run models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkRun {
    pub id: String,
    pub name: Option<String>,
    pub benchmark_id: Option<String>,
    /// `running`, `completed`, `canceled`, ...
    pub state: Option<String>,
    pub start_time_ms: Option<i64>,
    pub duration_ms: Option<u64>,
    pub score: Option<f64>,
}
