//! Benchmark run API methods for [`RunloopClient`].

use crate::client::RunloopClient;
use crate::endpoints::benchmarks as ep;
use crate::error::Result;
use crate::models::{BenchmarkRun, ListParams, Page};

impl RunloopClient {
    pub async fn list_benchmark_runs(&self, params: &ListParams) -> Result<Page<BenchmarkRun>> {
        ep::list_benchmark_runs(&self.ctx(), params).await
    }

    pub async fn get_benchmark_run(&self, id: &str) -> Result<BenchmarkRun> {
        ep::get_benchmark_run(&self.ctx(), id).await
    }

    pub async fn cancel_benchmark_run(&self, id: &str) -> Result<BenchmarkRun> {
        ep::cancel_benchmark_run(&self.ctx(), id).await
    }
}
