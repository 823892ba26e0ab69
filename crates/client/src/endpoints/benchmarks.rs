//! Benchmark run endpoints.

use super::url_encoding::encode_path_segment;
use super::{RequestContext, get_json, get_page, post_json};
use crate::error::Result;
use crate::models::{BenchmarkRun, ListParams, Page};

const RUNS: &str = "/v1/benchmarks/runs";

/// List benchmark runs. Supports a `benchmark_id` filter.
pub async fn list_benchmark_runs(
    ctx: &RequestContext<'_>,
    params: &ListParams,
) -> Result<Page<BenchmarkRun>> {
    get_page(ctx, RUNS, "runs", params).await
}

pub async fn get_benchmark_run(ctx: &RequestContext<'_>, id: &str) -> Result<BenchmarkRun> {
    get_json(ctx, &format!("{RUNS}/{}", encode_path_segment(id)), &[]).await
}

pub async fn cancel_benchmark_run(ctx: &RequestContext<'_>, id: &str) -> Result<BenchmarkRun> {
    let path = format!("{RUNS}/{}/cancel", encode_path_segment(id));
    post_json::<(), _>(ctx, &path, None).await
}
