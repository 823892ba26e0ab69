//! Benchmark runs.

use runloop_client::BenchmarkRun;

use super::{Navigation, ResourceSpec, VIEW, detail, opt, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, OperationSpec, ResourceNames};

const CANCEL: OperationSpec = OperationSpec::destructive("cancel", "Cancel run", 'c');

fn name(run: &BenchmarkRun) -> String {
    run.name.clone().unwrap_or_else(|| run.id.clone())
}

pub fn spec() -> ResourceSpec<BenchmarkRun> {
    ResourceSpec {
        key: "benchmark-runs",
        title: "Benchmark Runs",
        names: ResourceNames {
            singular: "benchmark run",
            plural: "benchmark runs",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |r: &BenchmarkRun| r.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |r: &BenchmarkRun| opt(&r.name),
            },
            Column {
                header: "State",
                width: ColumnWidth::Fixed(12),
                cell: |r: &BenchmarkRun| opt(&r.state),
            },
            Column {
                header: "Score",
                width: ColumnWidth::Fixed(8),
                cell: |r: &BenchmarkRun| {
                    r.score.map(|s| format!("{s:.2}")).unwrap_or_else(|| "-".into())
                },
            },
            Column {
                header: "Started",
                width: ColumnWidth::Fixed(20),
                cell: |r: &BenchmarkRun| timestamp(r.start_time_ms),
            },
        ],
        item_id: |r: &BenchmarkRun| r.id.as_str(),
        describe: name,
        searchable: false,
        fetch: |client, params| Box::pin(async move { client.list_benchmark_runs(&params).await }),
        operations: |_| vec![VIEW, CANCEL],
        execute: |client, operation, run| {
            Box::pin(async move {
                match operation {
                    "cancel" => {
                        let updated = client.cancel_benchmark_run(&run.id).await?;
                        Ok(format!(
                            "Benchmark run {} is {}",
                            name(&run),
                            updated.state.as_deref().unwrap_or("canceled")
                        ))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, run| match operation {
            "view" => detail(format!("Benchmark run {}", name(run)), run),
            _ => Navigation::None,
        },
    }
}
