//! Blueprints. Search filters by name.

use std::sync::Arc;

use runloop_client::{Blueprint, RunloopClient};

use super::{DELETE, Navigation, ResourceSpec, VIEW, detail, opt, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, OperationSpec, ResourceNames};

const LOGS: OperationSpec = OperationSpec::navigational("logs", "Build logs", 'l');

fn name(b: &Blueprint) -> String {
    b.name.clone().unwrap_or_else(|| b.id.clone())
}

pub fn spec() -> ResourceSpec<Blueprint> {
    ResourceSpec {
        key: "blueprints",
        title: "Blueprints",
        names: ResourceNames {
            singular: "blueprint",
            plural: "blueprints",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |b: &Blueprint| b.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |b: &Blueprint| opt(&b.name),
            },
            Column {
                header: "Status",
                width: ColumnWidth::Fixed(16),
                cell: |b: &Blueprint| opt(&b.status),
            },
            Column {
                header: "Created",
                width: ColumnWidth::Fixed(20),
                cell: |b: &Blueprint| timestamp(b.create_time_ms),
            },
        ],
        item_id: |b: &Blueprint| b.id.as_str(),
        describe: name,
        searchable: true,
        fetch: |client, mut params| {
            Box::pin(async move {
                // The blueprint list filters on `name` rather than `search`.
                if let Some(query) = params.search.take() {
                    params = params.filter("name", query);
                }
                client.list_blueprints(&params).await
            })
        },
        operations: |_| vec![VIEW, LOGS, DELETE],
        execute: |client, operation, blueprint| Box::pin(execute(client, operation, blueprint)),
        navigate,
    }
}

async fn execute(
    client: Arc<RunloopClient>,
    operation: &'static str,
    blueprint: Blueprint,
) -> Result<String, runloop_client::ClientError> {
    match operation {
        "delete" => {
            client.delete_blueprint(&blueprint.id).await?;
            Ok(format!("Deleted blueprint {}", name(&blueprint)))
        }
        other => Err(unknown_operation(other)),
    }
}

fn navigate(client: Arc<RunloopClient>, operation: &'static str, blueprint: &Blueprint) -> Navigation {
    match operation {
        "view" => detail(format!("Blueprint {}", name(blueprint)), blueprint),
        "logs" => {
            let id = blueprint.id.clone();
            Navigation::Fetch {
                title: format!("Build logs: {}", name(blueprint)),
                load: Box::pin(async move {
                    let logs = client
                        .get_blueprint_logs(&id)
                        .await
                        .map_err(|e| e.to_string())?;
                    if logs.logs.is_empty() {
                        return Ok("No build logs.".to_string());
                    }
                    Ok(logs
                        .logs
                        .iter()
                        .map(|entry| entry.format_line())
                        .collect::<Vec<_>>()
                        .join("\n"))
                }),
            }
        }
        _ => Navigation::None,
    }
}
