//! Devboxes: status-dependent lifecycle operations, logs, and SSH.

use std::sync::Arc;

use runloop_client::{Devbox, DevboxStatus, RunloopClient};

use super::{Navigation, ResourceSpec, VIEW, detail, opt, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, OperationSpec, ResourceNames};

const LOGS: OperationSpec = OperationSpec::navigational("logs", "View logs", 'l');
const SSH: OperationSpec = OperationSpec::navigational("ssh", "SSH", 's');
const SUSPEND: OperationSpec = OperationSpec::immediate("suspend", "Suspend", 'p');
const RESUME: OperationSpec = OperationSpec::immediate("resume", "Resume", 'r');
const SNAPSHOT: OperationSpec =
    OperationSpec::immediate("snapshot", "Snapshot disk", 'S').read_only();
const SHUTDOWN: OperationSpec = OperationSpec::destructive("shutdown", "Shutdown", 'x');

fn operations(devbox: &Devbox) -> Vec<OperationSpec> {
    let mut ops = vec![VIEW, LOGS];
    match devbox.status {
        DevboxStatus::Running => ops.extend([SSH, SUSPEND, SNAPSHOT]),
        DevboxStatus::Suspended => ops.push(RESUME),
        _ => {}
    }
    if devbox.status != DevboxStatus::Shutdown {
        ops.push(SHUTDOWN);
    }
    ops
}

pub fn spec() -> ResourceSpec<Devbox> {
    ResourceSpec {
        key: "devboxes",
        title: "Devboxes",
        names: ResourceNames {
            singular: "devbox",
            plural: "devboxes",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |d: &Devbox| d.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |d: &Devbox| opt(&d.name),
            },
            Column {
                header: "Status",
                width: ColumnWidth::Fixed(14),
                cell: |d: &Devbox| d.status.to_string(),
            },
            Column {
                header: "Created",
                width: ColumnWidth::Fixed(20),
                cell: |d: &Devbox| timestamp(d.create_time_ms),
            },
        ],
        item_id: |d: &Devbox| d.id.as_str(),
        describe: |d: &Devbox| d.display_name().to_string(),
        searchable: true,
        fetch: |client, params| Box::pin(async move { client.list_devboxes(&params).await }),
        operations,
        execute: |client, operation, devbox| Box::pin(execute(client, operation, devbox)),
        navigate,
    }
}

async fn execute(
    client: Arc<RunloopClient>,
    operation: &'static str,
    devbox: Devbox,
) -> Result<String, runloop_client::ClientError> {
    let name = devbox.display_name().to_string();
    match operation {
        "suspend" => {
            let updated = client.suspend_devbox(&devbox.id).await?;
            Ok(format!("Devbox {name} is {}", updated.status))
        }
        "resume" => {
            let updated = client.resume_devbox(&devbox.id).await?;
            Ok(format!("Devbox {name} is {}", updated.status))
        }
        "shutdown" => {
            client.shutdown_devbox(&devbox.id).await?;
            Ok(format!("Devbox {name} shut down"))
        }
        "snapshot" => {
            let snapshot = client.snapshot_disk_async(&devbox.id, None).await?;
            Ok(format!("Snapshot {} started for {name}", snapshot.id))
        }
        other => Err(unknown_operation(other)),
    }
}

fn navigate(client: Arc<RunloopClient>, operation: &'static str, devbox: &Devbox) -> Navigation {
    match operation {
        "view" => detail(format!("Devbox {}", devbox.display_name()), devbox),
        "logs" => {
            let id = devbox.id.clone();
            Navigation::Fetch {
                title: format!("Logs: {}", devbox.display_name()),
                load: Box::pin(async move {
                    let logs = client
                        .get_devbox_logs(&id, None)
                        .await
                        .map_err(|e| e.to_string())?;
                    if logs.logs.is_empty() {
                        return Ok("No logs yet.".to_string());
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
        "ssh" => Navigation::Ssh {
            devbox_id: devbox.id.clone(),
        },
        _ => Navigation::None,
    }
}
