//! Disk snapshots.

use runloop_client::DiskSnapshot;

use super::{DELETE, Navigation, ResourceSpec, VIEW, detail, opt, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, ResourceNames};

fn name(s: &DiskSnapshot) -> String {
    s.name.clone().unwrap_or_else(|| s.id.clone())
}

pub fn spec() -> ResourceSpec<DiskSnapshot> {
    ResourceSpec {
        key: "snapshots",
        title: "Snapshots",
        names: ResourceNames {
            singular: "snapshot",
            plural: "snapshots",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |s: &DiskSnapshot| s.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |s: &DiskSnapshot| opt(&s.name),
            },
            Column {
                header: "Source Devbox",
                width: ColumnWidth::Min(26),
                cell: |s: &DiskSnapshot| opt(&s.source_devbox_id),
            },
            Column {
                header: "Created",
                width: ColumnWidth::Fixed(20),
                cell: |s: &DiskSnapshot| timestamp(s.create_time_ms),
            },
        ],
        item_id: |s: &DiskSnapshot| s.id.as_str(),
        describe: name,
        searchable: false,
        fetch: |client, params| Box::pin(async move { client.list_snapshots(&params).await }),
        operations: |_| vec![VIEW, DELETE],
        execute: |client, operation, snapshot| {
            Box::pin(async move {
                match operation {
                    "delete" => {
                        client.delete_snapshot(&snapshot.id).await?;
                        Ok(format!("Deleted snapshot {}", name(&snapshot)))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, snapshot| match operation {
            "view" => detail(format!("Snapshot {}", name(snapshot)), snapshot),
            _ => Navigation::None,
        },
    }
}
