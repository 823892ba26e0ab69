//! Secrets. Values are write-only, so the list shows names and timestamps.

use runloop_client::Secret;

use super::{DELETE, Navigation, ResourceSpec, VIEW, detail, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, ResourceNames};

pub fn spec() -> ResourceSpec<Secret> {
    ResourceSpec {
        key: "secrets",
        title: "Secrets",
        names: ResourceNames {
            singular: "secret",
            plural: "secrets",
        },
        columns: vec![
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |s: &Secret| s.name.clone(),
            },
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |s: &Secret| s.id.clone(),
            },
            Column {
                header: "Updated",
                width: ColumnWidth::Fixed(20),
                cell: |s: &Secret| timestamp(s.update_time_ms.or(s.create_time_ms)),
            },
        ],
        item_id: |s: &Secret| s.id.as_str(),
        describe: |s: &Secret| s.name.clone(),
        searchable: false,
        fetch: |client, params| Box::pin(async move { client.list_secrets(&params).await }),
        operations: |_| vec![VIEW, DELETE],
        execute: |client, operation, secret| {
            Box::pin(async move {
                match operation {
                    "delete" => {
                        client.delete_secret(&secret.name).await?;
                        Ok(format!("Deleted secret {}", secret.name))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, secret| match operation {
            "view" => detail(format!("Secret {}", secret.name), secret),
            _ => Navigation::None,
        },
    }
}
