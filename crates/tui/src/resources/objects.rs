//! Storage objects.

use runloop_client::StorageObject;
use runloop_config::constants::DEFAULT_DOWNLOAD_URL_DURATION_SECS;

use super::{DELETE, Navigation, ResourceSpec, VIEW, detail, opt, timestamp, unknown_operation};
use crate::engine::{Column, ColumnWidth, OperationSpec, ResourceNames};

const DOWNLOAD_URL: OperationSpec =
    OperationSpec::immediate("download_url", "Download URL", 'u').read_only();

/// Human-readable byte count (`1.5 MB`).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn spec() -> ResourceSpec<StorageObject> {
    ResourceSpec {
        key: "objects",
        title: "Storage Objects",
        names: ResourceNames {
            singular: "object",
            plural: "objects",
        },
        columns: vec![
            Column {
                header: "ID",
                width: ColumnWidth::Min(26),
                cell: |o: &StorageObject| o.id.clone(),
            },
            Column {
                header: "Name",
                width: ColumnWidth::Fill,
                cell: |o: &StorageObject| o.name.clone(),
            },
            Column {
                header: "Type",
                width: ColumnWidth::Fixed(12),
                cell: |o: &StorageObject| o.content_type.to_string(),
            },
            Column {
                header: "State",
                width: ColumnWidth::Fixed(10),
                cell: |o: &StorageObject| opt(&o.state),
            },
            Column {
                header: "Size",
                width: ColumnWidth::Fixed(10),
                cell: |o: &StorageObject| o.size_bytes.map(format_size).unwrap_or_else(|| "-".into()),
            },
            Column {
                header: "Created",
                width: ColumnWidth::Fixed(20),
                cell: |o: &StorageObject| timestamp(o.create_time_ms),
            },
        ],
        item_id: |o: &StorageObject| o.id.as_str(),
        describe: |o: &StorageObject| o.name.clone(),
        searchable: true,
        fetch: |client, params| Box::pin(async move { client.list_objects(&params, false).await }),
        operations: |_| vec![VIEW, DOWNLOAD_URL, DELETE],
        execute: |client, operation, object| {
            Box::pin(async move {
                match operation {
                    "download_url" => {
                        let url = client
                            .get_object_download_url(&object.id, DEFAULT_DOWNLOAD_URL_DURATION_SECS)
                            .await?;
                        Ok(url.download_url)
                    }
                    "delete" => {
                        client.delete_object(&object.id).await?;
                        Ok(format!("Deleted object {}", object.name))
                    }
                    other => Err(unknown_operation(other)),
                }
            })
        },
        navigate: |_, operation, object| match operation {
            "view" => detail(format!("Object {}", object.name), object),
            _ => Navigation::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
