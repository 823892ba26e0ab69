//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Parse the `--output` format (text, json, yaml).
//! - Render single resources and pages of resources in each format.
//!
//! Does NOT handle:
//! - Terminal UI rendering (see `runloop-tui`).
//! - Deciding whether a list opens the interactive browser (see `commands`).
//!
//! Invariants:
//! - JSON and YAML output the full model so scripts see every field; lists
//!   serialize the whole page (`items`, `has_more`, `total_count`).
//! - Text tables pad columns with two spaces and print `N/A` for missing values.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty list | Rationale |
//! |--------|------------|-----------|
//! | JSON | `{"items": [], ...}` | Machine parseable |
//! | YAML | `items: []` | Machine parseable |
//! | Text | `No devboxes found.` | Human feedback |

use anyhow::Result;
use runloop_client::Page;
use serde::Serialize;

mod resources;
mod table;

pub use table::{DEFAULT_MISSING_VALUE, Tabular, missing, render_detail, render_table};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(runloop_client::ClientError::validation(
                "output",
                format!("invalid output format '{s}'. Valid options: text, json, yaml"),
            )
            .into()),
        }
    }
}

/// Render one resource.
pub fn format_item<T: Serialize + Tabular>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(item)?.trim_end().to_string()),
        OutputFormat::Text => Ok(render_detail(item)),
    }
}

/// Render a page of resources. `first_page` controls whether the text footer
/// can number rows from 1.
pub fn format_page<T: Serialize + Tabular>(
    page: &Page<T>,
    plural: &str,
    first_page: bool,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(page)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(page)?.trim_end().to_string()),
        OutputFormat::Text => Ok(render_table(page, plural, first_page)),
    }
}

/// Render an arbitrary serializable value (execution results, previews).
/// Text falls back to YAML, which reads well for nested values.
pub fn format_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml | OutputFormat::Text => {
            Ok(serde_yaml::to_string(value)?.trim_end().to_string())
        }
    }
}

/// Print rendered output to stdout.
pub fn output_result(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runloop_client::{Devbox, DevboxStatus};

    fn devbox(id: &str, name: Option<&str>) -> Devbox {
        Devbox {
            id: id.to_string(),
            name: name.map(str::to_string),
            status: DevboxStatus::Running,
            ..Devbox::default()
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("yml").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Text);
        let err = OutputFormat::from_str("xml").unwrap_err();
        assert!(err.to_string().contains("text, json, yaml"));
    }

    #[test]
    fn test_json_page_keeps_pagination_fields() {
        let page = Page::new(vec![devbox("dbx_1", Some("api"))], true, None);
        let out = format_page(&page, "devboxes", true, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["items"][0]["id"], "dbx_1");
        assert_eq!(value["has_more"], true);
        assert!(value["total_count"].is_null());
    }

    #[test]
    fn test_yaml_item() {
        let out = format_item(&devbox("dbx_1", None), OutputFormat::Yaml).unwrap();
        assert!(out.contains("id: dbx_1"));
        assert!(out.contains("status: running"));
    }

    #[test]
    fn test_empty_text_page_is_human_message() {
        let page: Page<Devbox> = Page::empty();
        let out = format_page(&page, "devboxes", true, OutputFormat::Text).unwrap();
        assert_eq!(out, "No devboxes found.");
    }
}
