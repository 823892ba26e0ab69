//! Pagination types shared by every list endpoint.

use chrono::{Local, TimeZone};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// One page of a cursor-paginated collection.
///
/// `total_count` is advisory; `None` means the server did not report an
/// exact total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: bool, total_count: Option<u64>) -> Self {
        Self {
            items,
            has_more,
            total_count,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), false, Some(0))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
            total_count: self.total_count,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Parse a `{<key>: [...], has_more, total_count}` response body.
    pub fn from_response(mut value: serde_json::Value, key: &str) -> Result<Self> {
        let items = match value.get_mut(key).map(serde_json::Value::take) {
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(raw) => serde_json::from_value(raw).map_err(|e| {
                ClientError::InvalidResponse(format!("failed to parse '{key}': {e}"))
            })?,
        };
        let has_more = value
            .get("has_more")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let total_count = value.get("total_count").and_then(serde_json::Value::as_u64);

        Ok(Self::new(items, has_more, total_count))
    }
}

/// Query parameters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub starting_after: Option<String>,
    pub search: Option<String>,
    /// Resource specific filters (`status`, `name`, `devbox_id`, ...).
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn starting_after(mut self, cursor: Option<String>) -> Self {
        self.starting_after = cursor;
        self
    }

    /// Set the free-text search; blank queries are dropped.
    pub fn search(mut self, query: Option<String>) -> Self {
        self.search = query.filter(|q| !q.trim().is_empty());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Add a filter only when `value` is present.
    pub fn filter_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.filter(key, v),
            None => self,
        }
    }

    /// Render as query pairs in a stable order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.filters.len() + 3);
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(cursor) = &self.starting_after {
            query.push(("starting_after".to_string(), cursor.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query.extend(self.filters.iter().cloned());
        query
    }
}

/// Format an epoch-milliseconds timestamp in local time.
pub fn format_timestamp_ms(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_response_reads_plural_key() {
        let body = json!({
            "devboxes": [{"id": "a"}, {"id": "b"}],
            "has_more": true,
            "total_count": 35
        });
        let page: Page<serde_json::Value> = Page::from_response(body, "devboxes").unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.total_count, Some(35));
    }

    #[test]
    fn test_page_from_response_tolerates_missing_fields() {
        let page: Page<serde_json::Value> =
            Page::from_response(json!({"blueprints": null}), "blueprints").unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_page_from_response_reports_shape_errors() {
        let err = Page::<String>::from_response(json!({"secrets": "nope"}), "secrets").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(ref m) if m.contains("secrets")));
    }

    #[test]
    fn test_list_params_query_order_and_blank_search() {
        let params = ListParams::new()
            .limit(10)
            .starting_after(Some("dbx_10".to_string()))
            .search(Some("   ".to_string()))
            .filter("status", "running");

        assert_eq!(
            params.to_query(),
            vec![
                ("limit".to_string(), "10".to_string()),
                ("starting_after".to_string(), "dbx_10".to_string()),
                ("status".to_string(), "running".to_string()),
            ]
        );
    }
}
