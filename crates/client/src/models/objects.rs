//! Object storage models.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Content type accepted by the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectContentType {
    #[default]
    Unspecified,
    Text,
    Binary,
    Gzip,
    Tar,
    Tgz,
}

impl ObjectContentType {
    /// Guess from a file name's extension.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Self::Tgz
        } else if name.ends_with(".gz") {
            Self::Gzip
        } else if name.ends_with(".tar") {
            Self::Tar
        } else if [".txt", ".md", ".json", ".yaml", ".yml", ".csv", ".log"]
            .iter()
            .any(|ext| name.ends_with(ext))
        {
            Self::Text
        } else if name.contains('.') {
            Self::Binary
        } else {
            Self::Unspecified
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Gzip => "gzip",
            Self::Tar => "tar",
            Self::Tgz => "tgz",
        }
    }
}

impl fmt::Display for ObjectContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageObject {
    pub id: String,
    pub name: String,
    pub content_type: ObjectContentType,
    /// `uploading`, `read_only`, `deleted`, ...
    pub state: Option<String>,
    pub size_bytes: Option<u64>,
    pub create_time_ms: Option<i64>,
    pub is_public: bool,
    /// Present only on the create response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateObjectRequest {
    pub name: String,
    pub content_type: ObjectContentType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadUrl {
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_path() {
        assert_eq!(
            ObjectContentType::from_path(Path::new("build.tar.gz")),
            ObjectContentType::Tgz
        );
        assert_eq!(
            ObjectContentType::from_path(Path::new("dump.gz")),
            ObjectContentType::Gzip
        );
        assert_eq!(
            ObjectContentType::from_path(Path::new("notes.MD")),
            ObjectContentType::Text
        );
        assert_eq!(
            ObjectContentType::from_path(Path::new("model.bin")),
            ObjectContentType::Binary
        );
        assert_eq!(
            ObjectContentType::from_path(Path::new("Makefile")),
            ObjectContentType::Unspecified
        );
    }

    #[test]
    fn test_unknown_content_type_is_an_error() {
        let result: Result<StorageObject, _> =
            serde_json::from_str(r#"{"id":"obj_1","content_type":"zip"}"#);
        assert!(result.is_err());
    }
}
