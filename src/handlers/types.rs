use serde_json::{Map, Value};
use std::path::Path;

/// Parsed file content: string keys mapped to arbitrary values
pub type Mapping = Map<String, Value>;

/// File suffix including the leading dot (`settings.toml` -> `.toml`)
///
/// Names that only start with a dot (`.env`) and names ending in a dot have
/// no suffix and yield an empty string.
pub fn suffix_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Final path component as UTF-8, empty when unavailable
pub fn file_name_of(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
}
