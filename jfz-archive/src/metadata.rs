//! Generated README and metadata entries

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use jfz_core::{Result, Statistics};

/// Schema version stamped into every metadata record
pub const SCHEMA_VERSION: &str = "1.0";

/// Entry name of the machine-readable metadata record
pub const METADATA_ENTRY: &str = "_metadata.json";
/// Entry name of the human-readable summary
pub const README_ENTRY: &str = "README.md";

/// Machine-readable conversion record embedded as `_metadata.json`
///
/// Field names serialize in camelCase to match the original wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveMetadata<'a> {
    /// ISO-8601 generation timestamp
    pub generated_at: String,
    /// Root name the conversion was invoked with
    pub root_name: &'a str,
    /// Serialized length of the input value, in bytes
    pub original_size: usize,
    /// Statistics computed from the original value
    pub statistics: &'a Statistics,
    /// Metadata schema version
    pub schema_version: &'a str,
}

/// Current time as an ISO-8601 UTC string with millisecond precision
pub fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Suffix appended to timestamped file names
///
/// Derived from the ISO-8601 timestamp with `:` and `.` replaced by `-` so it
/// stays filesystem-safe. Computed once per conversion, so every file in the
/// same archive shares the same suffix.
pub fn timestamp_suffix(generated_at: &str) -> String {
    format!("_{}", generated_at.replace([':', '.'], "-"))
}

/// Render the metadata record for one conversion
///
/// Statistics and size are computed from the original value, independent of
/// any tree-building behavior.
pub fn metadata_record(
    value: &Value,
    root_name: &str,
    statistics: &Statistics,
    generated_at: &str,
) -> Result<Vec<u8>> {
    let metadata = ArchiveMetadata {
        generated_at: generated_at.to_string(),
        root_name,
        original_size: serde_json::to_string(value)?.len(),
        statistics,
        schema_version: SCHEMA_VERSION,
    };
    Ok(serde_json::to_vec_pretty(&metadata)?)
}

/// Render the human-readable README for one conversion
pub fn readme(root_name: &str, statistics: &Statistics) -> String {
    format!(
        "# {root_name}\n\n\
         Generated from a JSON document.\n\n\
         ## Contents\n\n\
         - Objects: {objects}\n\
         - Arrays: {arrays}\n\
         - Files: {files}\n\
         - Maximum depth: {depth}\n\n\
         ## Naming scheme\n\n\
         - Object keys become folder and file names, sanitized for filesystem safety.\n\
         - Array elements are named `item_NNN` by zero-padded index.\n\
         - Empty objects and arrays produce `empty_object.json` / `empty_array.json` placeholders.\n\
         - File extensions are inferred from content: `.json`, `.html`, `.css`, `.js`, `.md`, or `.txt`.\n",
        root_name = root_name,
        objects = statistics.object_count,
        arrays = statistics.array_count,
        files = statistics.file_count,
        depth = statistics.max_depth,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfz_core::analyze;
    use serde_json::json;

    #[test]
    fn test_metadata_record_fields() {
        let value = json!({"a": [1, 2]});
        let stats = analyze(&value);
        let bytes = metadata_record(&value, "root", &stats, "2026-08-29T12:00:00.000Z").unwrap();
        let record: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(record["generatedAt"], "2026-08-29T12:00:00.000Z");
        assert_eq!(record["rootName"], "root");
        assert_eq!(record["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(
            record["originalSize"],
            serde_json::to_string(&value).unwrap().len()
        );
        assert_eq!(record["statistics"]["objectCount"], 1);
        assert_eq!(record["statistics"]["arrayCount"], 1);
        assert_eq!(record["statistics"]["fileCount"], 2);
        assert_eq!(record["statistics"]["maxDepth"], 2);
    }

    #[test]
    fn test_timestamp_suffix_is_filesystem_safe() {
        let suffix = timestamp_suffix("2026-08-29T12:34:56.789Z");
        assert_eq!(suffix, "_2026-08-29T12-34-56-789Z");
        assert!(!suffix.contains(':'));
        assert!(!suffix.contains('.'));
    }

    #[test]
    fn test_readme_lists_statistics() {
        let value = json!({"a": 1});
        let text = readme("demo", &analyze(&value));
        assert!(text.starts_with("# demo\n"));
        assert!(text.contains("- Objects: 1"));
        assert!(text.contains("- Files: 1"));
        assert!(text.contains("item_NNN"));
    }
}
