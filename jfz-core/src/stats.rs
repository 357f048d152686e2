//! Statistics aggregation over JSON values

use serde::Serialize;
use serde_json::Value;

/// Aggregate counts derived from one JSON value
///
/// Computed once per conversion and immutable afterwards. Serializes with
/// camelCase field names for embedding in the generated metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of objects, including empty ones
    pub object_count: u64,
    /// Number of arrays, including empty ones
    pub array_count: u64,
    /// Number of scalar leaves (null, boolean, number, string)
    pub file_count: u64,
    /// Maximum nesting depth reached, root at depth 0
    pub max_depth: u64,
}

/// Walk a JSON value and aggregate statistics
///
/// Containers contribute to `object_count`/`array_count`, scalars to
/// `file_count`; `max_depth` is the maximum across all branches. The walk
/// uses an explicit worklist, so arbitrarily deep input cannot exhaust the
/// native call stack.
pub fn analyze(value: &Value) -> Statistics {
    let mut stats = Statistics::default();
    let mut pending: Vec<(&Value, u64)> = vec![(value, 0)];

    while let Some((current, depth)) = pending.pop() {
        stats.max_depth = stats.max_depth.max(depth);
        match current {
            Value::Object(map) => {
                stats.object_count += 1;
                for child in map.values() {
                    pending.push((child, depth + 1));
                }
            }
            Value::Array(items) => {
                stats.array_count += 1;
                for child in items {
                    pending.push((child, depth + 1));
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                stats.file_count += 1;
            }
        }
    }

    stats
}
