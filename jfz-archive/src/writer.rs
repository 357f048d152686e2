//! ZIP serialization of folder trees

use std::io::{Cursor, Write};

use serde_json::Value;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use jfz_core::{Codec, ConvertError, Result, TreeNode};

/// One materialized archive entry: a `/`-joined path and its content bytes
///
/// Created once during the tree walk and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Sanitized path segments joined by `/`
    pub path: String,
    /// Raw content bytes
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    /// Create an entry from a path and content bytes
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Serializes a folder tree into an in-memory ZIP archive
///
/// Directories are implicit: every folder node is guaranteed non-empty by the
/// placeholder invariant, so readers reconstruct the hierarchy from entry
/// paths alone.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveWriter {
    codec: Codec,
}

impl ArchiveWriter {
    /// Create a writer using the given compression codec
    pub fn new(codec: Codec) -> Self {
        Self { codec }
    }

    /// Render a file node's content bytes
    ///
    /// Strings are written verbatim; every other value is pretty-printed JSON
    /// with two-space indentation. Empty-container placeholders carry their
    /// original empty value and therefore render as `{}` / `[]`.
    pub fn render_content(value: &Value) -> Result<Vec<u8>> {
        match value {
            Value::String(content) => Ok(content.clone().into_bytes()),
            other => Ok(serde_json::to_string_pretty(other)?.into_bytes()),
        }
    }

    /// Flatten a tree into archive entries, depth-first pre-order
    ///
    /// Children are visited in stored order, so entry order is deterministic
    /// and matches the source JSON. Sanitized sibling names are not
    /// de-duplicated; colliding paths produce multiple entries and readers
    /// see the last one written.
    pub fn collect_entries(root: &TreeNode) -> Result<Vec<ArchiveEntry>> {
        let mut entries = Vec::new();
        let mut pending: Vec<(&TreeNode, String)> = vec![(root, String::new())];

        while let Some((node, parent_path)) = pending.pop() {
            let path = if parent_path.is_empty() {
                node.name.clone()
            } else {
                format!("{parent_path}/{}", node.name)
            };
            if node.is_file() {
                let value = node.value.as_ref().ok_or_else(|| {
                    ConvertError::Internal("file node without a value".into())
                })?;
                entries.push(ArchiveEntry::new(path, Self::render_content(value)?));
            } else {
                // Reversed so the popped order matches stored child order.
                for child in node.children.iter().rev() {
                    pending.push((child, path.clone()));
                }
            }
        }

        Ok(entries)
    }

    /// Serialize the tree plus any extra top-level entries into ZIP bytes
    ///
    /// Fails on a deflate level outside 0-9 or if the underlying ZIP
    /// serialization fails; the failure is reported once and never retried.
    pub fn write(&self, root: &TreeNode, extra: &[ArchiveEntry]) -> Result<Vec<u8>> {
        if let Codec::Deflated(level) = self.codec {
            if level > 9 {
                return Err(ConvertError::Archive(format!(
                    "deflate level {level} out of range (0-9)"
                )));
            }
        }

        let entries = Self::collect_entries(root)?;
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = self.entry_options();

        for entry in entries.iter().chain(extra) {
            zip.start_file(entry.path.as_str(), options)
                .map_err(|e| ConvertError::Archive(e.to_string()))?;
            zip.write_all(&entry.content)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ConvertError::Archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    fn entry_options(&self) -> SimpleFileOptions {
        match self.codec {
            Codec::Stored => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            Codec::Deflated(level) => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(level))),
        }
    }
}
