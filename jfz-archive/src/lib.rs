//! JFZ Archive - ZIP packaging and the high-level conversion API
//!
//! This crate composes the core primitives into the one-call conversion
//! operation:
//!
//! - [`convert`]: JSON value + options → ZIP archive bytes
//! - [`ArchiveWriter`]: deterministic tree-to-ZIP serialization
//! - README and metadata generation
//!
//! Each conversion is an independent pure computation over immutable input;
//! conversions may run on parallel threads with no coordination.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod metadata;
pub mod writer;

// Re-export commonly used types
pub use jfz_core::{
    analyze, sanitize, CancelFlag, Codec, ConvertError, Limits, NodeKind, Result, Statistics,
    TreeBuilder, TreeNode, DEFAULT_EXTENSION,
};
pub use metadata::{ArchiveMetadata, METADATA_ENTRY, README_ENTRY, SCHEMA_VERSION};
pub use writer::{ArchiveEntry, ArchiveWriter};

use serde_json::Value;

/// MIME type of the produced archive
pub const ZIP_MIME: &str = "application/zip";

/// `Content-Disposition` header value for delivering an archive as a download
pub fn content_disposition(name: &str) -> String {
    format!("attachment; filename=\"{}.zip\"", sanitize(name))
}

/// High-level conversion options
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Append the machine-readable `_metadata.json` entry
    pub include_metadata: bool,
    /// Append the human-readable `README.md` entry
    pub create_readme: bool,
    /// Suffix generated leaf file names with the conversion timestamp
    pub timestamp_files: bool,
    /// Extension for non-string scalar leaves
    pub default_extension: String,
    /// Compression codec for archive entries
    pub codec: Codec,
    /// Resource limits
    pub limits: Limits,
    /// Optional cooperative cancellation flag
    pub cancel: Option<CancelFlag>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_metadata: true,
            create_readme: true,
            timestamp_files: false,
            default_extension: DEFAULT_EXTENSION.to_string(),
            codec: Codec::default(),
            limits: Limits::default(),
            cancel: None,
        }
    }
}

/// Convert a JSON value into a ZIP archive of files and folders
///
/// Builds the tree rooted at `root_name`, serializes it depth-first in source
/// order, then appends the README and metadata entries at the archive's top
/// level when enabled. Their statistics are computed from the original
/// `value`, not from the tree. Tree construction is total over any JSON
/// value; the call fails only on limits, cancellation, or archive
/// serialization errors.
pub fn convert(value: &Value, root_name: &str, opts: &ConvertOptions) -> Result<Vec<u8>> {
    let generated_at = metadata::generated_at();
    let suffix = opts
        .timestamp_files
        .then(|| metadata::timestamp_suffix(&generated_at));

    let mut builder = TreeBuilder::new(&opts.limits).default_extension(&opts.default_extension);
    if let Some(suffix) = suffix.as_deref() {
        builder = builder.name_suffix(suffix);
    }
    if let Some(cancel) = opts.cancel.as_ref() {
        builder = builder.cancel_flag(cancel);
    }
    let tree = builder.build(value, root_name)?;

    let mut extra = Vec::new();
    if opts.create_readme || opts.include_metadata {
        let statistics = analyze(value);
        if opts.create_readme {
            extra.push(ArchiveEntry::new(
                README_ENTRY,
                metadata::readme(root_name, &statistics).into_bytes(),
            ));
        }
        if opts.include_metadata {
            extra.push(ArchiveEntry::new(
                METADATA_ENTRY,
                metadata::metadata_record(value, root_name, &statistics, &generated_at)?,
            ));
        }
    }

    ArchiveWriter::new(opts.codec).write(&tree, &extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert!(opts.include_metadata);
        assert!(opts.create_readme);
        assert!(!opts.timestamp_files);
        assert_eq!(opts.default_extension, ".json");
        assert_eq!(opts.codec, Codec::Deflated(6));
        assert!(opts.cancel.is_none());
    }

    #[test]
    fn test_delivery_contract_surface() {
        assert_eq!(ZIP_MIME, "application/zip");
        assert_eq!(
            content_disposition("report"),
            "attachment; filename=\"report.zip\""
        );
        assert_eq!(
            content_disposition("my data?"),
            "attachment; filename=\"my_data.zip\""
        );
    }
}
