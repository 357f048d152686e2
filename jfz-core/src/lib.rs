//! JFZ Core - Primitives for converting JSON values into folder trees
//!
//! This crate provides the pure transformation layer of JFZ with no I/O
//! dependencies. It includes:
//!
//! - Filesystem-safe name sanitization
//! - Content-based file extension classification
//! - Recursive decomposition of JSON values into typed trees
//! - Statistics aggregation over JSON values
//! - Error types
//! - Resource limits
//! - Cooperative cancellation
//!
//! Everything here is deterministic and free of shared mutable state, so
//! independent conversions may run on parallel threads without coordination.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cancel;
pub mod classify;
pub mod error;
pub mod limits;
pub mod sanitize;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use cancel::CancelFlag;
pub use classify::classify;
pub use error::{ConvertError, Result};
pub use limits::Limits;
pub use sanitize::sanitize;
pub use stats::{analyze, Statistics};
pub use tree::{NodeKind, TreeBuilder, TreeNode};

/// Extension used for non-string scalars unless the caller configures another.
pub const DEFAULT_EXTENSION: &str = ".json";

/// Compression codec options for the output archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// No compression, entries are stored verbatim
    Stored,
    /// Deflate compression with specified level (0-9)
    Deflated(u32),
}

impl Codec {
    /// Get the compression level for this codec
    pub fn level(&self) -> u32 {
        match self {
            Codec::Stored => 0,
            Codec::Deflated(level) => *level,
        }
    }

    /// Check whether entries written with this codec are compressed
    pub fn is_compressed(&self) -> bool {
        matches!(self, Codec::Deflated(_))
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Deflated(6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_level() {
        assert_eq!(Codec::Stored.level(), 0);
        assert_eq!(Codec::Deflated(6).level(), 6);
        assert_eq!(Codec::Deflated(9).level(), 9);
    }

    #[test]
    fn test_codec_default() {
        assert_eq!(Codec::default(), Codec::Deflated(6));
        assert!(Codec::default().is_compressed());
        assert!(!Codec::Stored.is_compressed());
    }
}
