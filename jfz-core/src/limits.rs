//! Resource limits and configuration

/// Resource limits guarding against adversarially deep or wide inputs
///
/// JSON values cannot contain cycles, so tree construction always terminates;
/// the limits bound the resources a single conversion may consume before it
/// fails with a clear error instead of exhausting the process.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum nesting depth of the generated tree (default: 512)
    pub max_depth: usize,
    /// Maximum number of tree nodes per conversion (default: 1,000,000)
    pub max_entries: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_entries: 1_000_000,
        }
    }
}
