//! Cooperative cancellation for long-running conversions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a caller can raise to abort an in-progress conversion
///
/// The tree builder consults the flag at every folder it enters, so a very
/// large conversion stops within one folder's worth of work after the flag is
/// raised. Cloning produces handles to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unraised flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any conversion holding a clone of this flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_shared_across_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }
}
