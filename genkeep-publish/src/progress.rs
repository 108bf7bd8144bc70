//! Progress reporting and cooperative cancellation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Observes a publishing run.
///
/// Cancellation is polled before every file write; a run stopped this way
/// leaves files already written in place.
#[allow(unused_variables)]
pub trait ProgressCallback {
    /// Called once with the number of artifacts to publish.
    fn save_started(&self, total: usize) {}

    /// Called before each file is written.
    fn start_task(&self, task: &str) {}

    fn is_cancelled(&self) -> bool {
        false
    }

    /// Called when the run finished without a fatal error.
    fn done(&self) {}
}

/// Ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressCallback for NullProgress {}

/// A shareable cancellation switch.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ProgressCallback for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_cancelled());
        handle.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_null_progress_never_cancels() {
        assert!(!NullProgress.is_cancelled());
    }
}
