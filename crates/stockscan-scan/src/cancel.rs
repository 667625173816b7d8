//! Operator cancel signal, polled once before and once after each frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

impl<T: CancelSignal + ?Sized> CancelSignal for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Shared cancel flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    /// Requests cancellation of the running session.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Re-arms the flag for the next session.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CancelSignal for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = CancelFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_cancelled());

        handle.trigger();
        assert!(flag.is_cancelled());

        flag.reset();
        assert!(!handle.is_cancelled());
    }
}
