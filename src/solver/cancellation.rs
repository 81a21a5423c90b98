//! Cooperative cancellation for a running solve.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation flag polled once per solver loop iteration.
///
/// Clones share the flag, so an observer or another thread can cancel a
/// solve in flight. Cancellation surfaces to the caller as
/// [`SolverError::Cancelled`](crate::error::SolverError::Cancelled) after
/// the solver has reset its internal state; it never yields a partial
/// result.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
