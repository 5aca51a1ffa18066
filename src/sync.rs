//! Synchronization primitives shared by search threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::search::KillSwitchFn;

/// A thread-safe stop flag for ending a search from outside.
///
/// Clones share the same flag, so one handle can be given to a search and
/// another kept by whoever decides to stop it.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// A kill-switch predicate that fires once this flag is set or
    /// `deadline` has passed.
    #[must_use]
    pub fn kill_switch(&self, deadline: Option<Instant>) -> KillSwitchFn {
        let flag = self.clone();
        Box::new(move || flag.is_stopped() || deadline.is_some_and(|d| Instant::now() >= d))
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Arc<AtomicBool>> for StopFlag {
    fn from(arc: Arc<AtomicBool>) -> Self {
        StopFlag(arc)
    }
}
