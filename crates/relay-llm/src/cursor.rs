//! Rotation cursor marking the active backend
//!
//! One cursor is created at startup and shared process-wide via `Arc`; it
//! persists across requests and is never auto-reset, so a backend that
//! failed stays deprioritized until rotation wraps back around to it.
//! Tests (and embedders wanting per-session isolation) construct their own.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Index into the backend rotation list, always in `[0, len)`
///
/// The orchestrator is the only writer; diagnostics code may read
/// [`current`](Self::current) concurrently at any time.
#[derive(Debug)]
pub struct RotationCursor {
    index: AtomicUsize,
    len: usize,
}

impl RotationCursor {
    /// Create a cursor over a rotation list of `len` backends, starting at 0
    pub const fn new(len: usize) -> Self {
        Self {
            index: AtomicUsize::new(0),
            len,
        }
    }

    /// Number of backends in the rotation list
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the rotation list is empty
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The active index; no side effect
    pub fn current(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// Advance to the next backend, wrapping modulo the list length
    ///
    /// Returns the new index. The CAS loop guarantees concurrent callers
    /// each move the cursor exactly one step: no lost increments, no
    /// double-skips.
    pub fn advance(&self) -> usize {
        if self.len == 0 {
            return 0;
        }

        let mut observed = self.index.load(Ordering::Relaxed);
        loop {
            let next = (observed + 1) % self.len;
            match self
                .index
                .compare_exchange_weak(observed, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => observed = actual,
            }
        }
    }
}
