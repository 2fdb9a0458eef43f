//! Monotonic modification stamps.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter bumped on every structural change.
///
/// Caches remember the count they were computed under and treat any other
/// count as stale. The counter never decreases, so a stamp that matches is
/// always current.
#[derive(Debug, Default)]
pub struct ModificationTracker {
    count: AtomicU64,
}

impl ModificationTracker {
    pub const fn new() -> Self {
        ModificationTracker {
            count: AtomicU64::new(0),
        }
    }

    /// Current stamp.
    #[inline]
    pub fn modification_count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Bump the stamp and return the new value.
    #[inline]
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[cfg(test)]
mod tests;
