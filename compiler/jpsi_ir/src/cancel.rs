//! Cooperative cancellation.
//!
//! Long operations (lazy parsing, stub building, tree walks) poll a
//! [`CancellationToken`]. When the token is set they unwind with a
//! [`Cancelled`] payload, which the caller turns back into a value with
//! [`Cancelled::catch`]. Unwinding leaves every shared structure in its
//! pre-operation state because nothing is published until an operation
//! completes.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Unwind payload signalling that the current operation was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

impl Cancelled {
    /// Unwind out of the current operation.
    ///
    /// Uses `resume_unwind` so the panic hook does not print a message.
    pub fn throw() -> ! {
        tracing::debug!("cancellation observed, unwinding");
        panic::resume_unwind(Box::new(Cancelled))
    }

    /// Run `f`, converting a cancellation unwind into `Err(Cancelled)`.
    ///
    /// Any other panic keeps unwinding.
    pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, Cancelled> {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<Cancelled>() {
                Ok(cancelled) => Err(*cancelled),
                Err(payload) => panic::resume_unwind(payload),
            },
        }
    }
}

/// Shared flag polled by long-running operations.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clear a previous cancellation so new operations can run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Unwind with [`Cancelled`] if the token has been set.
    #[inline]
    pub fn check(&self) {
        if self.is_cancelled() {
            Cancelled::throw();
        }
    }
}
