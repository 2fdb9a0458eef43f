//! Stack growth for deep recursion.
//!
//! The parser, green-tree grafting and stub traversal all recurse on
//! nesting depth, which is unbounded for hostile input.

/// Keep at least this much stack available (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Grow by this much when below the red zone (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
