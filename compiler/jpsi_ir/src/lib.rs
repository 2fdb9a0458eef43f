//! jpsi IR - shared vocabulary of the Java syntax layer
//!
//! This crate contains the leaf types every other jpsi crate agrees on:
//! - `ElementType`, the closed registry of token and node kinds
//! - `Span` for byte ranges and `TextEdit` for document edits
//! - `LanguageLevel` for version-dependent syntax
//! - `ModificationTracker`, the monotonic stamp used to validate caches
//! - `Cancelled` / `CancellationToken` for cooperative cancellation
//!
//! # Design Philosophy
//!
//! - **Tag Everything**: every token, tree node and stub carries exactly one
//!   `ElementType`, which is a `u8` and never changes after creation.
//! - **Stamp, Don't Subscribe**: derived data records the modification count
//!   it was computed under and is recomputed when the count moves.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod cancel;
mod element_type;
mod language_level;
mod modification;
mod span;
mod stack;
mod text_edit;

pub use cancel::{CancellationToken, Cancelled};
pub use element_type::ElementType;
pub use language_level::LanguageLevel;
pub use modification::ModificationTracker;
pub use span::{Span, SpanError};
pub use stack::ensure_sufficient_stack;
pub use text_edit::TextEdit;
