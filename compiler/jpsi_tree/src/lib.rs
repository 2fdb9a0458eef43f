//! Syntax trees for jpsi.
//!
//! - [`green`]: immutable parser output, shareable and position-free
//! - [`SyntaxTree`]: the mutable arena tree with parent links, lazy regions
//!   and structural mutation
//! - [`ChildRole`]: role-based child lookup
//! - [`Walker`]: pre-order traversal with early exit and cancellation
//! - [`LighterAst`]: a read-only view implemented by both tree forms

pub mod green;
mod lighter;
mod role;
mod syntax;
mod walk;

pub use green::{Checkpoint, GreenBuilder, GreenElement, GreenLazy, GreenNode, GreenToken};
pub use lighter::{normalized_text, GreenAst, LighterAst};
pub use role::ChildRole;
pub use syntax::{Children, LazyParser, NodeId, SyntaxTree, TreeError};
pub use walk::{WalkAction, WalkOutcome, Walker};

#[cfg(test)]
pub(crate) mod test_support;
