//! Failures surfaced by PSI accessors.
//!
//! Malformed source is never an error here: it lives in the tree as
//! `ERROR_ELEMENT` nodes. Cancellation is not an error either; it unwinds
//! with [`jpsi_ir::Cancelled`].

use jpsi_ir::{ElementType, Span};
use jpsi_stub::StubSerializationError;

/// Errors from PSI accessors.
#[derive(Debug, thiserror::Error)]
pub enum PsiError {
    /// The element's file was reparsed, or its node was deleted or replaced.
    /// Callers must re-resolve from a fresh handle.
    #[error("invalid {kind} element ({key})")]
    InvalidElement { kind: ElementType, key: String },
    /// The stub tree and the syntax tree disagree on the declaration
    /// skeleton, so stubs cannot be bound to nodes.
    #[error("stub tree has {stubs} stubs but the syntax tree has {nodes} stub nodes")]
    StubAstMismatch { stubs: usize, nodes: usize },
    /// The file has no stub tree (detached copies never do).
    #[error("file has no stub tree")]
    NoStubTree,
    /// A document edit whose range is outside the text or splits a
    /// character.
    #[error("edit range {range:?} does not fit a text of {len} bytes")]
    InvalidEdit { range: Span, len: usize },
    /// Text handed to `add_member` that does not parse as member
    /// declarations.
    #[error("not a member declaration: {text:?}")]
    NotAMember { text: String },
    #[error(transparent)]
    Serialization(#[from] StubSerializationError),
}

pub type PsiResult<T> = Result<T, PsiError>;
