//! Syntax errors collected alongside the error-marker nodes.

use std::fmt;

use jpsi_ir::Span;

/// A syntax error at a source location.
///
/// The same message is carried by the `ERROR_ELEMENT` node the parser
/// leaves in the tree; this list is a convenience for eagerly parsed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
}

impl SyntaxError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        SyntaxError {
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span.start, self.message)
    }
}

impl std::error::Error for SyntaxError {}
