//! Lossless Java tokenizer.
//!
//! Every byte of the input belongs to exactly one token, trivia included, so
//! concatenating token texts reproduces the source. Tokens are tagged with
//! [`ElementType`] directly; there is no separate raw-tag layer.
//!
//! Two deliberate simplifications keep the lexer context-free:
//! - `>` is always a single token. The parser fuses adjacent `>` and `=`
//!   tokens into shift and comparison operators, which lets nested generic
//!   argument lists close without splitting.
//! - Contextual keywords (`record`, `var`, `yield`, `sealed`, `permits`)
//!   are lexed as [`ElementType::Identifier`]. The parser retags them where
//!   they act as keywords.

mod cursor;
mod keywords;
mod scanner;

use jpsi_ir::{ElementType, Span};

pub use keywords::{contextual_keyword, reserved_keyword};
pub use scanner::Lexer;

/// A token: its kind and the byte range it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: ElementType,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.to_range()]
    }
}

mod size_asserts {
    use super::Token;
    jpsi_ir::static_assert_size!(Token, 12);
}

/// Tokenize `source` completely.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Tokenize `source`, dropping whitespace and comments.
pub fn tokenize_significant(source: &str) -> Vec<Token> {
    Lexer::new(source).filter(|t| !t.kind.is_trivia()).collect()
}
