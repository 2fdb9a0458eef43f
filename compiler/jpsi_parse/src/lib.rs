//! Recursive-descent Java parser for jpsi.
//!
//! Produces green trees (see `jpsi_tree::green`) that reproduce the input
//! text exactly. Two entry points:
//!
//! - [`parse_file`]: a compilation unit. Every member body and lambda body
//!   is emitted as a lazy `CODE_BLOCK` region holding its raw text.
//! - [`parse_code_block`]: the content of one such region, parsed deep
//!   (nested member and lambda bodies stay lazy).
//!
//! Malformed input never fails: errors become `ERROR_ELEMENT` nodes and are
//! also returned as a [`SyntaxError`] list.
//!
//! The grammar is a practical subset of Java 8 through 21; constructs newer
//! than the configured [`LanguageLevel`] are parsed and flagged.

mod cursor;
mod error;
mod grammar;
mod recovery;

use std::sync::Arc;

use jpsi_ir::{ElementType, LanguageLevel};
use jpsi_tree::{GreenElement, GreenNode, GreenToken, LazyParser};

pub use error::SyntaxError;

use grammar::Parser;

/// Result of a parse: the green root and the errors found.
#[derive(Clone, Debug)]
pub struct Parse {
    green: Arc<GreenNode>,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn green(&self) -> &Arc<GreenNode> {
        &self.green
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_green(self) -> Arc<GreenNode> {
        self.green
    }
}

/// Parse a compilation unit.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len(), %level))]
pub fn parse_file(text: &str, level: LanguageLevel) -> Parse {
    let mut parser = Parser::new(text, level);
    parser.parse_file();
    let (green, errors) = parser.into_parts();
    tracing::debug!(errors = errors.len(), "parsed file");
    Parse { green, errors }
}

/// Parse the text of a lazy code block, `{` through `}`.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len(), %level))]
pub fn parse_code_block(text: &str, level: LanguageLevel) -> Parse {
    let mut parser = Parser::new(text, level);
    parser.parse_code_block();
    let (green, errors) = parser.into_parts();
    Parse { green, errors }
}

/// Whether `text` is exactly one brace-balanced block: it starts with `{`,
/// ends with the matching `}`, and nothing (not even trivia) surrounds it.
///
/// Edits that keep a lazy region in this shape can be reparsed locally.
pub fn is_single_balanced_block(text: &str) -> bool {
    let tokens = jpsi_lexer::tokenize(text);
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return false;
    };
    if first.kind != ElementType::LBrace || last.kind != ElementType::RBrace {
        return false;
    }
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            ElementType::LBrace => depth += 1,
            ElementType::RBrace => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 && i + 1 != tokens.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// The [`LazyParser`] that expands `CODE_BLOCK` regions.
#[derive(Clone, Copy, Debug, Default)]
pub struct JavaLazyParser;

impl JavaLazyParser {
    /// Shared instance, ready to hand to a `SyntaxTree`.
    pub fn shared() -> Arc<dyn LazyParser> {
        Arc::new(JavaLazyParser)
    }
}

impl LazyParser for JavaLazyParser {
    fn parse_lazy(&self, kind: ElementType, text: &str, level: LanguageLevel) -> Arc<GreenNode> {
        if kind == ElementType::CodeBlock {
            return parse_code_block(text, level).into_green();
        }
        tracing::warn!(%kind, "no lazy parser for element type");
        let error = GreenNode::new_error(
            format!("{kind} is not lazily parseable"),
            vec![GreenElement::Token(GreenToken::new(
                ElementType::BadCharacter,
                text,
            ))],
        );
        Arc::new(GreenNode::new(kind, vec![error.into()]))
    }
}

#[cfg(test)]
mod tests;
