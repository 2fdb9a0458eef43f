//! Helpers shared by this crate's unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jpsi_ir::{ElementType, LanguageLevel};

use crate::green::{GreenBuilder, GreenNode};
use crate::syntax::{LazyParser, SyntaxTree};

/// Parses `{ a b c }` into `CODE_BLOCK(LBRACE, WHITE_SPACE, IDENTIFIER...)`.
/// A nested `{...}` word becomes a collapsed `CODE_BLOCK`.
#[derive(Default)]
pub(crate) struct WordParser {
    pub(crate) calls: AtomicUsize,
}

impl LazyParser for WordParser {
    fn parse_lazy(&self, kind: ElementType, text: &str, _level: LanguageLevel) -> Arc<GreenNode> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut b = GreenBuilder::new();
        b.start_node(kind);
        let inner = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'));
        match inner {
            Some(inner) => {
                b.token(ElementType::LBrace, "{");
                push_words(&mut b, inner);
                b.token(ElementType::RBrace, "}");
            }
            None => push_words(&mut b, text),
        }
        b.finish_node();
        b.finish()
    }
}

fn push_words(b: &mut GreenBuilder, text: &str) {
    let mut rest = text;
    while !rest.is_empty() {
        let is_space = rest.starts_with(char::is_whitespace);
        let end = rest
            .find(|c: char| c.is_whitespace() != is_space)
            .unwrap_or(rest.len());
        let (piece, tail) = rest.split_at(end);
        if is_space {
            b.token(ElementType::WhiteSpace, piece);
        } else if piece.starts_with('{') && piece.ends_with('}') && piece.len() >= 2 {
            b.lazy(ElementType::CodeBlock, piece);
        } else {
            b.token(ElementType::Identifier, piece);
        }
        rest = tail;
    }
}

/// `METHOD(IDENTIFIER "m", WHITE_SPACE, CODE_BLOCK lazy)` inside a `CLASS`
/// inside a `JAVA_FILE`.
pub(crate) fn method_file(body: &str) -> Arc<GreenNode> {
    let mut b = GreenBuilder::new();
    b.start_node(ElementType::File);
    b.start_node(ElementType::Class);
    b.token(ElementType::Identifier, "C");
    b.start_node(ElementType::Method);
    b.token(ElementType::Identifier, "m");
    b.token(ElementType::WhiteSpace, " ");
    b.lazy(ElementType::CodeBlock, body);
    b.finish_node();
    b.finish_node();
    b.finish_node();
    b.finish()
}

pub(crate) fn tree_with(body: &str) -> (SyntaxTree, Arc<WordParser>) {
    let parser = Arc::new(WordParser::default());
    let tree = SyntaxTree::new(
        &method_file(body),
        LanguageLevel::default(),
        Arc::clone(&parser) as Arc<dyn LazyParser>,
        true,
    );
    (tree, parser)
}
