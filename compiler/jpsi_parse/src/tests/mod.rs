//! Parser tests, grouped by the grammar area they cover:
//! - `decl`: compilation units, classes and members
//! - `stmt`: statements inside code blocks
//! - `expr`: expressions and operator fusion

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod expr;

use jpsi_ir::{ElementType, LanguageLevel};
use jpsi_tree::{GreenElement, GreenNode};

use crate::{parse_code_block, parse_file, Parse};

/// Compact rendering without trivia: `KIND[children]` for nodes, raw text
/// for tokens, `KIND~text` for lazy regions and `ERROR_ELEMENT(msg)[...]`
/// for errors.
pub(crate) fn sexp(node: &GreenNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &GreenNode, out: &mut String) {
    out.push_str(node.kind().debug_name());
    if let Some(message) = node.error() {
        out.push('(');
        out.push_str(message);
        out.push(')');
    }
    out.push('[');
    let mut first = true;
    for child in node.children() {
        if child.kind().is_trivia() {
            continue;
        }
        if !first {
            out.push(' ');
        }
        first = false;
        match child {
            GreenElement::Node(n) => write_node(n, out),
            GreenElement::Token(t) => out.push_str(t.text()),
            GreenElement::Lazy(l) => {
                out.push_str(l.kind().debug_name());
                out.push('~');
                out.push_str(l.text());
            }
        }
    }
    out.push(']');
}

/// Every token in the tree, in order, with trivia.
pub(crate) fn tokens(node: &GreenNode) -> Vec<(ElementType, String)> {
    fn walk(node: &GreenNode, out: &mut Vec<(ElementType, String)>) {
        for child in node.children() {
            match child {
                GreenElement::Node(n) => walk(n, out),
                GreenElement::Token(t) => out.push((t.kind(), t.text().to_string())),
                GreenElement::Lazy(l) => out.push((l.kind(), l.text().to_string())),
            }
        }
    }
    let mut out = Vec::new();
    walk(node, &mut out);
    out
}

pub(crate) fn file(text: &str) -> Parse {
    let parse = parse_file(text, LanguageLevel::Jdk21);
    assert_eq!(parse.green().text(), text, "parse must be lossless");
    parse
}

pub(crate) fn block(text: &str) -> Parse {
    block_at(text, LanguageLevel::Jdk21)
}

pub(crate) fn block_at(text: &str, level: LanguageLevel) -> Parse {
    let parse = parse_code_block(text, level);
    assert_eq!(parse.green().text(), text, "parse must be lossless");
    assert_eq!(parse.green().kind(), ElementType::CodeBlock);
    parse
}

#[test]
fn balanced_block_detection() {
    use crate::is_single_balanced_block;
    assert!(is_single_balanced_block("{}"));
    assert!(is_single_balanced_block("{ a { b } /* } */ c }"));
    assert!(!is_single_balanced_block("{ a } b"));
    assert!(!is_single_balanced_block(" { a }"));
    assert!(!is_single_balanced_block("{ a }\n"));
    assert!(!is_single_balanced_block("{ a"));
    assert!(!is_single_balanced_block("{ a } }"));
    assert!(!is_single_balanced_block("{ } { }"));
    assert!(!is_single_balanced_block(""));
}

#[test]
fn lazy_parser_expands_code_blocks() {
    use jpsi_tree::LazyParser;
    let green = crate::JavaLazyParser.parse_lazy(
        ElementType::CodeBlock,
        "{ return; }",
        LanguageLevel::Jdk17,
    );
    assert_eq!(
        sexp(&green),
        "CODE_BLOCK[{ RETURN_STATEMENT[return ;] }]"
    );
}

#[test]
fn lazy_parser_rejects_other_kinds() {
    use jpsi_tree::LazyParser;
    let green = crate::JavaLazyParser.parse_lazy(
        ElementType::ExpressionList,
        "(a)",
        LanguageLevel::Jdk17,
    );
    assert_eq!(green.kind(), ElementType::ExpressionList);
    assert_eq!(green.text(), "(a)");
    assert_eq!(green.children()[0].kind(), ElementType::ErrorElement);
}
