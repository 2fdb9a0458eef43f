//! A read-only view shared by green trees and syntax trees.
//!
//! Stub building, stub-to-tree binding and the body classifier all run
//! against [`LighterAst`], so the same traversal logic sees the same
//! structure whether it starts from fresh parser output or from a
//! (partially expanded) [`SyntaxTree`].

use std::sync::Arc;

use jpsi_ir::{ensure_sufficient_stack, ElementType, LanguageLevel};

use crate::green::GreenElement;
use crate::syntax::{LazyParser, NodeId, SyntaxTree};

pub trait LighterAst {
    type Node: Clone;

    fn root(&self) -> Self::Node;

    fn kind(&self, node: &Self::Node) -> ElementType;

    /// Children in order. Collapsed regions are parsed to produce them.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Text of a token.
    fn token_text(&self, node: &Self::Node) -> Option<Arc<str>>;

    /// Raw text of a region that has not been parsed.
    fn lazy_text(&self, node: &Self::Node) -> Option<Arc<str>>;

    /// Whether the node is a lazily parsed region, expanded or not.
    fn is_lazy(&self, node: &Self::Node) -> bool {
        self.lazy_text(node).is_some()
    }

    /// Full source text of the node.
    fn text(&self, node: &Self::Node) -> String {
        let mut out = String::new();
        write_text(self, node, &mut out);
        out
    }

    fn first_child_of_kind(&self, node: &Self::Node, kind: ElementType) -> Option<Self::Node> {
        self.children(node)
            .into_iter()
            .find(|c| self.kind(c) == kind)
    }

    fn children_of_kind(&self, node: &Self::Node, kind: ElementType) -> Vec<Self::Node> {
        self.children(node)
            .into_iter()
            .filter(|c| self.kind(c) == kind)
            .collect()
    }
}

fn write_text<A: LighterAst + ?Sized>(ast: &A, node: &A::Node, out: &mut String) {
    if let Some(text) = ast.token_text(node).or_else(|| ast.lazy_text(node)) {
        out.push_str(&text);
        return;
    }
    for child in ast.children(node) {
        ensure_sufficient_stack(|| write_text(ast, &child, out));
    }
}

/// Text with whitespace and comments removed.
///
/// Adjacent word-like tokens (identifiers, keywords, literals) are joined by
/// one space, as is a `?` followed by a keyword, so `Map< ? extends T >`
/// becomes `Map<? extends T>`. Stubs store type texts in this form.
pub fn normalized_text<A: LighterAst + ?Sized>(ast: &A, node: &A::Node) -> String {
    let mut out = String::new();
    let mut prev: Option<ElementType> = None;
    collect_normalized(ast, node, &mut out, &mut prev);
    out
}

fn is_word(kind: ElementType) -> bool {
    kind == ElementType::Identifier || kind.is_keyword() || kind.is_literal()
}

fn collect_normalized<A: LighterAst + ?Sized>(
    ast: &A,
    node: &A::Node,
    out: &mut String,
    prev: &mut Option<ElementType>,
) {
    let kind = ast.kind(node);
    if kind.is_trivia() {
        return;
    }
    if let Some(text) = ast.token_text(node) {
        if let Some(p) = *prev {
            let needs_space = (is_word(p) && is_word(kind))
                || (p == ElementType::Quest && kind.is_keyword());
            if needs_space {
                out.push(' ');
            }
        }
        out.push_str(&text);
        *prev = Some(kind);
        return;
    }
    for child in ast.children(node) {
        ensure_sufficient_stack(|| collect_normalized(ast, &child, out, prev));
    }
}

// ─── Syntax tree view ───────────────────────────────────────────────────

impl LighterAst for SyntaxTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        SyntaxTree::root(self)
    }

    fn kind(&self, node: &NodeId) -> ElementType {
        SyntaxTree::kind(self, *node)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        SyntaxTree::children(self, *node).into_vec()
    }

    fn token_text(&self, node: &NodeId) -> Option<Arc<str>> {
        SyntaxTree::token_text(self, *node)
    }

    fn lazy_text(&self, node: &NodeId) -> Option<Arc<str>> {
        SyntaxTree::lazy_text(self, *node)
    }

    fn is_lazy(&self, node: &NodeId) -> bool {
        SyntaxTree::is_lazy(self, *node)
    }

    fn text(&self, node: &NodeId) -> String {
        SyntaxTree::text(self, *node)
    }
}

// ─── Green tree view ────────────────────────────────────────────────────

/// [`LighterAst`] over parser output.
///
/// Children of a lazy element are produced by parsing its text on each
/// request; nothing is cached.
pub struct GreenAst {
    root: GreenElement,
    parser: Arc<dyn LazyParser>,
    level: LanguageLevel,
}

impl GreenAst {
    pub fn new(root: GreenElement, parser: Arc<dyn LazyParser>, level: LanguageLevel) -> Self {
        GreenAst {
            root,
            parser,
            level,
        }
    }
}

impl LighterAst for GreenAst {
    type Node = GreenElement;

    fn root(&self) -> GreenElement {
        self.root.clone()
    }

    fn kind(&self, node: &GreenElement) -> ElementType {
        node.kind()
    }

    fn children(&self, node: &GreenElement) -> Vec<GreenElement> {
        match node {
            GreenElement::Node(n) => n.children().to_vec(),
            GreenElement::Token(_) => Vec::new(),
            GreenElement::Lazy(lazy) => self
                .parser
                .parse_lazy(lazy.kind(), lazy.text(), self.level)
                .children()
                .to_vec(),
        }
    }

    fn token_text(&self, node: &GreenElement) -> Option<Arc<str>> {
        match node {
            GreenElement::Token(t) => Some(Arc::clone(t.text())),
            _ => None,
        }
    }

    fn lazy_text(&self, node: &GreenElement) -> Option<Arc<str>> {
        match node {
            GreenElement::Lazy(l) => Some(Arc::clone(l.text())),
            _ => None,
        }
    }

    fn text(&self, node: &GreenElement) -> String {
        node.text()
    }
}
