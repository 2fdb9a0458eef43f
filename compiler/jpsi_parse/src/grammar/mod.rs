//! Parser state and the token-level primitives the grammar is written in.
//!
//! Trivia placement follows three rules:
//! - starting a node flushes pending trivia first, so leading whitespace
//!   and comments land in the enclosing node;
//! - finishing a node does not flush, so trailing trivia also land outside;
//! - a declaration starts before the last doc comment in front of it, which
//!   attaches that comment to the declaration.

mod decl;
mod expr;
mod stmt;
mod types;

use std::sync::Arc;

use jpsi_ir::{ElementType, LanguageLevel};
use jpsi_tree::{Checkpoint, GreenBuilder, GreenNode};

use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::recovery::TokenSet;

use ElementType as T;

pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
    builder: GreenBuilder,
    errors: Vec<SyntaxError>,
    level: LanguageLevel,
    /// Set while parsing `case` labels, where `x -> ...` is a rule, not a lambda.
    no_lambda: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, level: LanguageLevel) -> Self {
        Parser {
            cursor: Cursor::new(source),
            builder: GreenBuilder::new(),
            errors: Vec::new(),
            level,
            no_lambda: false,
        }
    }

    pub fn into_parts(self) -> (Arc<GreenNode>, Vec<SyntaxError>) {
        (self.builder.finish(), self.errors)
    }

    // ─── Entry points ───────────────────────────────────────────────────

    /// A whole compilation unit. Member and lambda bodies become lazy regions.
    pub fn parse_file(&mut self) {
        self.builder.start_node(T::File);
        self.compilation_unit();
        self.flush_trivia();
        self.builder.finish_node();
    }

    /// The content of a lazy code block: `{ statements }`, parsed deep.
    ///
    /// The resulting node covers the whole input, whatever it contains.
    pub fn parse_code_block(&mut self) {
        self.builder.start_node(T::CodeBlock);
        self.flush_trivia();
        if self.at(T::LBrace) {
            self.bump();
            self.block_statements();
            self.expect(T::RBrace, "'}'");
        } else {
            self.error("'{' expected");
        }
        if !self.at_end() {
            let message = "unexpected tokens after code block";
            self.errors
                .push(SyntaxError::new(self.cursor.current_span(), message));
            self.builder.start_error(message);
            while !self.at_end() {
                self.bump();
            }
            self.builder.finish_node();
        }
        self.flush_trivia();
        self.builder.finish_node();
    }

    // ─── Lookahead ──────────────────────────────────────────────────────

    #[inline]
    fn current(&self) -> Option<ElementType> {
        self.cursor.current()
    }

    #[inline]
    fn nth(&self, n: usize) -> Option<ElementType> {
        self.cursor.nth(n)
    }

    #[inline]
    fn previous(&self) -> Option<ElementType> {
        self.cursor.previous()
    }

    #[inline]
    fn at(&self, kind: ElementType) -> bool {
        self.current() == Some(kind)
    }

    #[inline]
    fn nth_at(&self, n: usize, kind: ElementType) -> bool {
        self.nth(n) == Some(kind)
    }

    #[inline]
    fn at_set(&self, set: TokenSet) -> bool {
        self.current().is_some_and(|k| set.contains(k))
    }

    #[inline]
    fn nth_in(&self, n: usize, set: TokenSet) -> bool {
        self.nth(n).is_some_and(|k| set.contains(k))
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Whether the `n`-th token is the identifier `text`.
    fn nth_ident(&self, n: usize, text: &str) -> bool {
        self.nth_at(n, T::Identifier) && self.cursor.nth_text(n) == text
    }

    /// `non-sealed` spelled as three adjacent tokens.
    fn nth_non_sealed(&self, n: usize) -> bool {
        self.level.supports_sealed()
            && self.nth_ident(n, "non")
            && self.nth_at(n + 1, T::Minus)
            && self.nth_ident(n + 2, "sealed")
            && self.cursor.adjacent(n)
            && self.cursor.adjacent(n + 1)
    }

    /// `sealed` used as a modifier rather than as a type name.
    fn nth_sealed(&self, n: usize) -> bool {
        self.level.supports_sealed()
            && self.nth_ident(n, "sealed")
            && (self.nth_in(n + 1, crate::recovery::MODIFIERS)
                || self.nth_at(n + 1, T::ClassKeyword)
                || self.nth_at(n + 1, T::InterfaceKeyword)
                || self.nth_at(n + 1, T::At)
                || self.nth_ident(n + 1, "sealed")
                || self.nth_non_sealed(n + 1))
    }

    /// `record Name(` or `record Name<` at token `n`.
    fn nth_record_start(&self, n: usize) -> bool {
        self.level.supports_records()
            && self.nth_ident(n, "record")
            && self.nth_at(n + 1, T::Identifier)
            && (self.nth_at(n + 2, T::LParenth) || self.nth_at(n + 2, T::Lt))
    }

    /// Kind and token count of the operator starting at a `>` token.
    fn gt_operator(&self) -> (ElementType, usize) {
        let c = &self.cursor;
        if c.adjacent(0) && self.nth_at(1, T::Gt) {
            if c.adjacent(1) && self.nth_at(2, T::Gt) {
                if c.adjacent(2) && self.nth_at(3, T::Eq) {
                    (T::GtGtGtEq, 4)
                } else {
                    (T::GtGtGt, 3)
                }
            } else if c.adjacent(1) && self.nth_at(2, T::Eq) {
                (T::GtGtEq, 3)
            } else {
                (T::GtGt, 2)
            }
        } else if c.adjacent(0) && self.nth_at(1, T::Eq) {
            (T::Ge, 2)
        } else {
            (T::Gt, 1)
        }
    }

    // ─── Emission ───────────────────────────────────────────────────────

    fn flush_trivia(&mut self) {
        for (kind, text) in self.cursor.take_trivia(usize::MAX) {
            self.builder.token(kind, text);
        }
    }

    /// Flush trivia up to (not including) the last pending doc comment.
    fn flush_trivia_before_doc(&mut self) {
        let pending = self.cursor.pending_trivia();
        let keep = pending
            .iter()
            .rposition(|t| t.kind == T::DocComment)
            .unwrap_or(pending.len());
        for (kind, text) in self.cursor.take_trivia(keep) {
            self.builder.token(kind, text);
        }
    }

    fn bump(&mut self) {
        if let Some(kind) = self.current() {
            self.bump_as(kind);
        }
    }

    /// Consume the current token, retagged as `kind`.
    fn bump_as(&mut self, kind: ElementType) {
        self.bump_fused(kind, 1);
    }

    /// Consume `count` adjacent tokens as one token of `kind`.
    fn bump_fused(&mut self, kind: ElementType, count: usize) {
        if self.at_end() {
            return;
        }
        self.flush_trivia();
        let text = self.cursor.take(count.saturating_sub(1));
        self.builder.token(kind, text);
    }

    fn eat(&mut self, kind: ElementType) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: ElementType, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(&format!("{what} expected"));
            false
        }
    }

    fn start(&mut self, kind: ElementType) {
        self.flush_trivia();
        self.builder.start_node(kind);
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Checkpoint for a declaration: a preceding doc comment goes inside.
    fn decl_checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia_before_doc();
        self.builder.checkpoint()
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: ElementType) {
        self.builder.start_node_at(checkpoint, kind);
    }

    // ─── Errors ─────────────────────────────────────────────────────────

    /// Zero-width error marker before the current token.
    fn error(&mut self, message: &str) {
        self.flush_trivia();
        let span = self.cursor.current_span();
        self.errors
            .push(SyntaxError::new(jpsi_ir::Span::new(span.start, span.start), message));
        self.builder.start_error(message);
        self.builder.finish_node();
    }

    /// Wrap the current token in an error node.
    fn error_bump(&mut self, message: &str) {
        self.flush_trivia();
        self.errors
            .push(SyntaxError::new(self.cursor.current_span(), message));
        self.builder.start_error(message);
        self.bump();
        self.builder.finish_node();
    }

    /// Wrap tokens up to the next one in `recovery` (at least one token).
    fn error_until(&mut self, message: &str, recovery: TokenSet) {
        self.flush_trivia();
        let start = self.cursor.current_span();
        self.builder.start_error(message);
        self.bump();
        while !self.at_end() && !self.at_set(recovery) {
            self.bump();
        }
        self.builder.finish_node();
        self.errors.push(SyntaxError::new(start, message));
    }

    /// Marker for a construct the configured language level lacks.
    fn gate(&mut self, supported: bool, feature: &str) {
        if !supported {
            let message = format!("{feature} are not supported at language level {}", self.level);
            self.error(&message);
        }
    }

    // ─── Lazy regions ───────────────────────────────────────────────────

    /// Emit the brace-balanced block at the current `{` as a lazy region.
    ///
    /// An unbalanced block extends to the last token of the input.
    fn lazy_block(&mut self) {
        debug_assert!(self.at(T::LBrace));
        self.flush_trivia();
        let extra = self
            .cursor
            .matching_brace()
            .unwrap_or_else(|| self.cursor.remaining().saturating_sub(1));
        let text = self.cursor.take(extra);
        self.builder.lazy(T::CodeBlock, text);
    }

    /// Run `f` making sure at least one token is consumed.
    fn progress(&mut self, message: &str, recovery: TokenSet, f: impl FnOnce(&mut Self)) {
        let before = self.cursor.position();
        f(self);
        if self.cursor.position() == before && !self.at_end() {
            self.error_until(message, recovery);
        }
    }
}
