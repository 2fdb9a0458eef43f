//! Decides whether a method or initializer body can stay out of the stub
//! tree.
//!
//! A body is *stub-free* when it declares nothing that indexing must see
//! without a full parse: no local, anonymous or annotation-bearing
//! declarations, no lambdas and no method references. Stub-free bodies are
//! skipped by the stub builder and can stay collapsed.
//!
//! Two entry points answer the question:
//! - [`is_stub_free_text`] scans the raw token stream of a collapsed region;
//! - [`is_stub_free_tree`] walks an already parsed subtree.
//!
//! Both feed the same [`BodyScanner`], so they agree on every input. The
//! tree walk re-lexes tokens the parser retagged (contextual keywords, fused
//! `>` operators) to see what the raw scan sees, and additionally rejects
//! class and annotation nodes outright.

use jpsi_ir::ElementType;
use jpsi_tree::LighterAst;

use ElementType as T;

/// Result of feeding one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStep {
    Continue,
    /// The body needs stubs; scanning can stop.
    Disqualified,
}

/// Forward scan over significant tokens, short-circuiting on the first
/// construct that needs stubs.
#[derive(Clone, Debug, Default)]
pub struct BodyScanner {
    last: Option<ElementType>,
    pre_last: Option<ElementType>,
    seen_new: bool,
    seen_lparen: bool,
    seen_modifier: bool,
    disqualified: bool,
}

impl BodyScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disqualified(&self) -> bool {
        self.disqualified
    }

    /// Feed the next token in lexer terms.
    pub fn feed(&mut self, kind: ElementType) -> ScanStep {
        if self.disqualified {
            return ScanStep::Disqualified;
        }
        if kind.is_trivia() {
            return ScanStep::Continue;
        }
        if self.disqualifies(kind) {
            self.disqualified = true;
            return ScanStep::Disqualified;
        }
        self.pre_last = self.last;
        self.last = Some(kind);
        ScanStep::Continue
    }

    fn disqualifies(&mut self, kind: ElementType) -> bool {
        match kind {
            // Annotations, lambdas (and switch rules), method references.
            T::At | T::Arrow | T::DoubleColon => true,

            // Anonymous classes: `new ... ( ... {`.
            T::NewKeyword => {
                self.seen_new = true;
                false
            }
            T::Semicolon => {
                self.seen_new = false;
                self.seen_lparen = false;
                self.seen_modifier = false;
                false
            }
            T::LParenth if self.seen_new => {
                self.seen_lparen = true;
                self.would_declare_record(kind)
            }
            T::LBrace if self.seen_new && self.seen_lparen => true,
            T::LBrace | T::RBrace => {
                self.seen_modifier = false;
                false
            }

            // Local classes, unless this is `Name.class` and friends.
            T::ClassKeyword | T::EnumKeyword | T::InterfaceKeyword => {
                !(self.last == Some(T::Dot) && self.is_class_literal_owner() && !self.seen_modifier)
            }

            kind if kind.is_modifier_keyword() => {
                self.seen_modifier = true;
                false
            }

            // `record Name(` / `record Name<`: the contextual keyword is a
            // plain identifier in the raw stream.
            T::LParenth | T::Lt => self.would_declare_record(kind),

            _ => false,
        }
    }

    /// Whether the token before the `.` can own a class literal.
    fn is_class_literal_owner(&self) -> bool {
        self.pre_last.is_some_and(|k| {
            k == T::Identifier || k == T::RBracket || k.is_primitive_type_keyword()
        })
    }

    fn would_declare_record(&self, kind: ElementType) -> bool {
        matches!(kind, T::LParenth | T::Lt)
            && self.last == Some(T::Identifier)
            && self.pre_last == Some(T::Identifier)
    }
}

/// Token-scan variant over raw source text.
pub fn is_stub_free_text(text: &str) -> bool {
    let mut scanner = BodyScanner::new();
    feed_text(&mut scanner, text) == ScanStep::Continue
}

fn feed_text(scanner: &mut BodyScanner, text: &str) -> ScanStep {
    for token in jpsi_lexer::Lexer::new(text) {
        if scanner.feed(token.kind) == ScanStep::Disqualified {
            return ScanStep::Disqualified;
        }
    }
    ScanStep::Continue
}

/// Tree variant over a parsed subtree.
///
/// Collapsed regions met on the way are scanned as text rather than parsed.
pub fn is_stub_free_tree<A: LighterAst + ?Sized>(ast: &A, node: &A::Node) -> bool {
    let mut scanner = BodyScanner::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        let kind = ast.kind(&current);
        if matches!(kind, T::Class | T::AnonymousClass | T::Annotation) {
            return false;
        }
        if let Some(text) = ast.token_text(&current) {
            let step = if kind.is_contextual_keyword() || kind.is_fused_operator() {
                feed_text(&mut scanner, &text)
            } else {
                scanner.feed(kind)
            };
            if step == ScanStep::Disqualified {
                return false;
            }
            continue;
        }
        if let Some(text) = ast.lazy_text(&current) {
            if feed_text(&mut scanner, &text) == ScanStep::Disqualified {
                return false;
            }
            continue;
        }
        let children = ast.children(&current);
        stack.extend(children.into_iter().rev());
    }
    true
}

/// Classify `node` with whichever variant fits its state: the token scan
/// for a collapsed region, the tree walk otherwise.
pub fn is_stub_free<A: LighterAst + ?Sized>(ast: &A, node: &A::Node) -> bool {
    match ast.lazy_text(node) {
        Some(text) => is_stub_free_text(&text),
        None => is_stub_free_tree(ast, node),
    }
}
