//! Immutable green trees.
//!
//! Parser output. A green tree owns its text (tokens hold their slices) and
//! knows nothing about parents or positions, so subtrees can be shared and
//! grafted freely. Lazy elements hold the unparsed text of a region and are
//! expanded only when a [`SyntaxTree`](crate::SyntaxTree) is asked for their
//! children.

use std::sync::Arc;

use jpsi_ir::ElementType;

/// A composite node.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode {
    kind: ElementType,
    /// Set only on `ERROR_ELEMENT` nodes.
    error: Option<Arc<str>>,
    children: Vec<GreenElement>,
    text_len: u32,
}

/// A child of a green node.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum GreenElement {
    Node(Arc<GreenNode>),
    Token(GreenToken),
    /// A region whose content has not been parsed.
    Lazy(GreenLazy),
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken {
    kind: ElementType,
    text: Arc<str>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenLazy {
    kind: ElementType,
    text: Arc<str>,
}

fn len_u32(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}

impl GreenNode {
    pub fn new(kind: ElementType, children: Vec<GreenElement>) -> Self {
        let text_len = children
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.text_len()));
        GreenNode {
            kind,
            error: None,
            children,
            text_len,
        }
    }

    pub fn new_error(message: impl Into<Arc<str>>, children: Vec<GreenElement>) -> Self {
        let mut node = GreenNode::new(ElementType::ErrorElement, children);
        node.error = Some(message.into());
        node
    }

    #[inline]
    pub fn kind(&self) -> ElementType {
        self.kind
    }

    #[inline]
    pub fn error(&self) -> Option<&Arc<str>> {
        self.error.as_ref()
    }

    #[inline]
    pub fn children(&self) -> &[GreenElement] {
        &self.children
    }

    #[inline]
    pub fn text_len(&self) -> u32 {
        self.text_len
    }

    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.text_len as usize);
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        for child in &self.children {
            child.write_text(out);
        }
    }
}

impl GreenToken {
    pub fn new(kind: ElementType, text: impl Into<Arc<str>>) -> Self {
        GreenToken {
            kind,
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ElementType {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }
}

impl GreenLazy {
    pub fn new(kind: ElementType, text: impl Into<Arc<str>>) -> Self {
        GreenLazy {
            kind,
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ElementType {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }
}

impl GreenElement {
    #[inline]
    pub fn kind(&self) -> ElementType {
        match self {
            GreenElement::Node(n) => n.kind,
            GreenElement::Token(t) => t.kind,
            GreenElement::Lazy(l) => l.kind,
        }
    }

    #[inline]
    pub fn text_len(&self) -> u32 {
        match self {
            GreenElement::Node(n) => n.text_len,
            GreenElement::Token(t) => len_u32(&t.text),
            GreenElement::Lazy(l) => len_u32(&l.text),
        }
    }

    pub fn as_node(&self) -> Option<&Arc<GreenNode>> {
        match self {
            GreenElement::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            GreenElement::Node(n) => n.write_text(out),
            GreenElement::Token(t) => out.push_str(&t.text),
            GreenElement::Lazy(l) => out.push_str(&l.text),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(Arc::new(node))
    }
}

impl std::fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.kind, self.text_len)
    }
}

impl std::fmt::Debug for GreenElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GreenElement::Node(n) => n.fmt(f),
            GreenElement::Token(t) => write!(f, "{:?}({:?})", t.kind, t.text),
            GreenElement::Lazy(l) => write!(f, "{:?}(lazy {} bytes)", l.kind, l.text.len()),
        }
    }
}

impl std::fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

impl std::fmt::Debug for GreenLazy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}(lazy)", self.kind)
    }
}

// ─── Builder ────────────────────────────────────────────────────────────

/// Position in the builder's output that a node can later be wrapped from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Event-style builder: `start_node` / `token` / `finish_node`.
///
/// `checkpoint` + `start_node_at` wrap already-emitted children in a new
/// node, which is how the parser builds left-recursive expressions without
/// backtracking.
#[derive(Default)]
pub struct GreenBuilder {
    parents: Vec<(ElementType, Option<Arc<str>>, usize)>,
    children: Vec<GreenElement>,
}

impl GreenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: ElementType) {
        let len = self.children.len();
        self.parents.push((kind, None, len));
    }

    /// Start an `ERROR_ELEMENT` node carrying `message`.
    pub fn start_error(&mut self, message: impl Into<Arc<str>>) {
        let len = self.children.len();
        self.parents
            .push((ElementType::ErrorElement, Some(message.into()), len));
    }

    pub fn token(&mut self, kind: ElementType, text: &str) {
        self.children
            .push(GreenElement::Token(GreenToken::new(kind, text)));
    }

    pub fn lazy(&mut self, kind: ElementType, text: &str) {
        self.children
            .push(GreenElement::Lazy(GreenLazy::new(kind, text)));
    }

    /// Append a prebuilt element.
    pub fn push(&mut self, element: GreenElement) {
        self.children.push(element);
    }

    pub fn finish_node(&mut self) {
        let Some((kind, error, first_child)) = self.parents.pop() else {
            debug_assert!(false, "finish_node without matching start_node");
            return;
        };
        let children: Vec<GreenElement> = self.children.drain(first_child..).collect();
        let mut node = GreenNode::new(kind, children);
        node.error = error;
        self.children.push(node.into());
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Start a node whose first child is the element emitted at `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: ElementType) {
        let Checkpoint(at) = checkpoint;
        debug_assert!(
            at <= self.children.len(),
            "checkpoint {at} is past the current children ({})",
            self.children.len()
        );
        debug_assert!(
            self.parents.last().map_or(true, |&(_, _, first)| first <= at),
            "checkpoint precedes the innermost open node"
        );
        self.parents.push((kind, None, at.min(self.children.len())));
    }

    /// Like [`start_node_at`](Self::start_node_at) for an error node.
    pub fn start_error_at(&mut self, checkpoint: Checkpoint, message: impl Into<Arc<str>>) {
        let Checkpoint(at) = checkpoint;
        self.parents.push((
            ElementType::ErrorElement,
            Some(message.into()),
            at.min(self.children.len()),
        ));
    }

    /// Whether no element has been emitted since `checkpoint`.
    #[inline]
    pub fn is_empty_since(&self, checkpoint: Checkpoint) -> bool {
        self.children.len() <= checkpoint.0
    }

    /// Close all open nodes and return the single root.
    ///
    /// If the events did not produce exactly one root node, the leftovers
    /// are wrapped in an `ERROR_ELEMENT` so no text is lost.
    pub fn finish(mut self) -> Arc<GreenNode> {
        while !self.parents.is_empty() {
            self.finish_node();
        }
        if self.children.len() == 1 {
            if let Some(GreenElement::Node(root)) = self.children.pop() {
                return root;
            }
        }
        Arc::new(GreenNode::new_error("unbalanced tree", self.children))
    }
}
