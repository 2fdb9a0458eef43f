//! The arena-backed syntax tree.
//!
//! A [`SyntaxTree`] is built from a green root and owns every node in one
//! flat arena, addressed by [`NodeId`]. Parents are stored as ids, children
//! as id lists owned by the parent, so ownership stays a strict tree.
//!
//! # Lazy regions
//!
//! Green lazy elements become *collapsed* nodes that hold their raw text and
//! no children. The first request for the children of a collapsed node
//! parses its text through the tree's [`LazyParser`] and grafts the result
//! in place. Parsing runs outside the arena lock; the write lock is taken
//! only to publish, and a racing expansion that lost simply discards its
//! result. Expansion is irreversible for a node. [`SyntaxTree::copy_subtree`]
//! produces a re-collapsed copy.
//!
//! # Mutation
//!
//! Mutations take `&self` and the arena's write lock. Removed nodes are
//! never freed: they keep their id and data but lose their parent link,
//! which is how stale handles are detected ([`SyntaxTree::is_attached`]).

use std::fmt::Write as _;
use std::sync::Arc;

use jpsi_ir::{ensure_sufficient_stack, ElementType, LanguageLevel, Span};
use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::green::{GreenElement, GreenLazy, GreenNode, GreenToken};

/// Index of a node in a [`SyntaxTree`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Child id list; most nodes have few children.
pub type Children = SmallVec<[NodeId; 4]>;

/// Parses the text of a collapsed region.
///
/// Implemented by the parser crate; the tree only holds it as a trait
/// object so the two crates do not depend on each other.
pub trait LazyParser: Send + Sync {
    /// Parse `text` as a node of `kind`.
    ///
    /// The result must be a node of `kind` whose text is exactly `text`.
    /// Malformed text is represented by error nodes, never by failure.
    fn parse_lazy(&self, kind: ElementType, text: &str, level: LanguageLevel) -> Arc<GreenNode>;
}

/// Errors from structural mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {0:?} is not attached to the tree")]
    Detached(NodeId),
    #[error("node {0:?} cannot have children")]
    NotComposite(NodeId),
    #[error("child index {index} out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("the root node cannot be removed or replaced")]
    Root,
    #[error("node {0:?} is not a lazily parsed region")]
    NotLazy(NodeId),
}

#[derive(Clone)]
enum Repr {
    Token(Arc<str>),
    Composite { error: Option<Arc<str>> },
    /// Lazy region not parsed yet.
    Collapsed(Arc<str>),
    /// Lazy region whose children have been materialized.
    Expanded,
}

struct NodeData {
    kind: ElementType,
    parent: Option<NodeId>,
    children: Children,
    text_len: u32,
    repr: Repr,
}

#[derive(Default)]
struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    #[inline]
    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(data);
        id
    }

    /// Copy a green element (and its subtree) into the arena.
    fn alloc(&mut self, element: &GreenElement, parent: Option<NodeId>) -> NodeId {
        match element {
            GreenElement::Token(token) => self.push(NodeData {
                kind: token.kind(),
                parent,
                children: Children::new(),
                text_len: element.text_len(),
                repr: Repr::Token(Arc::clone(token.text())),
            }),
            GreenElement::Lazy(lazy) => self.push(NodeData {
                kind: lazy.kind(),
                parent,
                children: Children::new(),
                text_len: element.text_len(),
                repr: Repr::Collapsed(Arc::clone(lazy.text())),
            }),
            GreenElement::Node(node) => {
                let id = self.push(NodeData {
                    kind: node.kind(),
                    parent,
                    children: Children::new(),
                    text_len: node.text_len(),
                    repr: Repr::Composite {
                        error: node.error().cloned(),
                    },
                });
                let children: Children = node
                    .children()
                    .iter()
                    .map(|child| ensure_sufficient_stack(|| self.alloc(child, Some(id))))
                    .collect();
                self.node_mut(id).children = children;
                id
            }
        }
    }

    /// Add `delta` to the text length of `start` and all its ancestors.
    fn adjust_lengths(&mut self, start: NodeId, delta: i64) {
        if delta == 0 {
            return;
        }
        let mut current = Some(start);
        while let Some(id) = current {
            let node = self.node_mut(id);
            let updated = i64::from(node.text_len) + delta;
            node.text_len = u32::try_from(updated.max(0)).unwrap_or(u32::MAX);
            current = node.parent;
        }
    }

    fn write_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.repr {
            Repr::Token(text) | Repr::Collapsed(text) => out.push_str(text),
            Repr::Composite { .. } | Repr::Expanded => {
                for &child in &node.children {
                    ensure_sufficient_stack(|| self.write_text(child, out));
                }
            }
        }
    }

    fn to_green(&self, id: NodeId) -> GreenElement {
        let node = self.node(id);
        match &node.repr {
            Repr::Token(text) => GreenElement::Token(GreenToken::new(node.kind, Arc::clone(text))),
            Repr::Collapsed(text) => {
                GreenElement::Lazy(GreenLazy::new(node.kind, Arc::clone(text)))
            }
            Repr::Expanded => {
                let mut text = String::with_capacity(node.text_len as usize);
                self.write_text(id, &mut text);
                GreenElement::Lazy(GreenLazy::new(node.kind, text))
            }
            Repr::Composite { error } => {
                let children = node
                    .children
                    .iter()
                    .map(|&child| ensure_sufficient_stack(|| self.to_green(child)))
                    .collect();
                let green = match error {
                    Some(message) => GreenNode::new_error(Arc::clone(message), children),
                    None => GreenNode::new(node.kind, children),
                };
                green.into()
            }
        }
    }
}

/// A mutable, navigable syntax tree.
pub struct SyntaxTree {
    arena: RwLock<Arena>,
    root: NodeId,
    level: LanguageLevel,
    parser: Arc<dyn LazyParser>,
    validate: bool,
}

impl SyntaxTree {
    /// Build a tree from `root`.
    ///
    /// With `validate` set, structural invariants are re-checked after every
    /// mutation.
    pub fn new(
        root: &Arc<GreenNode>,
        level: LanguageLevel,
        parser: Arc<dyn LazyParser>,
        validate: bool,
    ) -> Self {
        let mut arena = Arena::default();
        let root = arena.alloc(&GreenElement::Node(Arc::clone(root)), None);
        SyntaxTree {
            arena: RwLock::new(arena),
            root,
            level,
            parser,
            validate,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn level(&self) -> LanguageLevel {
        self.level
    }

    /// The parser used for lazy regions (shared with copies of this tree).
    pub fn lazy_parser(&self) -> &Arc<dyn LazyParser> {
        &self.parser
    }

    /// Number of nodes ever allocated, detached ones included.
    pub fn node_count(&self) -> usize {
        self.arena.read().nodes.len()
    }

    // ─── Node data ──────────────────────────────────────────────────────

    #[inline]
    pub fn kind(&self, id: NodeId) -> ElementType {
        self.arena.read().node(id).kind
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.read().node(id).parent
    }

    #[inline]
    pub fn text_len(&self, id: NodeId) -> u32 {
        self.arena.read().node(id).text_len
    }

    /// Text of a token node.
    pub fn token_text(&self, id: NodeId) -> Option<Arc<str>> {
        match &self.arena.read().node(id).repr {
            Repr::Token(text) => Some(Arc::clone(text)),
            _ => None,
        }
    }

    /// Message of an `ERROR_ELEMENT` node.
    pub fn error_message(&self, id: NodeId) -> Option<Arc<str>> {
        match &self.arena.read().node(id).repr {
            Repr::Composite { error } => error.clone(),
            _ => None,
        }
    }

    pub fn is_token(&self, id: NodeId) -> bool {
        matches!(self.arena.read().node(id).repr, Repr::Token(_))
    }

    /// Whether the node is a lazy region (collapsed or expanded).
    pub fn is_lazy(&self, id: NodeId) -> bool {
        matches!(
            self.arena.read().node(id).repr,
            Repr::Collapsed(_) | Repr::Expanded
        )
    }

    pub fn is_collapsed(&self, id: NodeId) -> bool {
        matches!(self.arena.read().node(id).repr, Repr::Collapsed(_))
    }

    /// Raw text of a collapsed region.
    pub fn lazy_text(&self, id: NodeId) -> Option<Arc<str>> {
        match &self.arena.read().node(id).repr {
            Repr::Collapsed(text) => Some(Arc::clone(text)),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> String {
        let arena = self.arena.read();
        let mut out = String::with_capacity(arena.node(id).text_len as usize);
        arena.write_text(id, &mut out);
        out
    }

    /// Absolute byte range of the node, computed from sibling lengths.
    pub fn text_range(&self, id: NodeId) -> Span {
        let arena = self.arena.read();
        let mut offset = 0u32;
        let mut current = id;
        while let Some(parent) = arena.node(current).parent {
            for &sibling in &arena.node(parent).children {
                if sibling == current {
                    break;
                }
                offset += arena.node(sibling).text_len;
            }
            current = parent;
        }
        Span::at(offset, arena.node(id).text_len)
    }

    // ─── Lazy expansion ─────────────────────────────────────────────────

    /// Materialize the children of a collapsed region. No-op otherwise.
    pub fn ensure_expanded(&self, id: NodeId) {
        let (kind, text) = {
            let arena = self.arena.read();
            let node = arena.node(id);
            match &node.repr {
                Repr::Collapsed(text) => (node.kind, Arc::clone(text)),
                _ => return,
            }
        };

        let _span = tracing::debug_span!("expand_lazy", node = id.0, kind = ?kind).entered();
        let green = self.parser.parse_lazy(kind, &text, self.level);
        debug_assert_eq!(
            green.text_len() as usize,
            text.len(),
            "lazy parse of {kind:?} changed the text length"
        );

        let mut arena = self.arena.write();
        match &arena.node(id).repr {
            Repr::Collapsed(current) if Arc::ptr_eq(current, &text) => {}
            _ => {
                tracing::trace!(node = id.0, "concurrent expansion won; discarding result");
                return;
            }
        }
        let children: Children = green
            .children()
            .iter()
            .map(|child| arena.alloc(child, Some(id)))
            .collect();
        let node = arena.node_mut(id);
        node.children = children;
        node.repr = Repr::Expanded;
        tracing::debug!(node = id.0, children = node.children.len(), "lazy region expanded");
    }

    // ─── Navigation ─────────────────────────────────────────────────────

    /// Children in order, expanding a collapsed region first.
    pub fn children(&self, id: NodeId) -> Children {
        self.ensure_expanded(id);
        self.arena.read().node(id).children.clone()
    }

    /// Children without expanding; empty for a collapsed region.
    pub fn children_if_expanded(&self, id: NodeId) -> Children {
        self.arena.read().node(id).children.clone()
    }

    pub fn first_child_of_kind(&self, id: NodeId, kind: ElementType) -> Option<NodeId> {
        self.children(id)
            .into_iter()
            .find(|&child| self.kind(child) == kind)
    }

    pub fn last_child_of_kind(&self, id: NodeId, kind: ElementType) -> Option<NodeId> {
        self.children(id)
            .into_iter()
            .rev()
            .find(|&child| self.kind(child) == kind)
    }

    pub fn children_of_kind(&self, id: NodeId, kind: ElementType) -> Vec<NodeId> {
        self.children(id)
            .into_iter()
            .filter(|&child| self.kind(child) == kind)
            .collect()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let arena = self.arena.read();
        let parent = arena.node(id).parent?;
        arena.node(parent).children.iter().position(|&c| c == id)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let arena = self.arena.read();
        let parent = arena.node(id).parent?;
        let siblings = &arena.node(parent).children;
        let index = siblings.iter().position(|&c| c == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let arena = self.arena.read();
        let parent = arena.node(id).parent?;
        let siblings = &arena.node(parent).children;
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let arena = self.arena.read();
        let mut out = Vec::new();
        let mut current = arena.node(id).parent;
        while let Some(parent) = current {
            out.push(parent);
            current = arena.node(parent).parent;
        }
        out
    }

    /// Whether the parent chain of `id` reaches the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let arena = self.arena.read();
        if id.index() >= arena.nodes.len() {
            return false;
        }
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match arena.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// The deepest lazy region that strictly contains `range`, i.e. whose
    /// first and last bytes lie outside it. Collapsed regions are not
    /// expanded to look inside.
    pub fn innermost_lazy_containing(&self, range: Span) -> Option<(NodeId, Span)> {
        let arena = self.arena.read();
        let mut found = None;
        let mut current = self.root;
        let mut offset = 0u32;
        'descend: loop {
            let node = arena.node(current);
            let span = Span::at(offset, node.text_len);
            match node.repr {
                Repr::Collapsed(_) => {
                    return Some((current, span));
                }
                Repr::Expanded => found = Some((current, span)),
                Repr::Token(_) | Repr::Composite { .. } => {}
            }
            let mut child_offset = offset;
            for &child in &node.children {
                let len = arena.node(child).text_len;
                let child_span = Span::at(child_offset, len);
                if child_span.start < range.start && range.end < child_span.end {
                    current = child;
                    offset = child_offset;
                    continue 'descend;
                }
                child_offset += len;
            }
            return found;
        }
    }

    // ─── Mutation ───────────────────────────────────────────────────────

    /// Insert a copy of `element` as the `index`-th child of `parent`.
    pub fn insert_child(
        &self,
        parent: NodeId,
        index: usize,
        element: &GreenElement,
    ) -> Result<NodeId, TreeError> {
        self.ensure_expanded(parent);
        if !self.is_attached(parent) {
            return Err(TreeError::Detached(parent));
        }
        let id = {
            let mut arena = self.arena.write();
            if matches!(arena.node(parent).repr, Repr::Token(_)) {
                return Err(TreeError::NotComposite(parent));
            }
            let len = arena.node(parent).children.len();
            if index > len {
                return Err(TreeError::IndexOutOfBounds { index, len });
            }
            let id = ensure_sufficient_stack(|| arena.alloc(element, Some(parent)));
            arena.node_mut(parent).children.insert(index, id);
            arena.adjust_lengths(parent, i64::from(element.text_len()));
            id
        };
        tracing::trace!(parent = parent.0, index, kind = ?element.kind(), "child inserted");
        self.validate_after_mutation();
        Ok(id)
    }

    /// Detach `child` from its parent.
    pub fn remove_child(&self, child: NodeId) -> Result<(), TreeError> {
        if child == self.root {
            return Err(TreeError::Root);
        }
        if !self.is_attached(child) {
            return Err(TreeError::Detached(child));
        }
        {
            let mut arena = self.arena.write();
            let Some(parent) = arena.node(child).parent else {
                return Err(TreeError::Detached(child));
            };
            let len = i64::from(arena.node(child).text_len);
            arena.node_mut(parent).children.retain(|c| *c != child);
            arena.node_mut(child).parent = None;
            arena.adjust_lengths(parent, -len);
        }
        tracing::trace!(child = child.0, "child removed");
        self.validate_after_mutation();
        Ok(())
    }

    /// Replace `old` with a copy of `element`, returning the new node.
    pub fn replace_child(&self, old: NodeId, element: &GreenElement) -> Result<NodeId, TreeError> {
        if old == self.root {
            return Err(TreeError::Root);
        }
        if !self.is_attached(old) {
            return Err(TreeError::Detached(old));
        }
        let id = {
            let mut arena = self.arena.write();
            let Some(parent) = arena.node(old).parent else {
                return Err(TreeError::Detached(old));
            };
            let Some(index) = arena.node(parent).children.iter().position(|&c| c == old) else {
                return Err(TreeError::Detached(old));
            };
            let delta = i64::from(element.text_len()) - i64::from(arena.node(old).text_len);
            let id = ensure_sufficient_stack(|| arena.alloc(element, Some(parent)));
            arena.node_mut(parent).children[index] = id;
            arena.node_mut(old).parent = None;
            arena.adjust_lengths(parent, delta);
            id
        };
        tracing::trace!(old = old.0, new = id.0, "child replaced");
        self.validate_after_mutation();
        Ok(id)
    }

    /// Reset a lazy region to collapsed `text`, detaching any expanded
    /// children. The node keeps its id.
    pub fn replace_lazy_text(&self, id: NodeId, text: &str) -> Result<(), TreeError> {
        if !self.is_attached(id) {
            return Err(TreeError::Detached(id));
        }
        {
            let mut arena = self.arena.write();
            if !matches!(arena.node(id).repr, Repr::Collapsed(_) | Repr::Expanded) {
                return Err(TreeError::NotLazy(id));
            }
            let old_children = std::mem::take(&mut arena.node_mut(id).children);
            for child in old_children {
                arena.node_mut(child).parent = None;
            }
            let new_len = u32::try_from(text.len()).unwrap_or(u32::MAX);
            let delta = i64::from(new_len) - i64::from(arena.node(id).text_len);
            arena.node_mut(id).repr = Repr::Collapsed(Arc::from(text));
            arena.adjust_lengths(id, delta);
        }
        tracing::debug!(node = id.0, len = text.len(), "lazy region replaced");
        self.validate_after_mutation();
        Ok(())
    }

    /// Green copy of a subtree, with every lazy region collapsed again.
    pub fn copy_subtree(&self, id: NodeId) -> GreenElement {
        self.arena.read().to_green(id)
    }

    // ─── Invariants ─────────────────────────────────────────────────────

    /// Describe every structural invariant violation in the attached tree.
    ///
    /// Checked: children point back at their parent, composite lengths equal
    /// the sum of their children, token lengths equal their text.
    pub fn invariant_violations(&self) -> Vec<String> {
        let arena = self.arena.read();
        let mut violations = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = arena.node(id);
            match &node.repr {
                Repr::Token(text) | Repr::Collapsed(text) => {
                    if text.len() != node.text_len as usize {
                        violations.push(format!(
                            "{id:?} {:?}: text_len {} but text has {} bytes",
                            node.kind,
                            node.text_len,
                            text.len()
                        ));
                    }
                }
                Repr::Composite { .. } | Repr::Expanded => {
                    let mut sum = 0u64;
                    for &child in &node.children {
                        let child_node = arena.node(child);
                        if child_node.parent != Some(id) {
                            violations.push(format!(
                                "{child:?} listed under {id:?} but its parent is {:?}",
                                child_node.parent
                            ));
                        }
                        sum += u64::from(child_node.text_len);
                        stack.push(child);
                    }
                    if sum != u64::from(node.text_len) {
                        violations.push(format!(
                            "{id:?} {:?}: text_len {} but children sum to {sum}",
                            node.kind, node.text_len
                        ));
                    }
                }
            }
        }
        violations
    }

    fn validate_after_mutation(&self) {
        if !self.validate {
            return;
        }
        let violations = self.invariant_violations();
        if !violations.is_empty() {
            for violation in &violations {
                tracing::error!(%violation, "syntax tree invariant broken");
            }
            debug_assert!(false, "syntax tree invariants broken: {violations:?}");
        }
    }

    // ─── Debugging ──────────────────────────────────────────────────────

    /// Indented dump of the subtree, one node per line.
    ///
    /// Collapsed regions are printed as a single line; they are not expanded.
    pub fn debug_dump(&self, id: NodeId) -> String {
        let arena = self.arena.read();
        let mut out = String::new();
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            let node = arena.node(current);
            let indent = "  ".repeat(depth);
            let _ = match &node.repr {
                Repr::Token(text) => writeln!(out, "{indent}{:?}({text:?})", node.kind),
                Repr::Collapsed(_) => writeln!(out, "{indent}{:?} (collapsed)", node.kind),
                Repr::Composite { error: Some(message) } => {
                    writeln!(out, "{indent}{:?}: {message}", node.kind)
                }
                Repr::Composite { error: None } | Repr::Expanded => {
                    writeln!(out, "{indent}{:?}", node.kind)
                }
            };
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root)
            .field("nodes", &self.node_count())
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
