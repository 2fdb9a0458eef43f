//! The stub tree: a flat arena of declaration summaries.
//!
//! Nodes are stored in pre-order, so a node's id is its pre-order index and
//! every parent id is smaller than its children's. Parents own their child
//! id lists; the parent link is a plain id, never a second owner.

use std::fmt::Write as _;

use jpsi_ir::ElementType;
use smallvec::SmallVec;

use crate::flags::StubFlags;

/// Index of a stub in its [`StubTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StubId(u32);

impl StubId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        StubId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for StubId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Summary of one declaration.
///
/// `texts` is laid out per kind:
///
/// | Kind                                | `texts`                                  |
/// |-------------------------------------|------------------------------------------|
/// | `JAVA_FILE`                         | `[package]` (empty without a package)    |
/// | `CLASS`                             | `[qualified name]`, absent when local     |
/// | `ANONYMOUS_CLASS`                   | `[base class reference]`                  |
/// | `METHOD`                            | `[return type]` (empty for constructors)  |
/// | `ANNOTATION_METHOD`                 | `[return type, default value?]`           |
/// | `FIELD`                             | `[type, initializer?]`                    |
/// | `ENUM_CONSTANT`                     | `[enum name]`                             |
/// | `PARAMETER`, `RECORD_COMPONENT`     | `[type]`                                  |
/// | `ANNOTATION`                        | `[reference, full text]`                  |
/// | `IMPORT_*STATEMENT`                 | `[reference]` (with `.*` when on demand)  |
/// | reference lists                     | one entry per reference                   |
///
/// Type and expression texts are stored normalized: no whitespace or
/// comments, see [`jpsi_tree::normalized_text`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StubNode {
    kind: ElementType,
    parent: Option<StubId>,
    children: SmallVec<[StubId; 4]>,
    flags: StubFlags,
    name: Option<String>,
    texts: Vec<String>,
}

/// Stored in place of a field initializer longer than the configured limit.
pub const INITIALIZER_TOO_LONG: &str = ";INITIALIZER_TOO_LONG;";

impl StubNode {
    pub fn new(kind: ElementType) -> Self {
        StubNode {
            kind,
            parent: None,
            children: SmallVec::new(),
            flags: StubFlags::empty(),
            name: None,
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: StubFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn with_texts(mut self, texts: Vec<String>) -> Self {
        self.texts = texts;
        self
    }

    #[inline]
    pub fn kind(&self) -> ElementType {
        self.kind
    }

    #[inline]
    pub fn parent(&self) -> Option<StubId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[StubId] {
        &self.children
    }

    #[inline]
    pub fn flags(&self) -> StubFlags {
        self.flags
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    fn text(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(String::as_str)
    }

    // ─── Per-kind views of `texts` ──────────────────────────────────────

    /// Declared type of a field, parameter, component, or method return.
    pub fn type_text(&self) -> Option<&str> {
        match self.kind {
            ElementType::Field
            | ElementType::Parameter
            | ElementType::RecordComponent
            | ElementType::EnumConstant => self.text(0),
            ElementType::Method | ElementType::AnnotationMethod => {
                self.text(0).filter(|t| !t.is_empty())
            }
            _ => None,
        }
    }

    /// Field initializer, possibly [`INITIALIZER_TOO_LONG`].
    pub fn initializer_text(&self) -> Option<&str> {
        match self.kind {
            ElementType::Field => self.text(1),
            _ => None,
        }
    }

    /// `default` value of an annotation method.
    pub fn default_value_text(&self) -> Option<&str> {
        match self.kind {
            ElementType::AnnotationMethod => self.text(1),
            _ => None,
        }
    }

    pub fn qualified_name(&self) -> Option<&str> {
        match self.kind {
            ElementType::Class => self.text(0),
            _ => None,
        }
    }

    pub fn base_class_reference(&self) -> Option<&str> {
        match self.kind {
            ElementType::AnonymousClass => self.text(0),
            _ => None,
        }
    }

    pub fn package_name(&self) -> Option<&str> {
        match self.kind {
            ElementType::File => self.text(0).filter(|t| !t.is_empty()),
            _ => None,
        }
    }

    /// Reference of an import or annotation.
    pub fn reference_text(&self) -> Option<&str> {
        match self.kind {
            ElementType::ImportStatement
            | ElementType::ImportStaticStatement
            | ElementType::Annotation => self.text(0),
            _ => None,
        }
    }

    /// Entries of an `extends`, `implements`, `throws`, `permits` or bound list.
    pub fn reference_texts(&self) -> &[String] {
        if self.kind.is_reference_list() {
            &self.texts
        } else {
            &[]
        }
    }
}

/// A file's stubs in pre-order; the root is always the `JAVA_FILE` stub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StubTree {
    nodes: Vec<StubNode>,
}

impl StubTree {
    /// A tree holding only `root`.
    pub fn new(root: StubNode) -> Self {
        let mut root = root;
        root.parent = None;
        root.children.clear();
        StubTree { nodes: vec![root] }
    }

    #[inline]
    pub fn root(&self) -> StubId {
        StubId(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// Appending keeps ids in pre-order as long as `parent` is on the
    /// current path, which is how the builder and the decoder add nodes.
    pub fn push(&mut self, parent: StubId, mut node: StubNode) -> StubId {
        debug_assert!(parent.index() < self.nodes.len(), "unknown parent {parent:?}");
        let id = StubId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Get a stub. Ids come from this tree, so indexing cannot fail.
    #[inline]
    pub fn get(&self, id: StubId) -> &StubNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: StubId) -> ElementType {
        self.get(id).kind
    }

    #[inline]
    pub fn parent(&self, id: StubId) -> Option<StubId> {
        self.get(id).parent
    }

    #[inline]
    pub fn children(&self, id: StubId) -> &[StubId] {
        &self.get(id).children
    }

    pub fn children_of_kind(
        &self,
        id: StubId,
        kind: ElementType,
    ) -> impl Iterator<Item = StubId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.kind(c) == kind)
    }

    pub fn child_of_kind(&self, id: StubId, kind: ElementType) -> Option<StubId> {
        self.children_of_kind(id, kind).next()
    }

    /// Sibling immediately before `id` under the same parent.
    pub fn prev_sibling(&self, id: StubId) -> Option<StubId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Every stub in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (StubId, &StubNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (StubId(u32::try_from(i).unwrap_or(u32::MAX)), node))
    }

    /// Nearest strict ancestor whose kind satisfies `pred`.
    pub fn ancestor_where(
        &self,
        id: StubId,
        pred: impl Fn(ElementType) -> bool,
    ) -> Option<StubId> {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if pred(self.kind(parent)) {
                return Some(parent);
            }
            current = self.parent(parent);
        }
        None
    }

    /// Indented dump, one stub per line: `KIND name [flags] texts`.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.get(id);
            let _ = write!(out, "{}{:?}", "  ".repeat(depth), node.kind);
            if let Some(name) = &node.name {
                let _ = write!(out, " {name}");
            }
            if !node.flags.is_empty() {
                let _ = write!(out, " {:?}", node.flags);
            }
            if !node.texts.is_empty() {
                let _ = write!(out, " {:?}", node.texts);
            }
            out.push('\n');
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

mod size_asserts {
    use super::StubId;
    jpsi_ir::static_assert_size!(StubId, 4);
}
