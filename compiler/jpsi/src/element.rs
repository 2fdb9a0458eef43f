//! PSI element handles.
//!
//! A [`PsiElement`] names one node of one file generation, backed either by
//! a stub or by a syntax tree node. Every accessor goes through
//! [`PsiElement::view`], which picks the backing to read:
//!
//! - no tree loaded yet: the stub
//! - tree loaded: the bound tree node, even for a stub-backed handle
//!
//! A handle is invalid when its file was reparsed (generation mismatch) or
//! its node was detached by an edit; accessors then fail with
//! [`PsiError::InvalidElement`].

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use jpsi_ir::{ElementType, Span};
use jpsi_stub::{StubId, StubTree};
use jpsi_tree::{ChildRole, GreenNode, NodeId, SyntaxTree};

use crate::class::PsiClass;
use crate::error::{PsiError, PsiResult};
use crate::field;
use crate::file::{FileAst, FileState, JavaFile};
use crate::manager::PsiManager;
use crate::types::PsiType;

use ElementType as T;

/// What a handle was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backing {
    Stub(StubId),
    Tree(NodeId),
}

/// The backing an accessor reads right now.
pub(crate) enum View {
    Stub(Arc<StubTree>, StubId),
    Tree(Arc<FileAst>, NodeId),
}

#[derive(Clone)]
pub struct PsiElement {
    file: Arc<JavaFile>,
    generation: u64,
    kind: ElementType,
    backing: Backing,
}

impl PsiElement {
    pub(crate) fn new(
        file: Arc<JavaFile>,
        generation: u64,
        kind: ElementType,
        backing: Backing,
    ) -> Self {
        PsiElement {
            file,
            generation,
            kind,
            backing,
        }
    }

    #[inline]
    pub fn kind(&self) -> ElementType {
        self.kind
    }

    #[inline]
    pub fn file(&self) -> &Arc<JavaFile> {
        &self.file
    }

    #[inline]
    pub fn backing(&self) -> Backing {
        self.backing
    }

    pub fn manager(&self) -> &Arc<PsiManager> {
        self.file.manager()
    }

    pub(crate) fn invalid(&self) -> PsiError {
        PsiError::InvalidElement {
            kind: self.kind,
            key: format!(
                "{:?} in {} generation {}",
                self.backing,
                self.file.name(),
                self.generation
            ),
        }
    }

    pub(crate) fn state(&self) -> PsiResult<Arc<FileState>> {
        let state = self.file.current_state();
        if state.generation == self.generation {
            Ok(state)
        } else {
            Err(self.invalid())
        }
    }

    fn resolve_node(&self, ast: &FileAst) -> PsiResult<NodeId> {
        let node = match self.backing {
            Backing::Stub(id) => ast.node_for_stub(id).ok_or_else(|| self.invalid())?,
            Backing::Tree(node) => node,
        };
        if ast.tree.is_attached(node) && ast.tree.kind(node) == self.kind {
            Ok(node)
        } else {
            Err(self.invalid())
        }
    }

    pub(crate) fn view(&self) -> PsiResult<View> {
        let state = self.state()?;
        if let Some(ast) = state.loaded_ast() {
            let node = self.resolve_node(ast)?;
            return Ok(View::Tree(Arc::clone(ast), node));
        }
        match self.backing {
            Backing::Stub(id) => {
                let stubs = state.stubs.clone().ok_or(PsiError::NoStubTree)?;
                Ok(View::Stub(stubs, id))
            }
            Backing::Tree(_) => Err(self.invalid()),
        }
    }

    /// Load the file's tree if needed and return this element's node.
    pub(crate) fn tree_view(&self) -> PsiResult<(Arc<FileAst>, NodeId)> {
        let state = self.state()?;
        let ast = self.file.load_ast(&state)?;
        let node = self.resolve_node(&ast)?;
        Ok((ast, node))
    }

    /// Answer from whichever backing [`view`](Self::view) picks.
    pub(crate) fn read<R>(
        &self,
        from_stub: impl FnOnce(&StubTree, StubId) -> PsiResult<R>,
        from_tree: impl FnOnce(&SyntaxTree, NodeId) -> PsiResult<R>,
    ) -> PsiResult<R> {
        match self.view()? {
            View::Stub(stubs, id) => from_stub(&stubs, id),
            View::Tree(ast, node) => from_tree(&ast.tree, node),
        }
    }

    /// Answer from the tree, loading it first.
    pub(crate) fn read_tree<R>(&self, f: impl FnOnce(&SyntaxTree, NodeId) -> R) -> PsiResult<R> {
        let (ast, node) = self.tree_view()?;
        Ok(f(&ast.tree, node))
    }

    pub(crate) fn stub_element(&self, stubs: &StubTree, id: StubId) -> PsiElement {
        PsiElement::new(
            Arc::clone(&self.file),
            self.generation,
            stubs.kind(id),
            Backing::Stub(id),
        )
    }

    pub(crate) fn tree_element(&self, tree: &SyntaxTree, node: NodeId) -> PsiElement {
        PsiElement::new(
            Arc::clone(&self.file),
            self.generation,
            tree.kind(node),
            Backing::Tree(node),
        )
    }

    /// Another handle into the same file generation.
    pub(crate) fn handle(&self, kind: ElementType, backing: Backing) -> PsiElement {
        PsiElement::new(Arc::clone(&self.file), self.generation, kind, backing)
    }

    /// Entries of the child reference list of `kind` (`extends`, `throws`,
    /// ...), empty when there is none.
    pub(crate) fn reference_list(&self, kind: ElementType) -> PsiResult<Vec<String>> {
        self.read(
            |stubs, id| {
                Ok(stubs
                    .child_of_kind(id, kind)
                    .map(|list| stubs.get(list).reference_texts().to_vec())
                    .unwrap_or_default())
            },
            |tree, node| {
                Ok(tree
                    .first_child_of_kind(node, kind)
                    .map(|list| jpsi_stub::extract::reference_texts(tree, &list))
                    .unwrap_or_default())
            },
        )
    }

    /// Parsed declared type, cached per element until the next change.
    pub(crate) fn cached_type(
        &self,
        type_text: impl FnOnce() -> PsiResult<Option<String>>,
    ) -> PsiResult<Option<Arc<PsiType>>> {
        let state = self.state()?;
        let stamp = self.manager().modification_count();
        let key = self.cache_key();
        if let Some(ty) = state.types.get(stamp, &key) {
            return Ok(Some(ty));
        }
        let Some(text) = type_text()? else {
            return Ok(None);
        };
        Ok(Some(state.types.insert(stamp, key, Arc::new(PsiType::parse(&text)))))
    }

    /// Key for per-element caches. Bound nodes are keyed by their stub, so
    /// the key does not change when the tree is loaded.
    pub(crate) fn cache_key(&self) -> Backing {
        match self.backing {
            Backing::Tree(node) => self
                .state()
                .ok()
                .and_then(|state| state.loaded_ast().and_then(|ast| ast.stub_for_node(node)))
                .map_or(self.backing, Backing::Stub),
            Backing::Stub(_) => self.backing,
        }
    }

    /// Identity that survives the stub-to-AST switch: a stub-backed handle
    /// whose stub is bound is identified by the bound node.
    pub(crate) fn identity(&self) -> Backing {
        if let Backing::Stub(id) = self.backing {
            let bound = self
                .state()
                .ok()
                .and_then(|state| state.loaded_ast().and_then(|ast| ast.node_for_stub(id)));
            if let Some(node) = bound {
                return Backing::Tree(node);
            }
        }
        self.backing
    }

    // ─── State ──────────────────────────────────────────────────────────

    pub fn is_valid(&self) -> bool {
        self.view().is_ok()
    }

    /// Whether accessors currently answer from the stub.
    pub fn is_stub_based(&self) -> bool {
        matches!(self.view(), Ok(View::Stub(..)))
    }

    /// The syntax tree node, loading the tree if needed.
    pub fn node(&self) -> PsiResult<NodeId> {
        self.tree_view().map(|(_, node)| node)
    }

    pub fn text(&self) -> PsiResult<String> {
        self.read_tree(|tree, node| tree.text(node))
    }

    pub fn text_range(&self) -> PsiResult<Span> {
        self.read_tree(|tree, node| tree.text_range(node))
    }

    // ─── Navigation ─────────────────────────────────────────────────────

    /// Syntactic parent; for stub-based elements the parent stub.
    pub fn parent(&self) -> PsiResult<Option<PsiElement>> {
        self.read(
            |stubs, id| Ok(stubs.parent(id).map(|p| self.stub_element(stubs, p))),
            |tree, node| Ok(tree.parent(node).map(|p| self.tree_element(tree, p))),
        )
    }

    /// Every child in the tree, tokens included, expanding lazy regions.
    pub fn children(&self) -> PsiResult<Vec<PsiElement>> {
        self.read_tree(|tree, node| {
            tree.children(node)
                .into_iter()
                .map(|child| self.tree_element(tree, child))
                .collect()
        })
    }

    /// Children of the given kinds, from the stub when possible.
    pub(crate) fn child_elements(&self, kinds: &[ElementType]) -> PsiResult<Vec<PsiElement>> {
        self.read(
            |stubs, id| {
                Ok(stubs
                    .children(id)
                    .iter()
                    .filter(|&&c| kinds.contains(&stubs.kind(c)))
                    .map(|&c| self.stub_element(stubs, c))
                    .collect())
            },
            |tree, node| {
                Ok(tree
                    .children(node)
                    .into_iter()
                    .filter(|&c| kinds.contains(&tree.kind(c)))
                    .map(|c| self.tree_element(tree, c))
                    .collect())
            },
        )
    }

    pub(crate) fn first_child_element(&self, kind: ElementType) -> PsiResult<Option<PsiElement>> {
        Ok(self.child_elements(&[kind])?.into_iter().next())
    }

    pub fn find_child_by_role(&self, role: ChildRole) -> PsiResult<Option<PsiElement>> {
        self.read_tree(|tree, node| {
            tree.find_child_by_role(node, role)
                .map(|child| self.tree_element(tree, child))
        })
    }

    /// Nearest strict ancestor whose kind satisfies `pred`.
    pub fn ancestor_where(
        &self,
        pred: impl Fn(ElementType) -> bool,
    ) -> PsiResult<Option<PsiElement>> {
        self.read(
            |stubs, id| {
                Ok(stubs
                    .ancestor_where(id, &pred)
                    .map(|a| self.stub_element(stubs, a)))
            },
            |tree, node| {
                Ok(tree
                    .ancestors(node)
                    .into_iter()
                    .find(|&a| pred(tree.kind(a)))
                    .map(|a| self.tree_element(tree, a)))
            },
        )
    }

    /// Class (named, anonymous or enum constant body) around this element.
    pub fn containing_class(&self) -> PsiResult<Option<PsiClass>> {
        Ok(self
            .ancestor_where(ElementType::is_class)?
            .and_then(PsiClass::cast))
    }

    // ─── Copies and edits ───────────────────────────────────────────────

    /// A detached copy in a new non-physical file. Lazy regions of the copy
    /// are collapsed again and its caches start empty.
    pub fn copy(&self) -> PsiResult<PsiElement> {
        let green = self.read_tree(|tree, node| tree.copy_subtree(node))?;
        let root = Arc::new(GreenNode::new(T::File, vec![green]));
        let name = format!("{} (copy)", self.file.name());
        let file = JavaFile::detached(Arc::clone(self.manager()), name, root);
        let copy = file.root().children()?.into_iter().next();
        copy.ok_or_else(|| self.invalid())
    }

    /// Remove the element from its parent.
    ///
    /// A field of a multi-field declaration (`int a, b;`) takes the whole
    /// declaration with it, since its fields share one type and modifier
    /// list.
    pub fn delete(&self) -> PsiResult<()> {
        let state = self.state()?;
        let (ast, node) = self.tree_view()?;
        let tree = &ast.tree;
        let parent = tree.parent(node).ok_or_else(|| self.invalid())?;
        let doomed = if self.kind == T::Field {
            field::declaration_nodes(tree, node)
        } else {
            vec![node]
        };
        for doomed_node in doomed {
            tree.remove_child(doomed_node).map_err(|_| self.invalid())?;
        }
        self.file.subtree_changed(&state, &ast, parent, true);
        Ok(())
    }

    /// Indented dump of the element's subtree without expanding lazy
    /// regions.
    pub fn debug_dump(&self) -> PsiResult<String> {
        self.read_tree(|tree, node| tree.debug_dump(node))
    }
}

impl PartialEq for PsiElement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.file, &other.file)
            && self.generation == other.generation
            && self.kind == other.kind
            && self.identity() == other.identity()
    }
}

impl Eq for PsiElement {}

impl Hash for PsiElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.file).hash(state);
        self.generation.hash(state);
        self.kind.hash(state);
    }
}

impl std::fmt::Debug for PsiElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}({:?} in {}#{})",
            self.kind,
            self.backing,
            self.file.name(),
            self.generation
        )
    }
}

#[cfg(test)]
mod tests;
