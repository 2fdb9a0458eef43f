//! Java files and the stub-to-AST switch.
//!
//! A file starts out *stub-only*: it keeps the green tree from parsing and
//! the stub tree built from it, and answers declaration queries from stubs.
//! The first query that needs more detail loads the syntax tree
//! ([`JavaFile::ensure_ast_loaded`]) and binds every stub to the node it was
//! built from. From then on the tree is authoritative: stub-backed handles
//! are resolved to their bound node, new handles are tree-backed, and the
//! stub tree is only consulted again through [`JavaFile::stub_tree`], which
//! rebuilds it from the tree after structural edits.
//!
//! Parsing the whole file again (an edit that cannot be confined to one
//! lazily parsed block) installs a new [`FileState`] under a new generation
//! and leaves every existing handle invalid.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use jpsi_ir::{ElementType, Span, TextEdit};
use jpsi_parse::{is_single_balanced_block, parse_file, SyntaxError};
use jpsi_stub::{
    build_stub_tree, is_stub_free_text, serialize_stub_tree, visit_stub_nodes, StubId, StubTree,
    StubVisitor,
};
use jpsi_tree::{GreenAst, GreenElement, GreenNode, NodeId, SyntaxTree, WalkAction, Walker};
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::cache::{CachedValue, StampedMap};
use crate::class::inner_cache::ClassInnerStuffCache;
use crate::class::PsiClass;
use crate::element::{Backing, PsiElement};
use crate::error::{PsiError, PsiResult};
use crate::manager::PsiManager;
use crate::types::PsiType;

use ElementType as T;

/// How [`JavaFile::apply_text_change`] absorbed an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reparse {
    /// Only the innermost lazily parsed block around the edit was replaced.
    Block,
    /// The whole file was parsed again; earlier handles are invalid.
    File,
}

/// One import of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportInfo {
    /// Imported reference, ending in `.*` for on-demand imports.
    pub reference: String,
    pub is_static: bool,
    pub on_demand: bool,
}

/// A syntax error found in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorElement {
    pub range: Span,
    pub message: String,
}

/// The loaded syntax tree of a file plus its stub binding.
pub(crate) struct FileAst {
    pub(crate) tree: SyntaxTree,
    /// Bound node of each stub, indexed by stub id.
    stub_nodes: Vec<NodeId>,
    node_stubs: FxHashMap<NodeId, StubId>,
}

impl FileAst {
    /// Bind `stubs` to the stub-worthy nodes of `tree`, in pre-order.
    fn bind(tree: SyntaxTree, stubs: Option<&StubTree>) -> PsiResult<Self> {
        let Some(stubs) = stubs else {
            return Ok(FileAst {
                tree,
                stub_nodes: Vec::new(),
                node_stubs: FxHashMap::default(),
            });
        };
        let mut binder = Binder::default();
        visit_stub_nodes(&tree, &mut binder);
        let kinds_agree = binder.nodes.len() == stubs.len()
            && binder
                .nodes
                .iter()
                .zip(stubs.iter())
                .all(|(&(_, kind), (_, stub))| kind == stub.kind());
        if !kinds_agree {
            return Err(PsiError::StubAstMismatch {
                stubs: stubs.len(),
                nodes: binder.nodes.len(),
            });
        }
        let stub_nodes: Vec<NodeId> = binder.nodes.into_iter().map(|(node, _)| node).collect();
        let node_stubs = stub_nodes
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, StubId::from_raw(u32::try_from(i).unwrap_or(u32::MAX))))
            .collect();
        Ok(FileAst {
            tree,
            stub_nodes,
            node_stubs,
        })
    }

    pub(crate) fn node_for_stub(&self, id: StubId) -> Option<NodeId> {
        self.stub_nodes.get(id.index()).copied()
    }

    pub(crate) fn stub_for_node(&self, node: NodeId) -> Option<StubId> {
        self.node_stubs.get(&node).copied()
    }
}

#[derive(Default)]
struct Binder {
    nodes: Vec<(NodeId, ElementType)>,
}

impl StubVisitor<SyntaxTree> for Binder {
    fn enter(&mut self, _ast: &SyntaxTree, node: &NodeId, kind: ElementType, _: Option<&NodeId>) {
        self.nodes.push((*node, kind));
    }
}

/// Everything derived from one parse of a file.
pub(crate) struct FileState {
    pub(crate) generation: u64,
    green: Arc<GreenNode>,
    parse_errors: Vec<SyntaxError>,
    /// Stubs as built from `green` (or read from an index).
    pub(crate) stubs: Option<Arc<StubTree>>,
    ast: OnceLock<Arc<FileAst>>,
    stubs_stale: AtomicBool,
    rebuilt_stubs: CachedValue<StubTree>,
    class_caches: Mutex<FxHashMap<Backing, Arc<ClassInnerStuffCache>>>,
    pub(crate) types: StampedMap<Backing, Arc<PsiType>>,
}

impl FileState {
    fn new(generation: u64, green: Arc<GreenNode>, parse_errors: Vec<SyntaxError>) -> Self {
        FileState {
            generation,
            green,
            parse_errors,
            stubs: None,
            ast: OnceLock::new(),
            stubs_stale: AtomicBool::new(false),
            rebuilt_stubs: CachedValue::new(),
            class_caches: Mutex::new(FxHashMap::default()),
            types: StampedMap::new(),
        }
    }

    pub(crate) fn loaded_ast(&self) -> Option<&Arc<FileAst>> {
        self.ast.get()
    }

    fn mark_stubs_stale(&self) {
        self.stubs_stale.store(true, Ordering::Release);
    }
}

/// A Java source file.
pub struct JavaFile {
    manager: Arc<PsiManager>,
    name: String,
    physical: bool,
    state: RwLock<Arc<FileState>>,
}

impl JavaFile {
    pub(crate) fn parse(manager: Arc<PsiManager>, name: String, text: &str) -> Arc<Self> {
        let mut state = Self::parse_state(&manager, 0, text);
        state.stubs = Some(Arc::new(Self::build_stubs(&manager, &state.green)));
        Arc::new(JavaFile {
            manager,
            name,
            physical: true,
            state: RwLock::new(Arc::new(state)),
        })
    }

    pub(crate) fn with_stubs(
        manager: Arc<PsiManager>,
        name: String,
        text: &str,
        stubs: StubTree,
    ) -> Arc<Self> {
        let mut state = Self::parse_state(&manager, 0, text);
        state.stubs = Some(Arc::new(stubs));
        Arc::new(JavaFile {
            manager,
            name,
            physical: true,
            state: RwLock::new(Arc::new(state)),
        })
    }

    /// A file holding a detached copy; it has no stubs and its tree is
    /// loaded from the start.
    pub(crate) fn detached(manager: Arc<PsiManager>, name: String, root: Arc<GreenNode>) -> Arc<Self> {
        let config = manager.config();
        let tree = SyntaxTree::new(
            &root,
            config.language_level,
            manager.lazy_parser(),
            config.validate_trees,
        );
        let state = FileState::new(0, root, Vec::new());
        if let Ok(ast) = FileAst::bind(tree, None) {
            let _ = state.ast.set(Arc::new(ast));
        }
        Arc::new(JavaFile {
            manager,
            name,
            physical: false,
            state: RwLock::new(Arc::new(state)),
        })
    }

    fn build_stubs(manager: &PsiManager, green: &Arc<GreenNode>) -> StubTree {
        let ast = GreenAst::new(
            GreenElement::Node(Arc::clone(green)),
            manager.lazy_parser(),
            manager.config().language_level,
        );
        build_stub_tree(&ast, manager.config().stub_options())
    }

    fn parse_state(manager: &PsiManager, generation: u64, text: &str) -> FileState {
        let parse = parse_file(text, manager.config().language_level);
        let errors = parse.errors().to_vec();
        FileState::new(generation, parse.into_green(), errors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manager(&self) -> &Arc<PsiManager> {
        &self.manager
    }

    /// `false` for detached copies.
    pub fn is_physical(&self) -> bool {
        self.physical
    }

    /// Bumped by every whole-file reparse.
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    pub(crate) fn current_state(&self) -> Arc<FileState> {
        Arc::clone(&self.state.read())
    }

    pub fn is_ast_loaded(&self) -> bool {
        self.current_state().loaded_ast().is_some()
    }

    /// Current text: the tree's when loaded (it reflects edits), otherwise
    /// the parsed text.
    pub fn text(&self) -> String {
        let state = self.current_state();
        match state.loaded_ast() {
            Some(ast) => ast.tree.text(ast.tree.root()),
            None => state.green.text(),
        }
    }

    /// Errors found by the last whole-file parse. Bodies that were never
    /// parsed contribute nothing; see [`JavaFile::error_elements`].
    pub fn parse_errors(&self) -> Vec<SyntaxError> {
        self.current_state().parse_errors.clone()
    }

    // ─── Stub-to-AST switch ─────────────────────────────────────────────

    /// Load and bind the syntax tree if that has not happened yet.
    pub fn ensure_ast_loaded(&self) -> PsiResult<()> {
        let state = self.current_state();
        self.load_ast(&state).map(|_| ())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.name, generation = state.generation))]
    pub(crate) fn load_ast(&self, state: &FileState) -> PsiResult<Arc<FileAst>> {
        if let Some(ast) = state.loaded_ast() {
            return Ok(Arc::clone(ast));
        }
        let config = self.manager.config();
        let tree = SyntaxTree::new(
            &state.green,
            config.language_level,
            self.manager.lazy_parser(),
            config.validate_trees,
        );
        let ast = Arc::new(FileAst::bind(tree, state.stubs.as_deref())?);
        debug!(
            nodes = ast.tree.node_count(),
            bound = ast.stub_nodes.len(),
            "switched from stubs to the syntax tree"
        );
        // A racing loader may have published first; its tree wins.
        Ok(Arc::clone(state.ast.get_or_init(|| ast)))
    }

    // ─── Stubs ──────────────────────────────────────────────────────────

    /// The stub tree of the file's current content.
    ///
    /// After structural edits the stubs built at parse time are stale and
    /// are rebuilt from the syntax tree, once per modification stamp.
    pub fn stub_tree(&self) -> PsiResult<Arc<StubTree>> {
        let state = self.current_state();
        let stubs = state.stubs.clone().ok_or(PsiError::NoStubTree)?;
        if !state.stubs_stale.load(Ordering::Acquire) {
            return Ok(stubs);
        }
        let ast = self.load_ast(&state)?;
        let stamp = self.manager.modification_count();
        Ok(state.rebuilt_stubs.get_or_compute(stamp, || {
            warn!(file = %self.name, stamp, "stub tree is stale; rebuilding from the syntax tree");
            build_stub_tree(&ast.tree, self.manager.config().stub_options())
        }))
    }

    /// The current stub tree in its binary form.
    pub fn serialized_stubs(&self) -> PsiResult<Vec<u8>> {
        let stubs = self.stub_tree()?;
        Ok(serialize_stub_tree(&stubs)?)
    }

    // ─── Navigation ─────────────────────────────────────────────────────

    /// The file element: stub-backed until the tree is loaded.
    pub fn root(self: &Arc<Self>) -> PsiElement {
        let state = self.current_state();
        let backing = match (state.loaded_ast(), &state.stubs) {
            (Some(ast), _) => Backing::Tree(ast.tree.root()),
            (None, Some(stubs)) => Backing::Stub(stubs.root()),
            // Files without stubs are created with their tree loaded.
            (None, None) => Backing::Stub(StubId::from_raw(0)),
        };
        let kind = state.green.kind();
        PsiElement::new(Arc::clone(self), state.generation, kind, backing)
    }

    /// Top-level classes in source order.
    pub fn classes(self: &Arc<Self>) -> PsiResult<Vec<PsiClass>> {
        Ok(self
            .root()
            .child_elements(&[T::Class])?
            .into_iter()
            .filter_map(PsiClass::cast)
            .collect())
    }

    pub fn package_name(self: &Arc<Self>) -> PsiResult<Option<String>> {
        let root = self.root();
        root.read(
            |stubs, id| Ok(stubs.get(id).package_name().map(str::to_owned)),
            |tree, node| Ok(jpsi_stub::extract::package_name(tree, &node)),
        )
    }

    pub fn imports(self: &Arc<Self>) -> PsiResult<Vec<ImportInfo>> {
        let root = self.root();
        let Some(list) = root.child_elements(&[T::ImportList])?.into_iter().next() else {
            return Ok(Vec::new());
        };
        list.child_elements(&[T::ImportStatement, T::ImportStaticStatement])?
            .iter()
            .map(|import| {
                let is_static = import.kind() == T::ImportStaticStatement;
                import.read(
                    |stubs, id| {
                        let stub = stubs.get(id);
                        Ok(ImportInfo {
                            reference: stub.reference_text().unwrap_or_default().to_owned(),
                            is_static,
                            on_demand: stub.flags().contains(jpsi_stub::StubFlags::ON_DEMAND),
                        })
                    },
                    |tree, node| {
                        let (reference, on_demand) =
                            jpsi_stub::extract::import_reference(tree, &node);
                        Ok(ImportInfo {
                            reference,
                            is_static,
                            on_demand,
                        })
                    },
                )
            })
            .collect()
    }

    /// Find a class of this file by qualified name.
    pub fn find_class(self: &Arc<Self>, qualified_name: &str) -> PsiResult<Option<PsiClass>> {
        let mut candidates = self.classes()?;
        while let Some(class) = candidates.pop() {
            let Some(name) = class.qualified_name()? else {
                continue;
            };
            if name == qualified_name {
                return Ok(Some(class));
            }
            if qualified_name.starts_with(&name)
                && qualified_name.as_bytes().get(name.len()) == Some(&b'.')
            {
                candidates.extend(class.own_inner_classes()?.iter().cloned());
            }
        }
        Ok(None)
    }

    /// Every `ERROR_ELEMENT` in the file, parsing all bodies.
    ///
    /// Polls the manager's cancellation token between nodes.
    pub fn error_elements(&self) -> PsiResult<Vec<ErrorElement>> {
        let state = self.current_state();
        let ast = self.load_ast(&state)?;
        let tree = &ast.tree;
        let mut errors = Vec::new();
        Walker::new(tree)
            .with_cancellation(self.manager.cancellation())
            .walk(tree.root(), |node| {
                if tree.kind(node) == T::ErrorElement {
                    errors.push(ErrorElement {
                        range: tree.text_range(node),
                        message: tree
                            .error_message(node)
                            .map(|m| m.to_string())
                            .unwrap_or_default(),
                    });
                }
                WalkAction::Continue
            });
        Ok(errors)
    }

    /// Indented dump of the syntax tree; with `expand`, every lazy region is
    /// parsed first.
    pub fn debug_tree(&self, expand: bool) -> PsiResult<String> {
        let state = self.current_state();
        let ast = self.load_ast(&state)?;
        let tree = &ast.tree;
        if expand {
            Walker::new(tree)
                .with_cancellation(self.manager.cancellation())
                .walk(tree.root(), |_| WalkAction::Continue);
        }
        Ok(tree.debug_dump(tree.root()))
    }

    // ─── Caches ─────────────────────────────────────────────────────────

    pub(crate) fn class_cache(state: &FileState, key: Backing) -> Arc<ClassInnerStuffCache> {
        Arc::clone(state.class_caches.lock().entry(key).or_default())
    }

    // ─── Edits ──────────────────────────────────────────────────────────

    /// Propagate a structural change at `changed` up to the file root:
    /// drop the inner-stuff caches of every enclosing class and bump the
    /// modification stamp. With `stubs_affected` the parse-time stub tree
    /// is marked stale.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.name, node = ?changed))]
    pub(crate) fn subtree_changed(
        &self,
        state: &FileState,
        ast: &FileAst,
        changed: NodeId,
        stubs_affected: bool,
    ) {
        let mut cleared = 0usize;
        {
            let mut caches = state.class_caches.lock();
            for node in std::iter::once(changed).chain(ast.tree.ancestors(changed)) {
                if !ast.tree.kind(node).is_class() {
                    continue;
                }
                let by_node = caches.remove(&Backing::Tree(node)).is_some();
                let by_stub = ast
                    .stub_for_node(node)
                    .is_some_and(|stub| caches.remove(&Backing::Stub(stub)).is_some());
                if by_node || by_stub {
                    cleared += 1;
                }
            }
            let before = caches.len();
            caches.retain(|key, _| {
                let node = match *key {
                    Backing::Tree(node) => Some(node),
                    Backing::Stub(stub) => ast.node_for_stub(stub),
                };
                match node {
                    Some(node) => ast.tree.is_attached(node),
                    None => true,
                }
            });
            trace!(evicted = before - caches.len(), "dropped caches of detached classes");
        }
        if stubs_affected {
            state.mark_stubs_stale();
        }
        let stamp = self.manager.modification_tracker().increment();
        debug!(cleared, stamp, "subtree change propagated");
    }

    /// Apply a document edit.
    ///
    /// When the edit lies strictly inside a lazily parsed block and the
    /// block stays one balanced `{ ... }`, only that block is replaced (and
    /// re-collapsed); handles outside it stay valid. The stub tree is kept
    /// when the block was and remains free of stub-worthy declarations.
    /// Otherwise the file is parsed again.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.name, range = ?edit.range))]
    pub fn apply_text_change(&self, edit: &TextEdit) -> PsiResult<Reparse> {
        let state = self.current_state();
        let ast = self.load_ast(&state)?;
        let tree = &ast.tree;
        let old_text = tree.text(tree.root());
        let Some(new_text) = edit.apply(&old_text) else {
            return Err(PsiError::InvalidEdit {
                range: edit.range,
                len: old_text.len(),
            });
        };

        if let Some((block, span)) = tree.innermost_lazy_containing(edit.range) {
            if edit.is_strictly_inside(span) {
                let old_block = tree.text(block);
                let local = TextEdit::new(
                    Span::new(edit.range.start - span.start, edit.range.end - span.start),
                    edit.new_text.clone(),
                );
                if let Some(new_block) = local.apply(&old_block) {
                    if is_single_balanced_block(&new_block) {
                        let keeps_stubs =
                            is_stub_free_text(&old_block) && is_stub_free_text(&new_block);
                        tree.replace_lazy_text(block, &new_block)
                            .map_err(|_| PsiError::InvalidElement {
                                kind: tree.kind(block),
                                key: format!("{block:?}"),
                            })?;
                        self.subtree_changed(&state, &ast, block, !keeps_stubs);
                        debug!(block = ?block, keeps_stubs, "reparsed one block");
                        return Ok(Reparse::Block);
                    }
                }
            }
        }

        self.reparse(&new_text);
        Ok(Reparse::File)
    }

    /// Replace the file content, invalidating every existing handle.
    pub fn set_text(&self, text: &str) {
        self.reparse(text);
    }

    fn reparse(&self, text: &str) {
        let mut guard = self.state.write();
        let generation = guard.generation + 1;
        let mut state = Self::parse_state(&self.manager, generation, text);
        if guard.stubs.is_some() {
            state.stubs = Some(Arc::new(Self::build_stubs(&self.manager, &state.green)));
        }
        *guard = Arc::new(state);
        drop(guard);
        let stamp = self.manager.modification_tracker().increment();
        debug!(file = %self.name, generation, stamp, "file reparsed");
    }
}

impl std::fmt::Debug for JavaFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavaFile")
            .field("name", &self.name)
            .field("generation", &self.generation())
            .field("ast_loaded", &self.is_ast_loaded())
            .finish_non_exhaustive()
    }
}
