//! Builds a [`StubTree`] from a syntax tree.
//!
//! The builder is a [`StubVisitor`]: the shared traversal decides which
//! nodes get stubs and in which order, the builder decides what each stub
//! records.

use jpsi_ir::ElementType;
use jpsi_tree::{normalized_text, LighterAst};
use tracing::{debug, trace};

use crate::extract;
use crate::flags::StubFlags;
use crate::stub::{StubId, StubNode, StubTree, INITIALIZER_TOO_LONG};
use crate::traverse::{visit_stub_nodes, StubVisitor};

use ElementType as T;

/// Knobs of stub building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StubBuildOptions {
    /// Field initializers longer than this are stored as
    /// [`INITIALIZER_TOO_LONG`].
    pub initializer_text_limit: usize,
}

impl Default for StubBuildOptions {
    fn default() -> Self {
        StubBuildOptions {
            initializer_text_limit: 1000,
        }
    }
}

impl StubBuildOptions {
    #[must_use]
    pub fn with_initializer_text_limit(mut self, limit: usize) -> Self {
        self.initializer_text_limit = limit;
        self
    }
}

/// Build the stub tree of a file.
///
/// Never fails: malformed declarations produce stubs with whatever could
/// be read, and bodies with syntax errors are left unstubbed.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_stub_tree<A: LighterAst + ?Sized>(ast: &A, options: StubBuildOptions) -> StubTree {
    let mut builder = StubBuilder::new(options);
    visit_stub_nodes(ast, &mut builder);
    let tree = builder
        .tree
        .unwrap_or_else(|| StubTree::new(StubNode::new(T::File)));
    debug!(stubs = tree.len(), "built stub tree");
    tree
}

/// Type and inherited flags of the field that owns a multi-field
/// declaration's type node, keyed by the stub of the enclosing class.
struct FieldOwner {
    class: StubId,
    base_type: String,
    inherited: StubFlags,
}

struct StubBuilder {
    options: StubBuildOptions,
    tree: Option<StubTree>,
    stack: Vec<StubId>,
    /// Latest type-owning field per class being built.
    field_owners: Vec<FieldOwner>,
}

impl StubBuilder {
    fn new(options: StubBuildOptions) -> Self {
        StubBuilder {
            options,
            tree: None,
            stack: Vec::new(),
            field_owners: Vec::new(),
        }
    }

    fn parent_stub(&self) -> Option<(StubId, &StubNode)> {
        let tree = self.tree.as_ref()?;
        let id = *self.stack.last()?;
        Some((id, tree.get(id)))
    }

    fn qualified_name(&self, name: Option<&str>) -> Option<String> {
        let name = name?;
        let (_, parent) = self.parent_stub()?;
        match parent.kind() {
            T::File => Some(match parent.package_name() {
                Some(package) => format!("{package}.{name}"),
                None => name.to_owned(),
            }),
            T::Class => parent.qualified_name().map(|outer| format!("{outer}.{name}")),
            _ => None,
        }
    }

    fn nearest_class_name(&self) -> Option<String> {
        let tree = self.tree.as_ref()?;
        self.stack
            .iter()
            .rev()
            .map(|&id| tree.get(id))
            .find(|s| s.kind() == T::Class)
            .and_then(|s| s.name().map(str::to_owned))
    }

    fn initializer_text<A: LighterAst + ?Sized>(&self, ast: &A, field: &A::Node) -> Option<String> {
        let init = extract::initializer(ast, field)?;
        let text = normalized_text(ast, &init);
        if text.len() > self.options.initializer_text_limit {
            Some(INITIALIZER_TOO_LONG.to_owned())
        } else {
            Some(text)
        }
    }

    fn field_stub<A: LighterAst + ?Sized>(&mut self, ast: &A, node: &A::Node) -> StubNode {
        let name = extract::name(ast, node);
        let class = self.stack.last().copied().unwrap_or(StubId::from_raw(0));
        let (type_text, flags) = match extract::base_type_text(ast, node) {
            Some(base_type) => {
                let inherited = extract::documentation_flags(ast, node);
                let type_text = extract::shared_type_text(ast, node, &base_type);
                self.field_owners.retain(|o| o.class != class);
                self.field_owners.push(FieldOwner {
                    class,
                    base_type,
                    inherited,
                });
                (type_text, inherited)
            }
            None => match self.field_owners.iter().rev().find(|o| o.class == class) {
                Some(owner) => (
                    extract::shared_type_text(ast, node, &owner.base_type),
                    owner.inherited,
                ),
                None => (String::new(), StubFlags::empty()),
            },
        };
        let mut texts = vec![type_text];
        texts.extend(self.initializer_text(ast, node));
        StubNode::new(T::Field)
            .with_name(name)
            .with_flags(flags)
            .with_texts(texts)
    }

    fn stub_for<A: LighterAst + ?Sized>(
        &mut self,
        ast: &A,
        node: &A::Node,
        kind: ElementType,
        parent: Option<&A::Node>,
    ) -> StubNode {
        let stub = StubNode::new(kind);
        match kind {
            T::File => {
                let package = extract::package_name(ast, node).unwrap_or_default();
                stub.with_texts(vec![package])
            }
            T::ImportStatement | T::ImportStaticStatement => {
                let (reference, on_demand) = extract::import_reference(ast, node);
                let flags = if on_demand {
                    StubFlags::ON_DEMAND
                } else {
                    StubFlags::empty()
                };
                stub.with_flags(flags).with_texts(vec![reference])
            }
            T::Class => {
                let name = extract::name(ast, node);
                let texts = self
                    .qualified_name(name.as_deref())
                    .into_iter()
                    .collect();
                let flags =
                    extract::class_kind_flags(ast, node) | extract::documentation_flags(ast, node);
                stub.with_name(name).with_flags(flags).with_texts(texts)
            }
            T::AnonymousClass => {
                let qualified = parent.is_some_and(|p| {
                    ast.kind(p) == T::NewExpression && extract::is_qualified_new(ast, p)
                });
                let flags = if qualified {
                    StubFlags::ANON_IN_QUALIFIED_NEW
                } else {
                    StubFlags::empty()
                };
                stub.with_flags(flags)
                    .with_texts(vec![extract::base_class_reference(ast, node)])
            }
            T::EnumConstant => {
                let enum_name = self.nearest_class_name().unwrap_or_default();
                stub.with_name(extract::name(ast, node))
                    .with_flags(extract::documentation_flags(ast, node))
                    .with_texts(vec![enum_name])
            }
            T::Method | T::AnnotationMethod => {
                let flags =
                    extract::method_flags(ast, node) | extract::documentation_flags(ast, node);
                let mut texts = vec![extract::own_type_text(ast, node).unwrap_or_default()];
                if kind == T::AnnotationMethod {
                    texts.extend(
                        extract::default_value(ast, node).map(|v| normalized_text(ast, &v)),
                    );
                }
                stub.with_name(extract::name(ast, node))
                    .with_flags(flags)
                    .with_texts(texts)
            }
            T::Field => self.field_stub(ast, node),
            T::Parameter | T::RecordComponent => {
                let flags = if extract::is_varargs(ast, node) {
                    StubFlags::VARARGS
                } else {
                    StubFlags::empty()
                };
                stub.with_name(extract::name(ast, node))
                    .with_flags(flags)
                    .with_texts(vec![extract::own_type_text(ast, node).unwrap_or_default()])
            }
            T::ModifierList => stub.with_flags(extract::modifier_flags(ast, node)),
            T::Annotation => {
                let reference = extract::annotation_reference(ast, node);
                let name = extract::short_name(&reference).to_owned();
                let full = normalized_text(ast, node);
                stub.with_name(Some(name)).with_texts(vec![reference, full])
            }
            T::TypeParameter => stub.with_name(extract::name(ast, node)),
            kind if kind.is_reference_list() => {
                stub.with_texts(extract::reference_texts(ast, node))
            }
            _ => stub,
        }
    }
}

impl<A: LighterAst + ?Sized> StubVisitor<A> for StubBuilder {
    fn enter(&mut self, ast: &A, node: &A::Node, kind: ElementType, parent: Option<&A::Node>) {
        let stub = self.stub_for(ast, node, kind, parent);
        trace!(?kind, name = stub.name(), "stub");
        let id = match (self.tree.as_mut(), self.stack.last().copied()) {
            (Some(tree), Some(parent_id)) => tree.push(parent_id, stub),
            _ => {
                self.tree = Some(StubTree::new(stub));
                StubId::from_raw(0)
            }
        };
        self.stack.push(id);
    }

    fn exit(&mut self, _ast: &A, _node: &A::Node, kind: ElementType) {
        if let Some(id) = self.stack.pop() {
            if kind.is_class() {
                self.field_owners.retain(|o| o.class != id);
            }
        }
    }
}
