//! The traversal that decides which syntax nodes become stubs.
//!
//! Both the stub builder and the PSI layer's stub-to-tree binding run this
//! walk, so the n-th node entered is always the node the n-th stub (in
//! pre-order) was built from.

use jpsi_ir::{ensure_sufficient_stack, ElementType};
use jpsi_tree::LighterAst;

use crate::classifier::is_stub_free;

use ElementType as T;

/// Receives the stub-worthy nodes of a tree in pre-order.
pub trait StubVisitor<A: LighterAst + ?Sized> {
    /// A node that gets a stub. `parent` is its syntactic parent, absent
    /// only for the file root.
    fn enter(&mut self, ast: &A, node: &A::Node, kind: ElementType, parent: Option<&A::Node>);

    /// Called after every stub-worthy descendant of `node` was entered.
    fn exit(&mut self, _ast: &A, _node: &A::Node, _kind: ElementType) {}
}

/// Walk `ast` from its root, which must be a `JAVA_FILE`.
pub fn visit_stub_nodes<A, V>(ast: &A, visitor: &mut V)
where
    A: LighterAst + ?Sized,
    V: StubVisitor<A> + ?Sized,
{
    let root = ast.root();
    let kind = ast.kind(&root);
    debug_assert_eq!(kind, T::File, "stub traversal must start at a file");
    visitor.enter(ast, &root, kind, None);
    visit_children(ast, &root, kind, true, visitor);
    visitor.exit(ast, &root, kind);
}

fn visit_children<A, V>(ast: &A, node: &A::Node, kind: ElementType, stubbed: bool, visitor: &mut V)
where
    A: LighterAst + ?Sized,
    V: StubVisitor<A> + ?Sized,
{
    for child in ast.children(node) {
        let child_kind = ast.kind(&child);
        if child_kind.is_token() || skip_child(ast, kind, &child, child_kind) {
            continue;
        }
        let creates = creates_stub(child_kind, stubbed);
        if creates {
            visitor.enter(ast, &child, child_kind, Some(node));
        }
        ensure_sufficient_stack(|| visit_children(ast, &child, child_kind, creates, visitor));
        if creates {
            visitor.exit(ast, &child, child_kind);
        }
    }
}

/// Whether a node of `kind` gets a stub. Parts of a declaration (modifier
/// lists, parameter lists, reference lists and the like) only do when
/// their syntactic parent got one.
pub fn creates_stub(kind: ElementType, parent_stubbed: bool) -> bool {
    if !kind.is_stub_type() {
        return false;
    }
    let is_part = matches!(
        kind,
        T::ModifierList
            | T::Annotation
            | T::TypeParameterList
            | T::TypeParameter
            | T::ExtendsBoundList
            | T::ExtendsList
            | T::ImplementsList
            | T::ThrowsList
            | T::PermitsList
            | T::ParameterList
            | T::Parameter
            | T::RecordHeader
            | T::RecordComponent
    );
    !is_part || parent_stubbed
}

/// Whether the subtree at `child` is left out of the stub tree entirely.
pub fn skip_child<A: LighterAst + ?Sized>(
    ast: &A,
    parent_kind: ElementType,
    child: &A::Node,
    kind: ElementType,
) -> bool {
    if parent_kind.is_import_statement() || parent_kind == T::Annotation {
        return true;
    }
    match kind {
        T::ReceiverParameter | T::DocComment => true,
        T::Parameter => parent_kind != T::ParameterList,
        T::ParameterList => parent_kind == T::LambdaExpression,
        T::CodeBlock => is_stub_free(ast, child) || has_syntax_errors(ast, child),
        _ => false,
    }
}

/// Whether a body holds error nodes outside its nested lazy regions.
fn has_syntax_errors<A: LighterAst + ?Sized>(ast: &A, block: &A::Node) -> bool {
    let mut stack = ast.children(block);
    while let Some(node) = stack.pop() {
        let kind = ast.kind(&node);
        if kind == T::ErrorElement {
            return true;
        }
        if kind.is_token() || ast.is_lazy(&node) {
            continue;
        }
        stack.extend(ast.children(&node));
    }
    false
}

#[cfg(test)]
mod tests;
