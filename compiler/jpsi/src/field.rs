//! Field and enum constant façades.
//!
//! In `int a, b[] = {};` the first field owns the declaration's modifier
//! list and type node; `b` holds only its name, dims and initializer. Every
//! field answers modifier and type queries through its
//! [declaration owner](PsiField::declaration_owner).

use std::sync::Arc;

use jpsi_ir::ElementType;
use jpsi_stub::{extract, StubFlags, StubId, StubTree, INITIALIZER_TOO_LONG};
use jpsi_tree::{normalized_text, NodeId, SyntaxTree};
use tracing::error;

use crate::class::PsiClass;
use crate::element::PsiElement;
use crate::error::PsiResult;
use crate::member::ContainingClass;
use crate::modifiers::PsiModifierList;
use crate::traits::{Documented, ModifierOwner, Named, Typed, DOCUMENTATION};
use crate::types::PsiType;

use ElementType as T;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PsiField {
    element: PsiElement,
}

impl PsiField {
    pub(crate) fn new(element: PsiElement) -> Self {
        debug_assert!(matches!(element.kind(), T::Field | T::EnumConstant));
        PsiField { element }
    }

    pub fn cast(element: PsiElement) -> Option<Self> {
        matches!(element.kind(), T::Field | T::EnumConstant).then_some(PsiField { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    pub fn into_element(self) -> PsiElement {
        self.element
    }

    pub fn is_enum_constant(&self) -> bool {
        self.element.kind() == T::EnumConstant
    }

    /// The field owning the modifier list and type node of this field's
    /// declaration; the field itself unless it follows a comma.
    pub fn declaration_owner(&self) -> PsiResult<PsiField> {
        if self.is_enum_constant() {
            return Ok(self.clone());
        }
        let owner = self.element.read(
            |stubs, id| match stub_owner(stubs, id) {
                Some(owner) => Ok(Some(self.element.stub_element(stubs, owner))),
                // Stub siblings are inconclusive; ask the tree.
                None => self.element.read_tree(|tree, node| {
                    tree_owner(tree, node).map(|owner| self.element.tree_element(tree, owner))
                }),
            },
            |tree, node| Ok(tree_owner(tree, node).map(|o| self.element.tree_element(tree, o))),
        )?;
        match owner {
            Some(owner) => Ok(PsiField { element: owner }),
            None => {
                error!(field = ?self.element, "field declaration has no owner");
                debug_assert!(false, "field declaration without owner: {:?}", self.element);
                Ok(self.clone())
            }
        }
    }

    /// Modifier list of the declaration; enum constants have none.
    pub fn modifier_list(&self) -> PsiResult<Option<PsiModifierList>> {
        if self.is_enum_constant() {
            return Ok(None);
        }
        let owner = self.declaration_owner()?;
        Ok(owner
            .element
            .first_child_element(T::ModifierList)?
            .map(PsiModifierList::new))
    }

    /// Initializer expression (the arguments of an enum constant are not
    /// an initializer).
    pub fn initializer(&self) -> PsiResult<Option<PsiElement>> {
        if self.is_enum_constant() {
            return Ok(None);
        }
        self.element.read_tree(|tree, node| {
            extract::initializer(tree, &node).map(|init| self.element.tree_element(tree, init))
        })
    }

    /// Normalized initializer text. Initializers too long to be kept in
    /// the stub are read from the tree.
    pub fn initializer_text(&self) -> PsiResult<Option<String>> {
        if self.is_enum_constant() {
            return Ok(None);
        }
        let from_stub = self.element.read(
            |stubs, id| Ok(Some(stubs.get(id).initializer_text().map(str::to_owned))),
            |_, _| Ok(None),
        )?;
        match from_stub {
            Some(Some(text)) if text == INITIALIZER_TOO_LONG => {}
            Some(text) => return Ok(text),
            None => {}
        }
        self.element.read_tree(|tree, node| {
            extract::initializer(tree, &node).map(|init| normalized_text(tree, &init))
        })
    }

    /// Class body of an enum constant (`A { ... }`).
    pub fn enum_constant_body(&self) -> PsiResult<Option<PsiClass>> {
        if !self.is_enum_constant() {
            return Ok(None);
        }
        Ok(self
            .element
            .first_child_element(T::EnumConstantInitializer)?
            .and_then(PsiClass::cast))
    }

    /// Remove the field. A field of a multi-field declaration removes the
    /// whole declaration.
    pub fn delete(&self) -> PsiResult<()> {
        self.element.delete()
    }

    fn directly_in_interface(&self) -> PsiResult<bool> {
        match self.element.parent()?.and_then(PsiClass::cast) {
            Some(class) => class.is_interface(),
            None => Ok(false),
        }
    }
}

/// Nearest field stub at or before `id` that owns a modifier list.
fn stub_owner(stubs: &StubTree, id: StubId) -> Option<StubId> {
    let mut current = id;
    loop {
        if stubs.child_of_kind(current, T::ModifierList).is_some() {
            return Some(current);
        }
        current = stubs.prev_sibling(current)?;
        if stubs.kind(current) != T::Field {
            return None;
        }
    }
}

fn prev_significant(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.prev_sibling(node)?;
    while tree.kind(current).is_trivia() {
        current = tree.prev_sibling(current)?;
    }
    Some(current)
}

fn next_significant(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.next_sibling(node)?;
    while tree.kind(current).is_trivia() {
        current = tree.next_sibling(current)?;
    }
    Some(current)
}

/// Nearest declarator at or before `node`, of the same kind, that owns the
/// type node. Shared by fields and local variables.
pub(crate) fn tree_owner(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let kind = tree.kind(node);
    let mut current = node;
    loop {
        if tree.first_child_of_kind(current, T::TypeElement).is_some() {
            return Some(current);
        }
        current = prev_significant(tree, current)?;
        if tree.kind(current) != kind {
            return None;
        }
    }
}

/// Every declarator of the declaration `node` belongs to, owner first.
pub(crate) fn declaration_nodes(tree: &SyntaxTree, node: NodeId) -> Vec<NodeId> {
    let kind = tree.kind(node);
    let owner = tree_owner(tree, node).unwrap_or(node);
    let mut nodes = vec![owner];
    let mut current = owner;
    while let Some(next) = next_significant(tree, current) {
        if tree.kind(next) != kind || tree.first_child_of_kind(next, T::TypeElement).is_some() {
            break;
        }
        nodes.push(next);
        current = next;
    }
    nodes
}

/// Type text of a declarator: its own type node, or the owner's base type
/// plus its own dims.
pub(crate) fn tree_type_text(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    if tree.first_child_of_kind(node, T::TypeElement).is_some() {
        return extract::own_type_text(tree, &node);
    }
    let owner = tree_owner(tree, node)?;
    let base = extract::base_type_text(tree, &owner)?;
    Some(extract::shared_type_text(tree, &node, &base))
}

impl Named for PsiField {
    fn name(&self) -> PsiResult<Option<String>> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).name().map(str::to_owned)),
            |tree, node| Ok(extract::name(tree, &node)),
        )
    }
}

impl Typed for PsiField {
    /// For an enum constant, the enum's name.
    fn type_text(&self) -> PsiResult<Option<String>> {
        if self.is_enum_constant() {
            return self.element.read(
                |stubs, id| Ok(stubs.get(id).type_text().map(str::to_owned)),
                |_, _| match self.containing_class()? {
                    Some(class) => class.name(),
                    None => Ok(None),
                },
            );
        }
        self.element.read(
            |stubs, id| {
                Ok(stubs
                    .get(id)
                    .type_text()
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned))
            },
            |tree, node| Ok(tree_type_text(tree, node)),
        )
    }

    fn psi_type(&self) -> PsiResult<Option<Arc<PsiType>>> {
        self.element.cached_type(|| self.type_text())
    }
}

impl ModifierOwner for PsiField {
    fn explicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self.modifier_list()? {
            Some(list) => list.flags(),
            None => Ok(StubFlags::empty()),
        }
    }

    fn implicit_modifiers(&self) -> PsiResult<StubFlags> {
        if self.is_enum_constant() || self.directly_in_interface()? {
            Ok(StubFlags::PUBLIC | StubFlags::STATIC | StubFlags::FINAL)
        } else {
            Ok(StubFlags::empty())
        }
    }
}

impl Documented for PsiField {
    fn documentation_flags(&self) -> PsiResult<StubFlags> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).flags() & DOCUMENTATION),
            |tree, node| {
                let owner = match tree.kind(node) {
                    T::Field => tree_owner(tree, node).unwrap_or(node),
                    _ => node,
                };
                Ok(extract::documentation_flags(tree, &owner))
            },
        )
    }
}

impl ContainingClass for PsiField {
    fn containing_class(&self) -> PsiResult<Option<PsiClass>> {
        Ok(self.element.parent()?.and_then(PsiClass::cast))
    }
}

impl std::fmt::Debug for PsiField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PsiField").field(&self.element).finish()
    }
}

#[cfg(test)]
mod tests;
