//! Code blocks and local variables.

use std::sync::Arc;

use jpsi_ir::ElementType;
use jpsi_stub::{extract, StubFlags};
use jpsi_tree::normalized_text;

use crate::element::PsiElement;
use crate::error::PsiResult;
use crate::field;
use crate::modifiers::PsiModifierList;
use crate::traits::{ModifierOwner, Named, Typed};
use crate::types::PsiType;

use ElementType as T;

/// A `{ ... }` body. Reading its statements parses it if it is still
/// collapsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PsiCodeBlock {
    element: PsiElement,
}

impl PsiCodeBlock {
    pub(crate) fn new(element: PsiElement) -> Self {
        PsiCodeBlock { element }
    }

    pub fn cast(element: PsiElement) -> Option<Self> {
        (element.kind() == T::CodeBlock).then_some(PsiCodeBlock { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    /// Whether the block's text has been parsed into nodes.
    pub fn is_parsed(&self) -> PsiResult<bool> {
        self.element.read_tree(|tree, node| !tree.is_collapsed(node))
    }

    pub fn statements(&self) -> PsiResult<Vec<PsiElement>> {
        self.element.read_tree(|tree, node| {
            tree.children(node)
                .into_iter()
                .filter(|&c| tree.kind(c).is_statement())
                .map(|c| self.element.tree_element(tree, c))
                .collect()
        })
    }

    /// Local variables declared directly in this block, in order.
    pub fn local_variables(&self) -> PsiResult<Vec<PsiLocalVariable>> {
        self.element.read_tree(|tree, node| {
            tree.children_of_kind(node, T::DeclarationStatement)
                .into_iter()
                .flat_map(|statement| tree.children_of_kind(statement, T::LocalVariable))
                .map(|v| PsiLocalVariable::new(self.element.tree_element(tree, v)))
                .collect()
        })
    }
}

/// A `LOCAL_VARIABLE` or a `try` resource (`RESOURCE_VARIABLE`).
///
/// Like fields, the declarators of `int a, b;` share the first one's type
/// node and modifier list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PsiLocalVariable {
    element: PsiElement,
}

impl PsiLocalVariable {
    pub(crate) fn new(element: PsiElement) -> Self {
        PsiLocalVariable { element }
    }

    pub fn cast(element: PsiElement) -> Option<Self> {
        matches!(element.kind(), T::LocalVariable | T::ResourceVariable)
            .then_some(PsiLocalVariable { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    pub fn is_resource(&self) -> bool {
        self.element.kind() == T::ResourceVariable
    }

    /// The declarator owning the shared type node.
    pub fn declaration_owner(&self) -> PsiResult<PsiLocalVariable> {
        self.element.read_tree(|tree, node| {
            let owner = field::tree_owner(tree, node).unwrap_or(node);
            PsiLocalVariable::new(self.element.tree_element(tree, owner))
        })
    }

    pub fn modifier_list(&self) -> PsiResult<Option<PsiModifierList>> {
        Ok(self
            .declaration_owner()?
            .element
            .first_child_element(T::ModifierList)?
            .map(PsiModifierList::new))
    }

    pub fn initializer(&self) -> PsiResult<Option<PsiElement>> {
        self.element.read_tree(|tree, node| {
            extract::initializer(tree, &node).map(|init| self.element.tree_element(tree, init))
        })
    }

    pub fn initializer_text(&self) -> PsiResult<Option<String>> {
        self.element.read_tree(|tree, node| {
            extract::initializer(tree, &node).map(|init| normalized_text(tree, &init))
        })
    }
}

impl Named for PsiLocalVariable {
    fn name(&self) -> PsiResult<Option<String>> {
        self.element.read_tree(|tree, node| extract::name(tree, &node))
    }
}

impl Typed for PsiLocalVariable {
    fn type_text(&self) -> PsiResult<Option<String>> {
        self.element.read_tree(field::tree_type_text)
    }

    fn psi_type(&self) -> PsiResult<Option<Arc<PsiType>>> {
        self.element.cached_type(|| self.type_text())
    }
}

impl ModifierOwner for PsiLocalVariable {
    fn explicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self.modifier_list()? {
            Some(list) => list.flags(),
            None => Ok(StubFlags::empty()),
        }
    }
}
