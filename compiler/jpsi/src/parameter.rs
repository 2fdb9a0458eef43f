//! Parameters and record components.

use std::sync::Arc;

use jpsi_ir::ElementType;
use jpsi_stub::{extract, StubFlags};

use crate::element::PsiElement;
use crate::error::PsiResult;
use crate::modifiers::PsiModifierList;
use crate::traits::{ModifierOwner, Named, Typed};
use crate::types::PsiType;

use ElementType as T;

/// A `PARAMETER` of a method, lambda, `catch` or enhanced `for`, or a
/// `RECORD_COMPONENT`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PsiParameter {
    element: PsiElement,
}

impl PsiParameter {
    pub(crate) fn new(element: PsiElement) -> Self {
        PsiParameter { element }
    }

    pub fn cast(element: PsiElement) -> Option<Self> {
        matches!(element.kind(), T::Parameter | T::RecordComponent)
            .then_some(PsiParameter { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    pub fn is_record_component(&self) -> bool {
        self.element.kind() == T::RecordComponent
    }

    /// Declared with `...`.
    pub fn is_varargs(&self) -> PsiResult<bool> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).flags().contains(StubFlags::VARARGS)),
            |tree, node| Ok(extract::is_varargs(tree, &node)),
        )
    }

    pub fn modifier_list(&self) -> PsiResult<Option<PsiModifierList>> {
        Ok(self
            .element
            .first_child_element(T::ModifierList)?
            .map(PsiModifierList::new))
    }

    /// The method, lambda, `catch` section, `for` statement or record the
    /// parameter is declared by.
    pub fn declaration_scope(&self) -> PsiResult<Option<PsiElement>> {
        let Some(parent) = self.element.parent()? else {
            return Ok(None);
        };
        match parent.kind() {
            T::ParameterList | T::RecordHeader => parent.parent(),
            _ => Ok(Some(parent)),
        }
    }
}

impl Named for PsiParameter {
    fn name(&self) -> PsiResult<Option<String>> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).name().map(str::to_owned)),
            |tree, node| Ok(extract::name(tree, &node)),
        )
    }
}

impl Typed for PsiParameter {
    /// Varargs types end in `...`.
    fn type_text(&self) -> PsiResult<Option<String>> {
        self.element.read(
            |stubs, id| {
                Ok(stubs
                    .get(id)
                    .type_text()
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned))
            },
            |tree, node| Ok(extract::own_type_text(tree, &node)),
        )
    }

    fn psi_type(&self) -> PsiResult<Option<Arc<PsiType>>> {
        self.element.cached_type(|| self.type_text())
    }
}

impl ModifierOwner for PsiParameter {
    fn explicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self.modifier_list()? {
            Some(list) => list.flags(),
            None => Ok(StubFlags::empty()),
        }
    }
}

#[cfg(test)]
mod tests;
