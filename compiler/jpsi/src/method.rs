//! Method, constructor and annotation method façades.

use std::sync::Arc;

use jpsi_ir::ElementType;
use jpsi_stub::{extract, StubFlags};
use jpsi_tree::normalized_text;

use crate::class::{self, PsiClass};
use crate::code::PsiCodeBlock;
use crate::element::PsiElement;
use crate::error::PsiResult;
use crate::member::ContainingClass;
use crate::modifiers::PsiModifierList;
use crate::parameter::PsiParameter;
use crate::traits::{Documented, ModifierOwner, Named, Typed, DOCUMENTATION};
use crate::types::PsiType;

use ElementType as T;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PsiMethod {
    element: PsiElement,
}

impl PsiMethod {
    pub(crate) fn new(element: PsiElement) -> Self {
        debug_assert!(matches!(element.kind(), T::Method | T::AnnotationMethod));
        PsiMethod { element }
    }

    pub fn cast(element: PsiElement) -> Option<Self> {
        matches!(element.kind(), T::Method | T::AnnotationMethod)
            .then_some(PsiMethod { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    pub fn into_element(self) -> PsiElement {
        self.element
    }

    pub fn is_annotation_method(&self) -> bool {
        self.element.kind() == T::AnnotationMethod
    }

    /// Constructor, compact constructor, varargs and documentation bits.
    pub fn method_flags(&self) -> PsiResult<StubFlags> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).flags()),
            |tree, node| {
                Ok(extract::method_flags(tree, &node) | extract::documentation_flags(tree, &node))
            },
        )
    }

    pub fn is_constructor(&self) -> PsiResult<bool> {
        Ok(self.method_flags()?.contains(StubFlags::CONSTRUCTOR))
    }

    /// Canonical record constructor written without a parameter list.
    pub fn is_compact_constructor(&self) -> PsiResult<bool> {
        Ok(self.method_flags()?.contains(StubFlags::COMPACT_CONSTRUCTOR))
    }

    pub fn is_varargs(&self) -> PsiResult<bool> {
        Ok(self.method_flags()?.contains(StubFlags::VARARGS))
    }

    /// Declared parameters. A compact constructor takes the components of
    /// its record.
    pub fn parameters(&self) -> PsiResult<Vec<PsiParameter>> {
        if self.is_compact_constructor()? {
            return match self.containing_class()? {
                Some(record) => record.record_components(),
                None => Ok(Vec::new()),
            };
        }
        let Some(list) = self.element.first_child_element(T::ParameterList)? else {
            return Ok(Vec::new());
        };
        Ok(list
            .child_elements(&[T::Parameter])?
            .into_iter()
            .map(PsiParameter::new)
            .collect())
    }

    pub fn throws_list(&self) -> PsiResult<Vec<String>> {
        self.element.reference_list(T::ThrowsList)
    }

    pub fn type_parameter_names(&self) -> PsiResult<Vec<String>> {
        class::type_parameter_names(&self.element)
    }

    pub fn modifier_list(&self) -> PsiResult<Option<PsiModifierList>> {
        Ok(self
            .element
            .first_child_element(T::ModifierList)?
            .map(PsiModifierList::new))
    }

    /// Method body; `None` for abstract and native methods.
    pub fn body(&self) -> PsiResult<Option<PsiCodeBlock>> {
        self.element.read_tree(|tree, node| {
            tree.first_child_of_kind(node, T::CodeBlock)
                .map(|block| PsiCodeBlock::new(self.element.tree_element(tree, block)))
        })
    }

    /// Normalized `default` value of an annotation method.
    pub fn default_value_text(&self) -> PsiResult<Option<String>> {
        if !self.is_annotation_method() {
            return Ok(None);
        }
        self.element.read(
            |stubs, id| Ok(stubs.get(id).default_value_text().map(str::to_owned)),
            |tree, node| {
                Ok(extract::default_value(tree, &node).map(|value| normalized_text(tree, &value)))
            },
        )
    }
}

impl Named for PsiMethod {
    fn name(&self) -> PsiResult<Option<String>> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).name().map(str::to_owned)),
            |tree, node| Ok(extract::name(tree, &node)),
        )
    }
}

impl Typed for PsiMethod {
    /// Return type; `None` for constructors.
    fn type_text(&self) -> PsiResult<Option<String>> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).type_text().map(str::to_owned)),
            |tree, node| Ok(extract::own_type_text(tree, &node)),
        )
    }

    fn psi_type(&self) -> PsiResult<Option<Arc<PsiType>>> {
        self.element.cached_type(|| self.type_text())
    }
}

impl ModifierOwner for PsiMethod {
    fn explicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self.modifier_list()? {
            Some(list) => list.flags(),
            None => Ok(StubFlags::empty()),
        }
    }

    fn implicit_modifiers(&self) -> PsiResult<StubFlags> {
        let Some(owner) = self.containing_class()? else {
            return Ok(StubFlags::empty());
        };
        let mut implicit = StubFlags::empty();
        if owner.is_interface()? {
            let explicit = self.explicit_modifiers()?;
            if !explicit.contains(StubFlags::PRIVATE) {
                implicit |= StubFlags::PUBLIC;
            }
            if !explicit.intersects(StubFlags::DEFAULT | StubFlags::STATIC | StubFlags::PRIVATE) {
                implicit |= StubFlags::ABSTRACT;
            }
        } else if owner.is_enum()? && self.is_constructor()? {
            implicit |= StubFlags::PRIVATE;
        }
        Ok(implicit)
    }
}

impl Documented for PsiMethod {
    fn documentation_flags(&self) -> PsiResult<StubFlags> {
        Ok(self.method_flags()? & DOCUMENTATION)
    }
}

impl ContainingClass for PsiMethod {
    fn containing_class(&self) -> PsiResult<Option<PsiClass>> {
        Ok(self.element.parent()?.and_then(PsiClass::cast))
    }
}

impl std::fmt::Debug for PsiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PsiMethod").field(&self.element).finish()
    }
}

#[cfg(test)]
mod tests;
