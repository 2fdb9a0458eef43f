//! Modifier lists and annotations.

use jpsi_ir::ElementType;
use jpsi_stub::{extract, StubFlags};
use jpsi_tree::normalized_text;

use crate::element::PsiElement;
use crate::error::PsiResult;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PsiModifierList {
    element: PsiElement,
}

impl PsiModifierList {
    pub(crate) fn new(element: PsiElement) -> Self {
        PsiModifierList { element }
    }

    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    /// Modifier keywords written in the list.
    pub fn flags(&self) -> PsiResult<StubFlags> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).flags().modifiers()),
            |tree, node| Ok(extract::modifier_flags(tree, &node)),
        )
    }

    pub fn has_explicit_modifier(&self, modifier: StubFlags) -> PsiResult<bool> {
        Ok(self.flags()?.contains(modifier))
    }

    pub fn annotations(&self) -> PsiResult<Vec<PsiAnnotation>> {
        Ok(self
            .element
            .child_elements(&[ElementType::Annotation])?
            .into_iter()
            .map(|element| PsiAnnotation { element })
            .collect())
    }

    /// Annotation written as `name`, qualified or not. A short `name`
    /// matches qualified references too.
    pub fn find_annotation(&self, name: &str) -> PsiResult<Option<PsiAnnotation>> {
        for annotation in self.annotations()? {
            let reference = annotation.reference()?;
            if reference == name || extract::short_name(&reference) == name {
                return Ok(Some(annotation));
            }
        }
        Ok(None)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PsiAnnotation {
    element: PsiElement,
}

impl PsiAnnotation {
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    /// `java.lang.Deprecated` of `@java.lang.Deprecated`.
    pub fn reference(&self) -> PsiResult<String> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).reference_text().unwrap_or_default().to_owned()),
            |tree, node| Ok(extract::annotation_reference(tree, &node)),
        )
    }

    pub fn short_name(&self) -> PsiResult<String> {
        Ok(extract::short_name(&self.reference()?).to_owned())
    }

    /// Normalized text, arguments included.
    pub fn text(&self) -> PsiResult<String> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).texts().get(1).cloned().unwrap_or_default()),
            |tree, node| Ok(normalized_text(tree, &node)),
        )
    }
}
