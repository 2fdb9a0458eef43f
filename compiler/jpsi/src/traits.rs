//! Capabilities shared by declaration façades.

use std::sync::Arc;

use jpsi_stub::StubFlags;

use crate::error::PsiResult;
use crate::types::PsiType;

pub trait Named {
    /// Declared name; `None` for anonymous declarations and for
    /// declarations whose name is missing from malformed source.
    fn name(&self) -> PsiResult<Option<String>>;
}

pub trait Typed {
    /// Declared type as normalized text (`Map<K,V>[]`).
    fn type_text(&self) -> PsiResult<Option<String>>;

    fn psi_type(&self) -> PsiResult<Option<Arc<PsiType>>> {
        Ok(self.type_text()?.map(|text| Arc::new(PsiType::parse(&text))))
    }
}

pub trait ModifierOwner {
    /// Modifiers written in source.
    fn explicit_modifiers(&self) -> PsiResult<StubFlags>;

    /// Modifiers implied by the declaration's context, such as `public` for
    /// interface members.
    fn implicit_modifiers(&self) -> PsiResult<StubFlags> {
        Ok(StubFlags::empty())
    }

    /// Whether `modifier` applies, explicitly or implicitly.
    fn has_modifier_property(&self, modifier: StubFlags) -> PsiResult<bool> {
        let all = self.explicit_modifiers()? | self.implicit_modifiers()?;
        Ok(all.contains(modifier))
    }
}

/// Where a deprecation comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deprecation {
    Annotation,
    DocTag,
}

/// `HAS_DOC_COMMENT` and both deprecation bits.
pub(crate) const DOCUMENTATION: StubFlags = StubFlags::HAS_DOC_COMMENT
    .union(StubFlags::DOC_DEPRECATED)
    .union(StubFlags::ANNOTATION_DEPRECATED);

pub trait Documented {
    /// `HAS_DOC_COMMENT` and the deprecation bits.
    fn documentation_flags(&self) -> PsiResult<StubFlags>;

    fn has_doc_comment(&self) -> PsiResult<bool> {
        Ok(self
            .documentation_flags()?
            .contains(StubFlags::HAS_DOC_COMMENT))
    }

    /// The annotation is checked before the doc tag and wins when both are
    /// present.
    fn deprecation(&self) -> PsiResult<Option<Deprecation>> {
        let flags = self.documentation_flags()?;
        Ok(if flags.contains(StubFlags::ANNOTATION_DEPRECATED) {
            Some(Deprecation::Annotation)
        } else if flags.contains(StubFlags::DOC_DEPRECATED) {
            Some(Deprecation::DocTag)
        } else {
            None
        })
    }

    fn is_deprecated(&self) -> PsiResult<bool> {
        Ok(self.deprecation()?.is_some())
    }
}
