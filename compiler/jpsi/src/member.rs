//! Declared or synthetic class members.

use std::sync::Arc;

use jpsi_stub::StubFlags;

use crate::augment::{LightMember, Synthetic};
use crate::class::PsiClass;
use crate::error::PsiResult;
use crate::traits::{Documented, ModifierOwner, Named, Typed};
use crate::types::PsiType;

/// An entry of a merged member list: a declared member façade or an
/// interned light member contributed by an
/// [`AugmentProvider`](crate::AugmentProvider).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Member<T> {
    Own(T),
    Light(Synthetic),
}

impl<T> Member<T> {
    pub fn as_own(&self) -> Option<&T> {
        match self {
            Member::Own(own) => Some(own),
            Member::Light(_) => None,
        }
    }

    pub fn into_own(self) -> Option<T> {
        match self {
            Member::Own(own) => Some(own),
            Member::Light(_) => None,
        }
    }

    pub fn as_light(&self) -> Option<&Arc<LightMember>> {
        match self {
            Member::Own(_) => None,
            Member::Light(synthetic) => Some(&synthetic.member),
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, Member::Light(_))
    }
}

impl<T: Named> Named for Member<T> {
    fn name(&self) -> PsiResult<Option<String>> {
        match self {
            Member::Own(own) => own.name(),
            Member::Light(synthetic) => Ok(Some(synthetic.member.name().to_owned())),
        }
    }
}

impl<T: Typed> Typed for Member<T> {
    fn type_text(&self) -> PsiResult<Option<String>> {
        match self {
            Member::Own(own) => own.type_text(),
            Member::Light(synthetic) => Ok(synthetic.member.type_text().map(str::to_owned)),
        }
    }

    fn psi_type(&self) -> PsiResult<Option<Arc<PsiType>>> {
        match self {
            Member::Own(own) => own.psi_type(),
            Member::Light(synthetic) => Ok(synthetic
                .member
                .type_text()
                .map(|text| Arc::new(PsiType::parse(text)))),
        }
    }
}

impl<T: ModifierOwner> ModifierOwner for Member<T> {
    fn explicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self {
            Member::Own(own) => own.explicit_modifiers(),
            Member::Light(synthetic) => Ok(synthetic.member.modifiers()),
        }
    }

    fn implicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self {
            Member::Own(own) => own.implicit_modifiers(),
            Member::Light(_) => Ok(StubFlags::empty()),
        }
    }
}

impl<T: Documented> Documented for Member<T> {
    fn documentation_flags(&self) -> PsiResult<StubFlags> {
        match self {
            Member::Own(own) => own.documentation_flags(),
            Member::Light(_) => Ok(StubFlags::empty()),
        }
    }
}

/// Class the member belongs to.
pub trait ContainingClass {
    fn containing_class(&self) -> PsiResult<Option<PsiClass>>;
}

impl<T: ContainingClass> ContainingClass for Member<T> {
    fn containing_class(&self) -> PsiResult<Option<PsiClass>> {
        match self {
            Member::Own(own) => own.containing_class(),
            Member::Light(synthetic) => Ok(Some(synthetic.owner.clone())),
        }
    }
}
