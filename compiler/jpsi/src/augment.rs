//! Synthetic class members.
//!
//! An [`AugmentProvider`] contributes members a class has without declaring
//! them: the implicit `values()` of an enum, the component fields of a
//! record, or whatever a host plugs in. Providers describe members as
//! [`LightMember`] values; the class interns them per modification stamp
//! so repeated queries hand out the same `Arc`.

use std::sync::Arc;

use jpsi_stub::StubFlags;

use crate::class::PsiClass;
use crate::error::PsiResult;
use crate::traits::{Named, Typed};

/// Which member list a query is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
    InnerClass,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LightParameter {
    pub name: String,
    pub type_text: String,
}

/// A member that exists only as a description.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LightMember {
    kind: MemberKind,
    name: String,
    type_text: Option<String>,
    modifiers: StubFlags,
    parameters: Vec<LightParameter>,
    origin: &'static str,
}

impl LightMember {
    fn new(kind: MemberKind, name: &str, type_text: Option<&str>) -> Self {
        LightMember {
            kind,
            name: name.to_owned(),
            type_text: type_text.map(str::to_owned),
            modifiers: StubFlags::empty(),
            parameters: Vec::new(),
            origin: "",
        }
    }

    pub fn field(name: &str, type_text: &str) -> Self {
        Self::new(MemberKind::Field, name, Some(type_text))
    }

    pub fn method(name: &str, return_type: &str) -> Self {
        Self::new(MemberKind::Method, name, Some(return_type))
    }

    pub fn inner_class(name: &str) -> Self {
        Self::new(MemberKind::InnerClass, name, None)
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: StubFlags) -> Self {
        self.modifiers = modifiers.modifiers();
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: &str, type_text: &str) -> Self {
        self.parameters.push(LightParameter {
            name: name.to_owned(),
            type_text: type_text.to_owned(),
        });
        self
    }

    /// Tag naming the provider, for diagnostics.
    #[must_use]
    pub fn with_origin(mut self, origin: &'static str) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_text(&self) -> Option<&str> {
        self.type_text.as_deref()
    }

    #[inline]
    pub fn modifiers(&self) -> StubFlags {
        self.modifiers
    }

    pub fn parameters(&self) -> &[LightParameter] {
        &self.parameters
    }

    pub fn origin(&self) -> &'static str {
        self.origin
    }
}

/// Contributes synthetic members to classes.
///
/// Answers must depend only on the owner and the current modification
/// stamp. `name`, when given, restricts the answer to members of that name;
/// providers may ignore it and the class filters again.
pub trait AugmentProvider: Send + Sync {
    fn collect_augments(
        &self,
        owner: &PsiClass,
        kind: MemberKind,
        name: Option<&str>,
    ) -> PsiResult<Vec<LightMember>>;
}

fn wanted(name: Option<&str>, candidate: &str) -> bool {
    !matches!(name, Some(n) if n != candidate)
}

/// `values()` and `valueOf(String)` of enums.
#[derive(Debug, Default)]
pub struct EnumMembers;

impl AugmentProvider for EnumMembers {
    fn collect_augments(
        &self,
        owner: &PsiClass,
        kind: MemberKind,
        name: Option<&str>,
    ) -> PsiResult<Vec<LightMember>> {
        if kind != MemberKind::Method || !owner.is_enum()? {
            return Ok(Vec::new());
        }
        let enum_name = owner.name()?.unwrap_or_default();
        let flags = StubFlags::PUBLIC | StubFlags::STATIC;
        let mut members = Vec::new();
        if wanted(name, "values") {
            members.push(
                LightMember::method("values", &format!("{enum_name}[]"))
                    .with_modifiers(flags)
                    .with_origin("enum"),
            );
        }
        if wanted(name, "valueOf") {
            members.push(
                LightMember::method("valueOf", &enum_name)
                    .with_modifiers(flags)
                    .with_parameter("name", "String")
                    .with_origin("enum"),
            );
        }
        Ok(members)
    }
}

/// Component fields of records, and the accessors a record does not
/// declare itself.
#[derive(Debug, Default)]
pub struct RecordMembers;

impl AugmentProvider for RecordMembers {
    fn collect_augments(
        &self,
        owner: &PsiClass,
        kind: MemberKind,
        name: Option<&str>,
    ) -> PsiResult<Vec<LightMember>> {
        if kind == MemberKind::InnerClass || !owner.is_record()? {
            return Ok(Vec::new());
        }
        let declared_accessors: Vec<String> = if kind == MemberKind::Method {
            owner
                .own_methods()?
                .iter()
                .filter(|m| m.parameters().is_ok_and(|p| p.is_empty()))
                .filter_map(|m| m.name().ok().flatten())
                .collect()
        } else {
            Vec::new()
        };
        let mut members = Vec::new();
        for component in owner.record_components()? {
            let Some(component_name) = component.name()? else {
                continue;
            };
            if !wanted(name, &component_name) {
                continue;
            }
            let type_text = component.type_text()?.unwrap_or_default();
            let member = match kind {
                MemberKind::Field => LightMember::field(&component_name, &type_text)
                    .with_modifiers(StubFlags::PRIVATE | StubFlags::FINAL),
                _ if declared_accessors.contains(&component_name) => continue,
                _ => LightMember::method(&component_name, &type_text)
                    .with_modifiers(StubFlags::PUBLIC),
            };
            members.push(member.with_origin("record"));
        }
        Ok(members)
    }
}

/// An interned light member together with the class it was contributed
/// to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Synthetic {
    pub member: Arc<LightMember>,
    pub owner: PsiClass,
}
