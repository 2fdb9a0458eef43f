//! Class façades.
//!
//! A [`PsiClass`] wraps a `CLASS`, `ANONYMOUS_CLASS` or
//! `ENUM_CONSTANT_INITIALIZER` element. Member lists come in two flavours:
//!
//! - `own_*`: declared members in source order, read from stubs while the
//!   file is stub-only
//! - `fields()`, `methods()`, `inner_classes()`: the own members followed by
//!   every member contributed by the manager's augment providers
//!
//! Both are cached in the class's [`ClassInnerStuffCache`] under the
//! manager's modification stamp.

pub(crate) mod hierarchy;
pub(crate) mod inner_cache;

use std::sync::Arc;

use jpsi_ir::ElementType;
use jpsi_parse::parse_file;
use jpsi_stub::{extract, StubFlags};
use jpsi_tree::{GreenElement, GreenToken, NodeId, SyntaxTree};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::augment::{MemberKind, Synthetic};
use crate::cache::CachedValue;
use crate::element::PsiElement;
use crate::error::{PsiError, PsiResult};
use crate::field::PsiField;
use crate::file::JavaFile;
use crate::member::{ContainingClass, Member};
use crate::method::PsiMethod;
use crate::modifiers::PsiModifierList;
use crate::parameter::PsiParameter;
use crate::traits::{Documented, ModifierOwner, Named, DOCUMENTATION};

use inner_cache::{CachedMember, ClassInnerStuffCache, MemberInterner, MemberKey};

use ElementType as T;

const FIELD_KINDS: [ElementType; 2] = [T::Field, T::EnumConstant];
const METHOD_KINDS: [ElementType; 2] = [T::Method, T::AnnotationMethod];
const CLASS_KINDS: [ElementType; 1] = [T::Class];
const MEMBER_KINDS: [ElementType; 5] = [
    T::Field,
    T::Method,
    T::AnnotationMethod,
    T::Class,
    T::ClassInitializer,
];

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PsiClass {
    element: PsiElement,
}

impl PsiClass {
    pub fn cast(element: PsiElement) -> Option<Self> {
        element.kind().is_class().then_some(PsiClass { element })
    }

    #[inline]
    pub fn element(&self) -> &PsiElement {
        &self.element
    }

    pub fn into_element(self) -> PsiElement {
        self.element
    }

    fn cache(&self) -> PsiResult<(Arc<ClassInnerStuffCache>, u64)> {
        let state = self.element.state()?;
        let stamp = self.element.manager().modification_count();
        Ok((JavaFile::class_cache(&state, self.element.cache_key()), stamp))
    }

    // ─── Declaration facts ──────────────────────────────────────────────

    /// Dotted name for top-level and member classes; `None` for local and
    /// anonymous classes.
    pub fn qualified_name(&self) -> PsiResult<Option<String>> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).qualified_name().map(str::to_owned)),
            |tree, node| Ok(tree_qualified_name(tree, node)),
        )
    }

    /// Kind and documentation bits.
    pub fn class_flags(&self) -> PsiResult<StubFlags> {
        self.element.read(
            |stubs, id| Ok(stubs.get(id).flags()),
            |tree, node| {
                Ok(match tree.kind(node) {
                    T::Class => {
                        extract::class_kind_flags(tree, &node)
                            | extract::documentation_flags(tree, &node)
                    }
                    T::AnonymousClass => {
                        let qualified = tree.parent(node).is_some_and(|p| {
                            tree.kind(p) == T::NewExpression && extract::is_qualified_new(tree, &p)
                        });
                        if qualified {
                            StubFlags::ANON_IN_QUALIFIED_NEW
                        } else {
                            StubFlags::empty()
                        }
                    }
                    _ => StubFlags::empty(),
                })
            },
        )
    }

    pub fn is_interface(&self) -> PsiResult<bool> {
        Ok(self.class_flags()?.contains(StubFlags::INTERFACE))
    }

    pub fn is_annotation_type(&self) -> PsiResult<bool> {
        Ok(self.class_flags()?.contains(StubFlags::ANNOTATION_TYPE))
    }

    pub fn is_enum(&self) -> PsiResult<bool> {
        Ok(self.class_flags()?.contains(StubFlags::ENUM))
    }

    pub fn is_record(&self) -> PsiResult<bool> {
        Ok(self.class_flags()?.contains(StubFlags::RECORD))
    }

    /// Anonymous classes and enum constant bodies.
    pub fn is_anonymous(&self) -> bool {
        self.element.kind() != T::Class
    }

    /// `Runnable` of `new Runnable() { ... }`.
    pub fn base_class_reference(&self) -> PsiResult<Option<String>> {
        if self.element.kind() != T::AnonymousClass {
            return Ok(None);
        }
        self.element.read(
            |stubs, id| Ok(stubs.get(id).base_class_reference().map(str::to_owned)),
            |tree, node| Ok(Some(extract::base_class_reference(tree, &node))),
        )
    }

    pub fn extends_list(&self) -> PsiResult<Vec<String>> {
        self.element.reference_list(T::ExtendsList)
    }

    pub fn implements_list(&self) -> PsiResult<Vec<String>> {
        self.element.reference_list(T::ImplementsList)
    }

    pub fn permits_list(&self) -> PsiResult<Vec<String>> {
        self.element.reference_list(T::PermitsList)
    }

    pub fn type_parameter_names(&self) -> PsiResult<Vec<String>> {
        type_parameter_names(&self.element)
    }

    pub fn modifier_list(&self) -> PsiResult<Option<PsiModifierList>> {
        Ok(self
            .element
            .first_child_element(T::ModifierList)?
            .map(PsiModifierList::new))
    }

    /// Instance and static initializer blocks.
    pub fn initializers(&self) -> PsiResult<Vec<PsiElement>> {
        self.element.child_elements(&[T::ClassInitializer])
    }

    // ─── Own members ────────────────────────────────────────────────────

    fn own_keys(
        &self,
        slot: &CachedValue<Vec<MemberKey>>,
        stamp: u64,
        kinds: &[ElementType],
    ) -> PsiResult<Arc<Vec<MemberKey>>> {
        slot.try_get_or_compute(stamp, || {
            Ok(self
                .element
                .child_elements(kinds)?
                .iter()
                .map(MemberKey::of)
                .collect())
        })
    }

    fn at(&self, key: MemberKey) -> PsiElement {
        self.element.handle(key.kind, key.backing)
    }

    /// Declared fields and enum constants in source order.
    pub fn own_fields(&self) -> PsiResult<Vec<PsiField>> {
        let (cache, stamp) = self.cache()?;
        let keys = self.own_keys(&cache.own_fields, stamp, &FIELD_KINDS)?;
        Ok(keys.iter().map(|&k| PsiField::new(self.at(k))).collect())
    }

    /// Declared methods and constructors in source order.
    pub fn own_methods(&self) -> PsiResult<Vec<PsiMethod>> {
        let (cache, stamp) = self.cache()?;
        let keys = self.own_keys(&cache.own_methods, stamp, &METHOD_KINDS)?;
        Ok(keys.iter().map(|&k| PsiMethod::new(self.at(k))).collect())
    }

    /// Member classes in source order. Local and anonymous classes are not
    /// members.
    pub fn own_inner_classes(&self) -> PsiResult<Vec<PsiClass>> {
        let (cache, stamp) = self.cache()?;
        let keys = self.own_keys(&cache.own_inner_classes, stamp, &CLASS_KINDS)?;
        Ok(keys
            .iter()
            .map(|&k| PsiClass { element: self.at(k) })
            .collect())
    }

    /// Components of a record header; empty for other classes.
    pub fn record_components(&self) -> PsiResult<Vec<PsiParameter>> {
        let (cache, stamp) = self.cache()?;
        let keys = cache.record_components.try_get_or_compute(stamp, || -> PsiResult<_> {
            let Some(header) = self.element.first_child_element(T::RecordHeader)? else {
                return Ok(Vec::new());
            };
            Ok(header
                .child_elements(&[T::RecordComponent])?
                .iter()
                .map(MemberKey::of)
                .collect())
        })?;
        Ok(keys.iter().map(|&k| PsiParameter::new(self.at(k))).collect())
    }

    /// Enum constants in source order.
    pub fn enum_constants(&self) -> PsiResult<Vec<PsiField>> {
        Ok(self
            .own_fields()?
            .into_iter()
            .filter(PsiField::is_enum_constant)
            .collect())
    }

    // ─── Merged members ─────────────────────────────────────────────────

    fn synthetic(&self, member: Arc<crate::augment::LightMember>) -> Synthetic {
        Synthetic {
            member,
            owner: self.clone(),
        }
    }

    fn to_member<F>(&self, cached: &CachedMember, own: impl Fn(PsiElement) -> F) -> Member<F> {
        match cached {
            CachedMember::Own(key) => Member::Own(own(self.at(*key))),
            CachedMember::Light(member) => Member::Light(self.synthetic(Arc::clone(member))),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(class = ?self.element, ?kind))]
    fn merge_augments(
        &self,
        kind: MemberKind,
        own: &[MemberKey],
        interner: &MemberInterner,
        stamp: u64,
    ) -> PsiResult<Vec<CachedMember>> {
        let mut merged: Vec<CachedMember> = own.iter().copied().map(CachedMember::Own).collect();
        for provider in self.element.manager().augment_providers() {
            for member in provider.collect_augments(self, kind, None)? {
                if member.kind() == kind {
                    merged.push(CachedMember::Light(interner.intern(stamp, member)));
                }
            }
        }
        debug!(own = own.len(), merged = merged.len(), "member list computed");
        Ok(merged)
    }

    /// Own fields followed by augmented ones.
    pub fn fields(&self) -> PsiResult<Vec<Member<PsiField>>> {
        let (cache, stamp) = self.cache()?;
        let merged = cache.fields.try_get_or_compute(stamp, || {
            let own = self.own_keys(&cache.own_fields, stamp, &FIELD_KINDS)?;
            self.merge_augments(MemberKind::Field, &own, &cache.interner, stamp)
        })?;
        Ok(merged.iter().map(|m| self.to_member(m, PsiField::new)).collect())
    }

    /// Own methods followed by augmented ones.
    pub fn methods(&self) -> PsiResult<Vec<Member<PsiMethod>>> {
        let (cache, stamp) = self.cache()?;
        let merged = cache.methods.try_get_or_compute(stamp, || {
            let own = self.own_keys(&cache.own_methods, stamp, &METHOD_KINDS)?;
            self.merge_augments(MemberKind::Method, &own, &cache.interner, stamp)
        })?;
        Ok(merged.iter().map(|m| self.to_member(m, PsiMethod::new)).collect())
    }

    /// Own member classes followed by augmented ones.
    pub fn inner_classes(&self) -> PsiResult<Vec<Member<PsiClass>>> {
        let (cache, stamp) = self.cache()?;
        let merged = cache.inner_classes.try_get_or_compute(stamp, || {
            let own = self.own_keys(&cache.own_inner_classes, stamp, &CLASS_KINDS)?;
            self.merge_augments(MemberKind::InnerClass, &own, &cache.interner, stamp)
        })?;
        Ok(merged
            .iter()
            .map(|m| self.to_member(m, |element| PsiClass { element }))
            .collect())
    }

    // ─── Lookup by name ─────────────────────────────────────────────────

    /// Augmented members named `name`, asking providers for that name only.
    fn augments_named(
        &self,
        kind: MemberKind,
        name: &str,
        interner: &MemberInterner,
        stamp: u64,
    ) -> PsiResult<Vec<Synthetic>> {
        let mut found = Vec::new();
        for provider in self.element.manager().augment_providers() {
            for member in provider.collect_augments(self, kind, Some(name))? {
                if member.kind() == kind && member.name() == name {
                    found.push(self.synthetic(interner.intern(stamp, member)));
                }
            }
        }
        Ok(found)
    }

    fn first_by_name(
        &self,
        keys: &[MemberKey],
        name_of: impl Fn(PsiElement) -> PsiResult<Option<String>>,
    ) -> PsiResult<FxHashMap<String, MemberKey>> {
        let mut map = FxHashMap::default();
        for &key in keys {
            if let Some(name) = name_of(self.at(key))? {
                map.entry(name).or_insert(key);
            }
        }
        Ok(map)
    }

    fn find_own_field(&self, name: &str) -> PsiResult<Option<Member<PsiField>>> {
        let (cache, stamp) = self.cache()?;
        let map = cache.field_map.try_get_or_compute(stamp, || {
            let own = self.own_keys(&cache.own_fields, stamp, &FIELD_KINDS)?;
            self.first_by_name(&own, |e| PsiField::new(e).name())
        })?;
        if let Some(&key) = map.get(name) {
            return Ok(Some(Member::Own(PsiField::new(self.at(key)))));
        }
        let augments = self.augments_named(MemberKind::Field, name, &cache.interner, stamp)?;
        Ok(augments.into_iter().next().map(Member::Light))
    }

    fn find_own_methods(&self, name: &str) -> PsiResult<Vec<Member<PsiMethod>>> {
        let (cache, stamp) = self.cache()?;
        let map = cache.method_map.try_get_or_compute(stamp, || -> PsiResult<_> {
            let own = self.own_keys(&cache.own_methods, stamp, &METHOD_KINDS)?;
            let mut map: FxHashMap<String, Vec<MemberKey>> = FxHashMap::default();
            for &key in own.iter() {
                if let Some(name) = PsiMethod::new(self.at(key)).name()? {
                    map.entry(name).or_default().push(key);
                }
            }
            Ok(map)
        })?;
        if let Some(keys) = map.get(name) {
            return Ok(keys
                .iter()
                .map(|&k| Member::Own(PsiMethod::new(self.at(k))))
                .collect());
        }
        let augments = self.augments_named(MemberKind::Method, name, &cache.interner, stamp)?;
        Ok(augments.into_iter().map(Member::Light).collect())
    }

    fn find_own_inner_class(&self, name: &str) -> PsiResult<Option<Member<PsiClass>>> {
        let (cache, stamp) = self.cache()?;
        let map = cache.inner_class_map.try_get_or_compute(stamp, || {
            let own = self.own_keys(&cache.own_inner_classes, stamp, &CLASS_KINDS)?;
            self.first_by_name(&own, |element| PsiClass { element }.name())
        })?;
        if let Some(&key) = map.get(name) {
            return Ok(Some(Member::Own(PsiClass {
                element: self.at(key),
            })));
        }
        let augments = self.augments_named(MemberKind::InnerClass, name, &cache.interner, stamp)?;
        Ok(augments.into_iter().next().map(Member::Light))
    }

    /// First field (or enum constant) named `name`. Without `check_bases`
    /// only this class is searched, falling back to augment providers
    /// asked for that name; with it, the resolved supertypes follow in
    /// breadth-first order.
    pub fn find_field_by_name(
        &self,
        name: &str,
        check_bases: bool,
    ) -> PsiResult<Option<Member<PsiField>>> {
        if let Some(found) = self.find_own_field(name)? {
            return Ok(Some(found));
        }
        if check_bases {
            for base in hierarchy::all_supers(self)? {
                if let Some(found) = base.find_own_field(name)? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    /// Every method named `name`; with `check_bases`, followed by those of
    /// the resolved supertypes.
    pub fn find_methods_by_name(
        &self,
        name: &str,
        check_bases: bool,
    ) -> PsiResult<Vec<Member<PsiMethod>>> {
        let mut found = self.find_own_methods(name)?;
        if check_bases {
            for base in hierarchy::all_supers(self)? {
                found.extend(base.find_own_methods(name)?);
            }
        }
        Ok(found)
    }

    pub fn find_inner_class_by_name(
        &self,
        name: &str,
        check_bases: bool,
    ) -> PsiResult<Option<Member<PsiClass>>> {
        if let Some(found) = self.find_own_inner_class(name)? {
            return Ok(Some(found));
        }
        if check_bases {
            for base in hierarchy::all_supers(self)? {
                if let Some(found) = base.find_own_inner_class(name)? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    /// Resolved `extends`, `implements` and anonymous base references, in
    /// that order. Unresolvable references are left out.
    pub fn supers(&self) -> PsiResult<Vec<PsiClass>> {
        hierarchy::direct_supers(self)
    }

    // ─── Edits ──────────────────────────────────────────────────────────

    /// Parse `text` as member declarations and append them before the
    /// closing brace. Returns the first added member.
    #[tracing::instrument(level = "debug", skip_all, fields(class = ?self.element))]
    pub fn add_member(&self, text: &str) -> PsiResult<PsiElement> {
        let state = self.element.state()?;
        let (ast, node) = self.element.tree_view()?;
        let tree = &ast.tree;
        let level = self.element.manager().config().language_level;

        let parsed = parse_file(&format!("class __Dummy {{ {text} }}"), level);
        let members: Vec<GreenElement> = parsed
            .green()
            .children()
            .iter()
            .filter_map(GreenElement::as_node)
            .find(|n| n.kind() == T::Class)
            .map(|class| {
                class
                    .children()
                    .iter()
                    .filter(|c| MEMBER_KINDS.contains(&c.kind()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if members.is_empty() || !parsed.errors().is_empty() {
            return Err(PsiError::NotAMember {
                text: text.to_owned(),
            });
        }

        let mut index = match tree.last_child_of_kind(node, T::RBrace) {
            Some(rbrace) => tree.index_in_parent(rbrace).unwrap_or(0),
            None => tree.children(node).len(),
        };
        let mut first = None;
        for member in &members {
            let separator = GreenElement::Token(GreenToken::new(T::WhiteSpace, "\n"));
            tree.insert_child(node, index, &separator)
                .map_err(|_| self.element.invalid())?;
            let added = tree
                .insert_child(node, index + 1, member)
                .map_err(|_| self.element.invalid())?;
            first.get_or_insert(added);
            index += 2;
        }
        self.element.file().subtree_changed(&state, &ast, node, true);
        let first = first.ok_or_else(|| self.element.invalid())?;
        Ok(self.element.tree_element(tree, first))
    }

    fn has_constant_bodies(&self) -> PsiResult<bool> {
        for constant in self.enum_constants()? {
            if constant.enum_constant_body()?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Qualified name computed the way the stub builder records it.
fn tree_qualified_name(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    if tree.kind(node) != T::Class {
        return None;
    }
    let name = extract::name(tree, &node)?;
    let parent = tree.parent(node)?;
    match tree.kind(parent) {
        T::File => Some(match extract::package_name(tree, &parent) {
            Some(package) => format!("{package}.{name}"),
            None => name,
        }),
        T::Class => tree_qualified_name(tree, parent).map(|outer| format!("{outer}.{name}")),
        _ => None,
    }
}

/// Names of the type parameters declared by a class or method.
pub(crate) fn type_parameter_names(element: &PsiElement) -> PsiResult<Vec<String>> {
    let Some(list) = element.first_child_element(T::TypeParameterList)? else {
        return Ok(Vec::new());
    };
    list.child_elements(&[T::TypeParameter])?
        .iter()
        .map(|parameter| {
            parameter.read(
                |stubs, id| Ok(stubs.get(id).name().map(str::to_owned)),
                |tree, node| Ok(extract::name(tree, &node)),
            )
        })
        .filter_map(Result::transpose)
        .collect()
}

impl Named for PsiClass {
    fn name(&self) -> PsiResult<Option<String>> {
        if self.element.kind() != T::Class {
            return Ok(None);
        }
        self.element.read(
            |stubs, id| Ok(stubs.get(id).name().map(str::to_owned)),
            |tree, node| Ok(extract::name(tree, &node)),
        )
    }
}

impl ModifierOwner for PsiClass {
    fn explicit_modifiers(&self) -> PsiResult<StubFlags> {
        match self.modifier_list()? {
            Some(list) => list.flags(),
            None => Ok(StubFlags::empty()),
        }
    }

    fn implicit_modifiers(&self) -> PsiResult<StubFlags> {
        let mut implicit = StubFlags::empty();
        if self.element.kind() != T::Class {
            return Ok(implicit);
        }
        let kind = self.class_flags()?;
        let outer = self.element.parent()?.and_then(PsiClass::cast);
        if let Some(outer) = outer {
            if outer.is_interface()? {
                implicit |= StubFlags::PUBLIC | StubFlags::STATIC;
            }
            if kind.intersects(StubFlags::INTERFACE | StubFlags::ENUM | StubFlags::RECORD) {
                implicit |= StubFlags::STATIC;
            }
        }
        if kind.contains(StubFlags::INTERFACE) {
            implicit |= StubFlags::ABSTRACT;
        }
        if kind.contains(StubFlags::RECORD)
            || (kind.contains(StubFlags::ENUM) && !self.has_constant_bodies()?)
        {
            implicit |= StubFlags::FINAL;
        }
        Ok(implicit)
    }
}

impl Documented for PsiClass {
    fn documentation_flags(&self) -> PsiResult<StubFlags> {
        Ok(self.class_flags()? & DOCUMENTATION)
    }
}

impl ContainingClass for PsiClass {
    fn containing_class(&self) -> PsiResult<Option<PsiClass>> {
        self.element.containing_class()
    }
}

impl std::fmt::Debug for PsiClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PsiClass").field(&self.element).finish()
    }
}
