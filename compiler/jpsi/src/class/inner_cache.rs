//! Per-class derived member data.
//!
//! Entries store element keys, never façades: a façade holds its file, and
//! the file owns this cache.

use std::sync::Arc;

use jpsi_ir::ElementType;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::augment::LightMember;
use crate::cache::CachedValue;
use crate::element::{Backing, PsiElement};

/// Where a declared member lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MemberKey {
    pub(crate) kind: ElementType,
    pub(crate) backing: Backing,
}

impl MemberKey {
    pub(crate) fn of(element: &PsiElement) -> Self {
        MemberKey {
            kind: element.kind(),
            backing: element.backing(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum CachedMember {
    Own(MemberKey),
    Light(Arc<LightMember>),
}

#[derive(Default)]
pub(crate) struct ClassInnerStuffCache {
    pub(crate) own_fields: CachedValue<Vec<MemberKey>>,
    pub(crate) own_methods: CachedValue<Vec<MemberKey>>,
    pub(crate) own_inner_classes: CachedValue<Vec<MemberKey>>,
    pub(crate) record_components: CachedValue<Vec<MemberKey>>,
    pub(crate) fields: CachedValue<Vec<CachedMember>>,
    pub(crate) methods: CachedValue<Vec<CachedMember>>,
    pub(crate) inner_classes: CachedValue<Vec<CachedMember>>,
    /// First declaration of each name.
    pub(crate) field_map: CachedValue<FxHashMap<String, MemberKey>>,
    pub(crate) method_map: CachedValue<FxHashMap<String, Vec<MemberKey>>>,
    pub(crate) inner_class_map: CachedValue<FxHashMap<String, MemberKey>>,
    pub(crate) interner: MemberInterner,
}

/// Canonical instances of the light members contributed to one class.
///
/// The table belongs to one modification stamp. A newer stamp discards it;
/// a caller still working under an older stamp gets a fresh, unshared
/// instance.
#[derive(Default)]
pub(crate) struct MemberInterner {
    table: Mutex<(u64, FxHashSet<Arc<LightMember>>)>,
}

impl MemberInterner {
    pub(crate) fn intern(&self, stamp: u64, member: LightMember) -> Arc<LightMember> {
        let mut table = self.table.lock();
        if table.0 < stamp {
            trace!(old = table.0, new = stamp, dropped = table.1.len(), "interner reset");
            table.1.clear();
            table.0 = stamp;
        } else if table.0 > stamp {
            return Arc::new(member);
        }
        if let Some(existing) = table.1.get(&member) {
            return Arc::clone(existing);
        }
        let interned = Arc::new(member);
        table.1.insert(Arc::clone(&interned));
        interned
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.table.lock().1.len()
    }
}

#[cfg(test)]
mod tests;
