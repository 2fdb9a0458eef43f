use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;

fn values() -> LightMember {
    LightMember::method("values", "E[]")
}

#[test]
fn equal_members_share_one_instance_per_stamp() {
    let interner = MemberInterner::default();
    let first = interner.intern(3, values());
    let second = interner.intern(3, values());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(interner.len(), 1);
}

#[test]
fn a_new_stamp_starts_a_new_table() {
    let interner = MemberInterner::default();
    let before = interner.intern(3, values());
    let after = interner.intern(4, values());
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before, after);
    assert!(Arc::ptr_eq(&after, &interner.intern(4, values())));
}

#[test]
fn stale_callers_do_not_pollute_the_table() {
    let interner = MemberInterner::default();
    let current = interner.intern(5, values());
    let stale = interner.intern(4, LightMember::method("valueOf", "E"));
    assert_eq!(stale.name(), "valueOf");
    assert_eq!(interner.len(), 1);
    assert!(Arc::ptr_eq(&current, &interner.intern(5, values())));
}
