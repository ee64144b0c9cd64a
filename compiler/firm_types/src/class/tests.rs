#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{int32, store};
use crate::MethodType;

fn method(store: &mut dyn IrStore) -> TypeRef {
    let m = MethodType::new(store, &[], &[]);
    m.finish_layout(store).unwrap();
    m.type_ref()
}

#[test]
fn hierarchy_edges_are_kept_on_both_ends() {
    let mut s = store();
    let base = ClassType::new(&mut s);
    let mid = ClassType::new(&mut s);
    let leaf = ClassType::new(&mut s);
    mid.add_supertype(&mut s, base).unwrap();
    leaf.add_supertype(&mut s, mid).unwrap();
    leaf.add_supertype(&mut s, mid).unwrap();

    assert_eq!(leaf.supertypes(&s), vec![mid]);
    assert_eq!(base.subtypes(&s), vec![mid]);
    assert!(leaf.is_subclass_of(&s, base));
    assert!(!base.is_subclass_of(&s, leaf));
    assert!(!leaf.is_subclass_of(&s, leaf));
}

#[test]
fn diamond_is_allowed() {
    let mut s = store();
    let top = ClassType::new(&mut s);
    let left = ClassType::new(&mut s);
    let right = ClassType::new(&mut s);
    let bottom = ClassType::new(&mut s);
    left.add_supertype(&mut s, top).unwrap();
    right.add_supertype(&mut s, top).unwrap();
    bottom.add_supertype(&mut s, left).unwrap();
    bottom.add_supertype(&mut s, right).unwrap();
    assert!(bottom.is_subclass_of(&s, top));
    assert_eq!(top.subtypes(&s), vec![left, right]);
}

#[test]
fn cycles_are_rejected() {
    let mut s = store();
    let a = ClassType::new(&mut s);
    let b = ClassType::new(&mut s);
    b.add_supertype(&mut s, a).unwrap();
    assert_eq!(
        a.add_supertype(&mut s, b),
        Err(LayoutError::InheritanceCycle {
            class: a.type_ref(),
            supertype: b.type_ref(),
        })
    );
    assert!(matches!(
        a.add_supertype(&mut s, a),
        Err(LayoutError::InheritanceCycle { .. })
    ));
}

#[test]
fn removing_a_supertype() {
    let mut s = store();
    let a = ClassType::new(&mut s);
    let b = ClassType::new(&mut s);
    b.add_supertype(&mut s, a).unwrap();
    assert_eq!(b.remove_supertype(&mut s, a), Ok(true));
    assert_eq!(b.remove_supertype(&mut s, a), Ok(false));
    assert!(b.supertypes(&s).is_empty());
    assert!(a.subtypes(&s).is_empty());
}

#[test]
fn supertypes_must_be_laid_out_first() {
    let mut s = store();
    let base = ClassType::new(&mut s);
    let derived = ClassType::new(&mut s);
    derived.add_supertype(&mut s, base).unwrap();
    assert_eq!(
        derived.finish_layout(&mut s),
        Err(LayoutError::DependencyNotFixed {
            ty: derived.type_ref(),
            dependency: base.type_ref(),
        })
    );
}

#[test]
fn vtable_slots_follow_inherited_ones() {
    let mut s = store();
    let int = int32(&mut s).type_ref();
    let sig = method(&mut s);

    let base = ClassType::new(&mut s);
    let run = base.add_member(&mut s, "run", sig).unwrap();
    let stop = base.add_member(&mut s, "stop", sig).unwrap();
    base.add_member(&mut s, "state", int).unwrap();
    base.finish_layout(&mut s).unwrap();
    assert_eq!(run.vtable_number(&s), Some(0));
    assert_eq!(stop.vtable_number(&s), Some(1));
    assert_eq!(base.vtable_size(&s), Ok(2));
    assert_eq!(base.size_bytes(&s), Ok(4));

    let derived = ClassType::new(&mut s);
    derived.add_supertype(&mut s, base).unwrap();
    let run_override = derived.add_member(&mut s, "run", sig).unwrap();
    run_override.set_vtable_number(&mut s, 0).unwrap();
    let extra = derived.add_member(&mut s, "extra", sig).unwrap();
    derived.finish_layout(&mut s).unwrap();

    assert_eq!(run_override.vtable_number(&s), Some(0));
    assert_eq!(extra.vtable_number(&s), Some(2));
    assert_eq!(derived.vtable_size(&s), Ok(3));
}

#[test]
fn vtable_size_needs_fixed_layout() {
    let mut s = store();
    let c = ClassType::new(&mut s);
    assert_eq!(
        c.vtable_size(&s),
        Err(LayoutError::LayoutNotFixed { ty: c.type_ref() })
    );
}
