#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use firm_mode::modes;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::store;
use crate::{ArrayType, ClassType, PointerType, PrimitiveType, StructType};

#[test]
fn dependencies_are_finished_first() {
    let mut s = store();
    let int = PrimitiveType::new(&mut s, modes().is).unwrap();
    let byte = PrimitiveType::new(&mut s, modes().bu).unwrap();
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 0, 3).unwrap();
    let st = StructType::new(&mut s);
    st.add_member(&mut s, "tag", byte.type_ref()).unwrap();
    st.add_member(&mut s, "items", arr.type_ref()).unwrap();

    let order = finish_layout_all(&mut s, &[st.type_ref()]).unwrap();
    assert_eq!(
        order,
        vec![byte.type_ref(), int.type_ref(), arr.type_ref(), st.type_ref()]
    );
    assert_eq!(st.size_bytes(&s), Ok(16));
}

#[test]
fn already_fixed_types_are_skipped() {
    let mut s = store();
    let int = PrimitiveType::new(&mut s, modes().is).unwrap();
    int.finish_layout(&mut s).unwrap();
    let st = StructType::new(&mut s);
    st.add_member(&mut s, "x", int.type_ref()).unwrap();

    let order = finish_layout_all(&mut s, &[st.type_ref(), st.type_ref()]).unwrap();
    assert_eq!(order, vec![st.type_ref()]);
}

#[test]
fn self_containment_is_a_cycle() {
    let mut s = store();
    let st = StructType::new(&mut s);
    st.add_member(&mut s, "me", st.type_ref()).unwrap();
    assert_eq!(
        finish_layout_all(&mut s, &[st.type_ref()]),
        Err(LayoutError::ContainmentCycle { ty: st.type_ref() })
    );
}

#[test]
fn mutual_containment_through_arrays_is_a_cycle() {
    let mut s = store();
    let a = StructType::new(&mut s);
    let arr = ArrayType::new(&mut s, a.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 0, 2).unwrap();
    let b = StructType::new(&mut s);
    b.add_member(&mut s, "many", arr.type_ref()).unwrap();
    a.add_member(&mut s, "b", b.type_ref()).unwrap();

    assert!(matches!(
        finish_layout_all(&mut s, &[a.type_ref()]),
        Err(LayoutError::ContainmentCycle { .. })
    ));
}

#[test]
fn recursion_through_pointers_is_fine() {
    let mut s = store();
    let node = StructType::new(&mut s);
    let next = PointerType::new(&mut s, node.type_ref());
    let value = PrimitiveType::new(&mut s, modes().ls).unwrap();
    node.add_member(&mut s, "value", value.type_ref()).unwrap();
    node.add_member(&mut s, "next", next.type_ref()).unwrap();

    finish_layout_all(&mut s, &[node.type_ref()]).unwrap();
    assert_eq!(node.size_bytes(&s), Ok(16));
    assert!(next.is_layout_fixed(&s));
}

#[test]
fn class_supertypes_are_scheduled() {
    let mut s = store();
    let base = ClassType::new(&mut s);
    let derived = ClassType::new(&mut s);
    derived.add_supertype(&mut s, base).unwrap();

    let order = finish_layout_all(&mut s, &[derived.type_ref()]).unwrap();
    assert_eq!(order, vec![base.type_ref(), derived.type_ref()]);
}

#[test]
fn failures_leave_the_failing_type_undefined() {
    let mut s = store();
    let int = PrimitiveType::new(&mut s, modes().is).unwrap();
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 4, 1).unwrap();

    assert!(matches!(
        finish_layout_all(&mut s, &[arr.type_ref()]),
        Err(LayoutError::NegativeExtent { .. })
    ));
    assert!(int.is_layout_fixed(&s));
    assert!(!arr.is_layout_fixed(&s));
}
