#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use firm_mode::modes;
use firm_store::{GraphAnchor, OpTag, TypeTag};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{int32, store};
use crate::{ClassType, HasLayout, MethodType, StructType};

#[test]
fn free_entity_has_no_owner() {
    let mut s = store();
    let int = int32(&mut s);
    let e = Entity::new(&mut s, "counter", int.type_ref());
    assert_eq!(e.name(&s), "counter");
    assert_eq!(e.type_ref(&s), int.type_ref());
    assert_eq!(e.owner(&s), None);
    assert_eq!(e.offset(&s), None);
    assert!(matches!(e.ty(&s), Ok(Type::Primitive(_))));
}

#[test]
fn bind_to_appends_a_member() {
    let mut s = store();
    let int = int32(&mut s);
    let st = StructType::new(&mut s);
    let a = Entity::new(&mut s, "a", int.type_ref());
    let b = Entity::new(&mut s, "b", int.type_ref());
    a.bind_to(&mut s, st.type_ref(), None).unwrap();
    b.bind_to(&mut s, st.type_ref(), Some(8)).unwrap();

    assert_eq!(st.members(&s), vec![a, b]);
    assert_eq!(a.owner(&s), Some(st.type_ref()));
    assert_eq!(a.offset(&s), None);
    assert_eq!(b.offset(&s), Some(8));
}

#[test]
fn bind_to_rejects_non_compounds_and_rebinding() {
    let mut s = store();
    let int = int32(&mut s);
    let st = StructType::new(&mut s);
    let e = Entity::new(&mut s, "x", int.type_ref());

    assert_eq!(
        e.bind_to(&mut s, int.type_ref(), None),
        Err(LayoutError::NotACompound { ty: int.type_ref() })
    );
    e.bind_to(&mut s, st.type_ref(), None).unwrap();
    assert_eq!(
        e.bind_to(&mut s, st.type_ref(), None),
        Err(LayoutError::MemberAlreadyBound {
            entity: e.entity_ref(),
            owner: st.type_ref(),
        })
    );
}

#[test]
fn fixed_compounds_accept_no_members() {
    let mut s = store();
    let int = int32(&mut s);
    let st = StructType::new(&mut s);
    st.finish_layout(&mut s).unwrap();
    let e = Entity::new(&mut s, "late", int.type_ref());
    assert_eq!(
        e.bind_to(&mut s, st.type_ref(), None),
        Err(LayoutError::AlreadyFixed { ty: st.type_ref() })
    );
}

#[test]
fn members_of_fixed_compounds_keep_their_type() {
    let mut s = store();
    let int = int32(&mut s);
    let st = StructType::new(&mut s);
    let e = st.add_member(&mut s, "a", int.type_ref()).unwrap();
    st.finish_layout(&mut s).unwrap();
    assert_eq!(
        e.set_type(&mut s, st.type_ref()),
        Err(LayoutError::AlreadyFixed { ty: st.type_ref() })
    );
}

#[test]
fn procedure_entities_expose_their_end_node() {
    let mut s = store();
    let method = s.new_type(TypeTag::METHOD);
    let f = Entity::new(&mut s, "main", method);
    assert_eq!(f.graph(&s), None);
    assert_eq!(f.end_node(&s), None);

    let g = f.create_graph(&mut s);
    let end_block = s.new_node(g, OpTag::from_raw(0), modes().bb, None, &[]);
    let end = s.new_node(g, OpTag::from_raw(2), modes().x, Some(end_block), &[]);
    s.set_graph_anchor(g, GraphAnchor::End, end);

    assert_eq!(f.graph(&s), Some(g));
    assert_eq!(f.end_node(&s), Some(end));
}

#[test]
fn vtable_slots() {
    let mut s = store();
    let method = s.new_type(TypeTag::METHOD);
    let m = Entity::new(&mut s, "run", method);
    assert_eq!(m.vtable_number(&s), None);
    m.set_vtable_number(&mut s, 3).unwrap();
    assert_eq!(m.vtable_number(&s), Some(3));
}

#[test]
fn vtable_slots_freeze_with_the_class() {
    let mut s = store();
    let sig = MethodType::new(&mut s, &[], &[]);
    let class = ClassType::new(&mut s);
    let run = class.add_member(&mut s, "run", sig.type_ref()).unwrap();
    class.finish_layout(&mut s).unwrap();
    assert_eq!(run.vtable_number(&s), Some(0));

    assert_eq!(
        run.set_vtable_number(&mut s, 42),
        Err(LayoutError::AlreadyFixed {
            ty: class.type_ref()
        })
    );
    assert_eq!(run.vtable_number(&s), Some(0));
    assert_eq!(class.vtable_size(&s), Ok(1));
}
