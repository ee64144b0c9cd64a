#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use firm_mode::modes;
use firm_store::{GraphAnchor, IrStore, OpTag};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::test_helpers::{fixed_primitive, int32, store};
use crate::{LayoutState, PrimitiveType};

#[test]
fn two_dimensional_int_array() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 2);
    arr.set_bounds(&mut s, 0, 0, 10).unwrap();
    arr.set_bounds(&mut s, 1, 0, 5).unwrap();

    assert_eq!(
        arr.size_bytes(&s),
        Err(LayoutError::LayoutNotFixed { ty: arr.type_ref() })
    );
    arr.finish_layout(&mut s).unwrap();
    assert_eq!(arr.size_bytes(&s), Ok(200));
    assert_eq!(arr.alignment_bytes(&s), Ok(4));
    // Reads are stable.
    assert_eq!(arr.size_bytes(&s), Ok(200));
}

#[test]
fn undefined_element_blocks_layout() {
    let mut s = store();
    let elem = PrimitiveType::new(&mut s, modes().is).unwrap();
    let arr = ArrayType::new(&mut s, elem.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 0, 3).unwrap();

    assert_eq!(
        arr.finish_layout(&mut s),
        Err(LayoutError::DependencyNotFixed {
            ty: arr.type_ref(),
            dependency: elem.type_ref(),
        })
    );
    assert_eq!(arr.layout_state(&s), LayoutState::Undefined);
}

#[test]
fn non_zero_lower_bounds() {
    let mut s = store();
    let d = fixed_primitive(&mut s, modes().d);
    let arr = ArrayType::new(&mut s, d.type_ref(), 1);
    arr.set_bounds(&mut s, 0, -2, 3).unwrap();
    arr.finish_layout(&mut s).unwrap();
    assert_eq!(arr.size_bytes(&s), Ok(40));
}

#[test]
fn zero_extent_and_zero_dimensions_give_size_zero() {
    let mut s = store();
    let int = int32(&mut s);

    let empty = ArrayType::new(&mut s, int.type_ref(), 1);
    empty.set_bounds(&mut s, 0, 4, 4).unwrap();
    empty.finish_layout(&mut s).unwrap();
    assert_eq!(empty.size_bytes(&s), Ok(0));

    let dimless = ArrayType::new(&mut s, int.type_ref(), 0);
    dimless.finish_layout(&mut s).unwrap();
    assert_eq!(dimless.size_bytes(&s), Ok(0));
    assert_eq!(dimless.alignment_bytes(&s), Ok(4));
}

#[test]
fn negative_extent_is_rejected() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 5, 2).unwrap();
    assert_eq!(
        arr.finish_layout(&mut s),
        Err(LayoutError::NegativeExtent {
            ty: arr.type_ref(),
            dim: 0,
            lower: 5,
            upper: 2,
        })
    );
}

#[test]
fn unset_bound_is_rejected() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 2);
    arr.set_bounds(&mut s, 0, 0, 2).unwrap();
    arr.set_lower_bound(&mut s, 1, 0).unwrap();
    assert_eq!(
        arr.finish_layout(&mut s),
        Err(LayoutError::UnsetBound {
            ty: arr.type_ref(),
            dim: 1
        })
    );
}

#[test]
fn dynamic_bound_is_rejected() {
    let mut s = store();
    let int = int32(&mut s);
    let method = s.new_type(firm_store::TypeTag::METHOD);
    let owner = s.new_entity("vla", method);
    let g = s.new_graph(owner);
    let block = s.new_node(g, OpTag::from_raw(0), modes().bb, None, &[]);
    s.set_graph_anchor(g, GraphAnchor::StartBlock, block);
    let n = s.new_node(g, OpTag::from_raw(4), modes().is, Some(block), &[]);

    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 0, n).unwrap();
    assert_eq!(arr.upper_bound(&s, 0), Ok(Some(ArrayBound::Node(n))));
    assert_eq!(
        arr.finish_layout(&mut s),
        Err(LayoutError::DynamicBound {
            ty: arr.type_ref(),
            dim: 0,
            node: n,
        })
    );
    assert!(!arr.is_layout_fixed(&s));
}

#[test]
fn dimension_index_is_checked() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    assert_eq!(
        arr.set_bounds(&mut s, 1, 0, 1),
        Err(LayoutError::DimensionOutOfRange {
            ty: arr.type_ref(),
            dim: 1,
            dimensions: 1,
        })
    );
    assert_eq!(arr.lower_bound(&s, 0), Ok(None));
}

#[test]
fn explicit_alignment_overrides_the_element() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 0, 4).unwrap();
    arr.set_alignment_bytes(&mut s, 16).unwrap();
    arr.finish_layout(&mut s).unwrap();
    assert_eq!(arr.alignment_bytes(&s), Ok(16));
    assert_eq!(arr.size_bytes(&s), Ok(16));
}

#[test]
fn fixed_arrays_are_frozen() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    arr.set_bounds(&mut s, 0, 0, 1).unwrap();
    arr.finish_layout(&mut s).unwrap();

    let fixed = Err(LayoutError::AlreadyFixed { ty: arr.type_ref() });
    assert_eq!(arr.finish_layout(&mut s), fixed);
    assert_eq!(arr.set_upper_bound(&mut s, 0, 9), fixed);
    assert_eq!(arr.set_size_bytes(&mut s, 9), fixed);
    assert_eq!(arr.set_element_type(&mut s, int.type_ref()), fixed);
}

#[test]
fn element_entity_is_owned_by_the_array() {
    let mut s = store();
    let int = int32(&mut s);
    let arr = ArrayType::new(&mut s, int.type_ref(), 1);
    let elem = arr.element_entity(&s);
    assert_eq!(elem.owner(&s), Some(arr.type_ref()));
    assert_eq!(elem.offset(&s), Some(0));
    assert_eq!(elem.type_ref(&s), int.type_ref());

    let d = fixed_primitive(&mut s, modes().d);
    arr.set_element_type(&mut s, d.type_ref()).unwrap();
    assert_eq!(elem.type_ref(&s), d.type_ref());
}

proptest! {
    #[test]
    fn size_is_element_size_times_extents(
        bounds in prop::collection::vec((-8i64..8, 0i64..6), 1..4),
        wide in any::<bool>(),
    ) {
        let mut s = store();
        let elem = fixed_primitive(&mut s, if wide { modes().d } else { modes().hs });
        let arr = ArrayType::new(&mut s, elem.type_ref(), bounds.len());
        for (dim, &(lo, len)) in bounds.iter().enumerate() {
            arr.set_bounds(&mut s, dim, lo, lo + len).unwrap();
        }
        arr.finish_layout(&mut s).unwrap();

        let expected: i64 = bounds.iter().map(|&(_, len)| len).product::<i64>()
            * i64::from(elem.size_bytes(&s).unwrap());
        prop_assert_eq!(i64::from(arr.size_bytes(&s).unwrap()), expected);
        prop_assert_eq!(arr.alignment_bytes(&s), elem.alignment_bytes(&s));
    }
}
