#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use pretty_assertions::assert_eq;

use crate::modes;

#[test]
fn int_widening() {
    let m = modes();
    assert!(m.bs.is_smaller_than(m.is));
    assert!(m.bu.is_smaller_than(m.hs));
    assert!(!m.iu.is_smaller_than(m.is));
    assert!(!m.is.is_smaller_than(m.lu));
    assert!(!m.ls.is_smaller_than(m.is));
    assert!(m.is.is_smaller_than(m.is));
}

#[test]
fn int_to_float_needs_enough_significand() {
    let m = modes();
    assert!(m.hs.is_smaller_than(m.f));
    assert!(m.is.is_smaller_than(m.d));
    assert!(!m.is.is_smaller_than(m.f));
    assert!(!m.ls.is_smaller_than(m.d));
    assert!(m.ls.is_smaller_than(m.e));
    assert!(!m.f.is_smaller_than(m.is));
}

#[test]
fn floats_widen_to_floats() {
    let m = modes();
    assert!(m.f.is_smaller_than(m.d));
    assert!(!m.d.is_smaller_than(m.f));
}

#[test]
fn booleans_fit_in_ints() {
    let m = modes();
    assert!(m.b.values_fit_in(m.bu));
    assert!(!m.b.values_fit_in(m.f));
    assert!(!m.b.is_smaller_than(m.bu));
}

#[test]
fn counterparts() {
    let m = modes();
    assert_eq!(m.is.unsigned_counterpart(), Some(m.iu));
    assert_eq!(m.lu.signed_counterpart(), Some(m.ls));
    assert_eq!(m.hu.unsigned_counterpart(), Some(m.hu));
    assert_eq!(m.p.unsigned_counterpart(), Some(m.lu));
    assert_eq!(m.f.signed_counterpart(), None);
}

#[test]
fn double_width() {
    let m = modes();
    assert_eq!(m.is.double_bits_int_mode(), Some(m.ls));
    assert_eq!(m.lu.double_bits_int_mode(), Some(m.llu));
    assert_eq!(m.lls.double_bits_int_mode(), None);
    assert_eq!(m.d.double_bits_int_mode(), None);
}

#[test]
fn odd_width_counterpart_is_created_on_demand() {
    let half = crate::ModeRegistry::global()
        .get_or_create("I12s", crate::ModeDescriptor::int(12, true))
        .unwrap();
    let wide = half.double_bits_int_mode().unwrap();
    assert_eq!(wide.bit_size(), 24);
    assert!(wide.is_signed());
    assert_ne!(wide, modes().is);
}

#[test]
fn arithmetic_rules() {
    let m = modes();
    assert!(m.d.honors_signed_zeros());
    assert!(!m.is.honors_signed_zeros());
    assert!(m.is.overflows_on_unary_minus());
    assert!(!m.d.overflows_on_unary_minus());
    assert!(m.iu.wraps_around());
    assert!(!m.p.wraps_around());
}

#[test]
fn reinterpret_casts() {
    let m = modes();
    assert!(m.is.is_reinterpret_cast_to(m.iu));
    assert!(m.p.is_reinterpret_cast_to(m.lu));
    assert!(!m.is.is_reinterpret_cast_to(m.f));
    assert!(!m.is.is_reinterpret_cast_to(m.ls));
}
