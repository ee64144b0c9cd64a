//! Method (procedure signature) types.

use bitflags::bitflags;
use firm_store::{IrStore, RawValue, TypeAttr, TypeList, TypeRef, TypeTag};

use crate::layout::{ensure_undefined, fix_layout};
use crate::{HasLayout, LayoutError};

bitflags! {
    /// Additional properties of a procedure beyond its signature.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MethodProperties: u32 {
        /// No side effects, result depends only on arguments.
        const CONST = 0x1;
        /// No side effects, may read memory.
        const PURE = 0x2;
        const NORETURN = 0x4;
        const NOTHROW = 0x8;
        /// No prologue or epilogue.
        const NAKED = 0x10;
        /// Returns fresh, unaliased memory.
        const MALLOC = 0x20;
        const RETURNS_TWICE = 0x40;
        const INTRINSIC = 0x80;
        /// Part of the language runtime.
        const RUNTIME = 0x100;
        /// Not visible outside the compilation unit.
        const PRIVATE = 0x200;
        /// Contains a loop, so may not terminate.
        const HAS_LOOP = 0x400;
    }
}

/// Parameter and result types of a procedure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodType(TypeRef);

impl MethodType {
    pub fn new(store: &mut dyn IrStore, params: &[TypeRef], results: &[TypeRef]) -> Self {
        let ty = store.new_type(TypeTag::METHOD);
        for &param in params {
            store.push_type_list(ty, TypeList::Params, RawValue::Type(param));
        }
        for &result in results {
            store.push_type_list(ty, TypeList::Results, RawValue::Type(result));
        }
        MethodType(ty)
    }

    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        MethodType(ty)
    }

    fn entries(self, store: &dyn IrStore, list: TypeList) -> Vec<TypeRef> {
        store
            .type_list(self.0, list)
            .iter()
            .map(|v| {
                v.expect_type(&(self.0, list))
                    .unwrap_or_else(|| panic!("{list:?} of {:?} has a hole", self.0))
            })
            .collect()
    }

    fn entry(
        self,
        store: &dyn IrStore,
        list: TypeList,
        index: usize,
    ) -> Result<TypeRef, LayoutError> {
        let entries = self.entries(store, list);
        entries
            .get(index)
            .copied()
            .ok_or(LayoutError::IndexOutOfRange {
                ty: self.0,
                index,
                len: entries.len(),
            })
    }

    fn set_entry(
        self,
        store: &mut dyn IrStore,
        list: TypeList,
        index: usize,
        ty: TypeRef,
    ) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        let len = store.type_list(self.0, list).len();
        if index >= len {
            return Err(LayoutError::IndexOutOfRange {
                ty: self.0,
                index,
                len,
            });
        }
        store.set_type_list(self.0, list, index, RawValue::Type(ty));
        Ok(())
    }

    pub fn n_params(self, store: &dyn IrStore) -> usize {
        store.type_list(self.0, TypeList::Params).len()
    }

    pub fn params(self, store: &dyn IrStore) -> Vec<TypeRef> {
        self.entries(store, TypeList::Params)
    }

    pub fn param(self, store: &dyn IrStore, index: usize) -> Result<TypeRef, LayoutError> {
        self.entry(store, TypeList::Params, index)
    }

    pub fn set_param(
        self,
        store: &mut dyn IrStore,
        index: usize,
        ty: TypeRef,
    ) -> Result<(), LayoutError> {
        self.set_entry(store, TypeList::Params, index, ty)
    }

    pub fn n_results(self, store: &dyn IrStore) -> usize {
        store.type_list(self.0, TypeList::Results).len()
    }

    pub fn results(self, store: &dyn IrStore) -> Vec<TypeRef> {
        self.entries(store, TypeList::Results)
    }

    pub fn result(self, store: &dyn IrStore, index: usize) -> Result<TypeRef, LayoutError> {
        self.entry(store, TypeList::Results, index)
    }

    pub fn set_result(
        self,
        store: &mut dyn IrStore,
        index: usize,
        ty: TypeRef,
    ) -> Result<(), LayoutError> {
        self.set_entry(store, TypeList::Results, index, ty)
    }

    pub fn is_variadic(self, store: &dyn IrStore) -> bool {
        store
            .type_attr(self.0, TypeAttr::Variadic)
            .expect_flag(&(self.0, TypeAttr::Variadic))
            .unwrap_or(false)
    }

    pub fn set_variadic(self, store: &mut dyn IrStore, variadic: bool) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        store.set_type_attr(self.0, TypeAttr::Variadic, RawValue::Flag(variadic));
        Ok(())
    }

    pub fn properties(self, store: &dyn IrStore) -> MethodProperties {
        let bits = store
            .type_attr(self.0, TypeAttr::Properties)
            .expect_int(&(self.0, TypeAttr::Properties))
            .unwrap_or(0);
        MethodProperties::from_bits_truncate(u32::try_from(bits).unwrap_or(0))
    }

    /// Replace the property set. Analyses refine properties after layout,
    /// so this is allowed in either state.
    pub fn set_properties(self, store: &mut dyn IrStore, props: MethodProperties) {
        store.set_type_attr(
            self.0,
            TypeAttr::Properties,
            RawValue::Int(i64::from(props.bits())),
        );
    }

    pub fn add_properties(self, store: &mut dyn IrStore, props: MethodProperties) {
        let merged = self.properties(store) | props;
        self.set_properties(store, merged);
    }
}

impl HasLayout for MethodType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    /// Procedures have no byte size; this only freezes the signature.
    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        fix_layout(store, self.0, 0, 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_helpers::{int32, int8, store};

    #[test]
    fn signature_accessors() {
        let mut s = store();
        let i = int32(&mut s).type_ref();
        let b = int8(&mut s).type_ref();
        let m = MethodType::new(&mut s, &[i, b], &[i]);
        assert_eq!(m.n_params(&s), 2);
        assert_eq!(m.params(&s), vec![i, b]);
        assert_eq!(m.result(&s, 0), Ok(i));
        assert_eq!(
            m.param(&s, 2),
            Err(LayoutError::IndexOutOfRange {
                ty: m.type_ref(),
                index: 2,
                len: 2
            })
        );

        m.set_param(&mut s, 1, i).unwrap();
        assert_eq!(m.param(&s, 1), Ok(i));
    }

    #[test]
    fn signature_freezes_but_properties_do_not() {
        let mut s = store();
        let i = int32(&mut s).type_ref();
        let m = MethodType::new(&mut s, &[], &[i]);
        m.set_variadic(&mut s, true).unwrap();
        m.finish_layout(&mut s).unwrap();

        assert!(m.is_variadic(&s));
        assert_eq!(m.size_bytes(&s), Ok(0));
        assert_eq!(
            m.set_result(&mut s, 0, i),
            Err(LayoutError::AlreadyFixed { ty: m.type_ref() })
        );

        m.add_properties(&mut s, MethodProperties::PURE);
        m.add_properties(&mut s, MethodProperties::NOTHROW);
        assert_eq!(
            m.properties(&s),
            MethodProperties::PURE | MethodProperties::NOTHROW
        );
    }

    #[test]
    fn property_bits_are_stable() {
        assert_eq!(MethodProperties::CONST.bits(), 0x1);
        assert_eq!(MethodProperties::NORETURN.bits(), 0x4);
        assert_eq!(MethodProperties::HAS_LOOP.bits(), 0x400);
    }
}
