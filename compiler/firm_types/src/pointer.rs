//! Pointer types.

use firm_store::{IrStore, RawValue, TypeAttr, TypeRef, TypeTag};

use crate::layout::{ensure_undefined, fix_layout, read_u32};
use crate::{HasLayout, LayoutError};

/// An address of a value of the points-to type.
///
/// The referent is not contained, so a pointer can be laid out before its
/// referent and may point at itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerType(TypeRef);

impl PointerType {
    pub fn new(store: &mut dyn IrStore, points_to: TypeRef) -> Self {
        let ty = store.new_type(TypeTag::POINTER);
        let mode = store.pointer_mode();
        store.set_type_attr(ty, TypeAttr::Mode, RawValue::Mode(mode));
        store.set_type_attr(ty, TypeAttr::PointsTo, RawValue::Type(points_to));
        PointerType(ty)
    }

    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        PointerType(ty)
    }

    pub fn points_to(self, store: &dyn IrStore) -> TypeRef {
        store
            .type_attr(self.0, TypeAttr::PointsTo)
            .expect_type(&(self.0, TypeAttr::PointsTo))
            .unwrap_or_else(|| panic!("pointer {:?} has no referent", self.0))
    }

    /// Retarget the pointer. Allowed in either layout state, as the
    /// referent does not influence the pointer's own layout.
    pub fn set_points_to(self, store: &mut dyn IrStore, points_to: TypeRef) {
        store.set_type_attr(self.0, TypeAttr::PointsTo, RawValue::Type(points_to));
    }
}

impl HasLayout for PointerType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        let target = *store.target();
        let align = read_u32(store, self.0, TypeAttr::AlignBytes)
            .unwrap_or_else(|| target.pointer_alignment());
        fix_layout(store, self.0, target.pointer_size(), align);
        Ok(())
    }
}
