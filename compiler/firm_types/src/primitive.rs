//! Primitive types: a mode with a layout.

use firm_mode::Mode;
use firm_store::{IrStore, RawValue, TypeAttr, TypeRef, TypeTag};

use crate::layout::{ensure_undefined, fix_layout, read_u32};
use crate::{HasLayout, LayoutError};

/// A type whose values are exactly the values of a data or boolean mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveType(TypeRef);

fn check_mode(mode: Mode) -> Result<(), LayoutError> {
    if mode.is_datab() {
        Ok(())
    } else {
        Err(LayoutError::InvalidPrimitiveMode { mode })
    }
}

impl PrimitiveType {
    pub fn new(store: &mut dyn IrStore, mode: Mode) -> Result<Self, LayoutError> {
        check_mode(mode)?;
        let ty = store.new_type(TypeTag::PRIMITIVE);
        store.set_type_attr(ty, TypeAttr::Mode, RawValue::Mode(mode));
        Ok(PrimitiveType(ty))
    }

    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        PrimitiveType(ty)
    }

    pub fn set_mode(self, store: &mut dyn IrStore, mode: Mode) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        check_mode(mode)?;
        store.set_type_attr(self.0, TypeAttr::Mode, RawValue::Mode(mode));
        Ok(())
    }

    /// The backing mode.
    pub fn primitive_mode(self, store: &dyn IrStore) -> Mode {
        self.mode(store)
            .unwrap_or_else(|| panic!("primitive {:?} has no mode", self.0))
    }
}

impl HasLayout for PrimitiveType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        let size = self.primitive_mode(store).size_bytes();
        let align = read_u32(store, self.0, TypeAttr::AlignBytes)
            .unwrap_or_else(|| size.max(1).next_power_of_two());
        fix_layout(store, self.0, size, align);
        Ok(())
    }
}
