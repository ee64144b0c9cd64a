//! Compound kinds without a dedicated wrapper (unions, unknown compounds).

use firm_store::{IrStore, TypeRef, TypeTag};

use crate::layout::{ensure_undefined, fix_layout};
use crate::{compound, Entity, HasLayout, LayoutError};

/// A compound without a dedicated wrapper.
///
/// Members overlap like in a union: each one is placed at its explicit
/// offset or at 0. An explicitly set size and alignment act as lower bounds.
/// Without members the type has size 0 and alignment 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpaqueType(TypeRef);

impl OpaqueType {
    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        OpaqueType(ty)
    }

    pub fn tag(self, store: &dyn IrStore) -> TypeTag {
        store.type_tag(self.0)
    }

    pub fn members(self, store: &dyn IrStore) -> Vec<Entity> {
        compound::members(store, self.0)
    }
}

impl HasLayout for OpaqueType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        let (size, align) = compound::overlay_members(store, self.0)?;
        fix_layout(store, self.0, size, align);
        Ok(())
    }
}
