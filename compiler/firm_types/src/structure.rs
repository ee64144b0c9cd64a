//! Struct types.

use firm_store::{IrStore, TypeList, TypeRef, TypeTag};

use crate::layout::{ensure_undefined, fix_layout};
use crate::{compound, Entity, HasLayout, LayoutError};

/// An ordered record of member entities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructType(TypeRef);

impl StructType {
    pub fn new(store: &mut dyn IrStore) -> Self {
        StructType(store.new_type(TypeTag::STRUCT))
    }

    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        StructType(ty)
    }

    /// Create a member of type `ty` and append it.
    pub fn add_member(
        self,
        store: &mut dyn IrStore,
        name: &str,
        ty: TypeRef,
    ) -> Result<Entity, LayoutError> {
        compound::add_member(store, self.0, name, ty)
    }

    pub fn members(self, store: &dyn IrStore) -> Vec<Entity> {
        compound::members(store, self.0)
    }

    pub fn n_members(self, store: &dyn IrStore) -> usize {
        store.type_list(self.0, TypeList::Members).len()
    }

    pub fn member(self, store: &dyn IrStore, index: usize) -> Option<Entity> {
        self.members(store).get(index).copied()
    }
}

impl HasLayout for StructType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        let (size, align) = compound::layout_members(store, self.0)?;
        fix_layout(store, self.0, size, align);
        Ok(())
    }
}
