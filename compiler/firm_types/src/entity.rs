//! Entities: named, located bindings of a type.

use firm_store::{
    DispatchError, EntityAttr, EntityRef, GraphAnchor, GraphRef, IrStore, NodeRef, RawValue,
    TypeList, TypeRef,
};

use crate::layout::ensure_undefined;
use crate::{LayoutError, Type};

/// A global datum, a compound member or a procedure.
///
/// Entities carry no kind tag, so any `EntityRef` the store hands out is an
/// `Entity`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entity(EntityRef);

impl Entity {
    /// A free-standing entity of type `ty`.
    pub fn new(store: &mut dyn IrStore, name: &str, ty: TypeRef) -> Self {
        Entity(store.new_entity(name, ty))
    }

    #[inline]
    pub const fn from_ref(entity: EntityRef) -> Self {
        Entity(entity)
    }

    #[inline]
    pub const fn entity_ref(self) -> EntityRef {
        self.0
    }

    pub fn name(self, store: &dyn IrStore) -> &str {
        store.entity_name(self.0)
    }

    /// Handle of the entity's type.
    pub fn type_ref(self, store: &dyn IrStore) -> TypeRef {
        store
            .entity_attr(self.0, EntityAttr::Type)
            .expect_type(&(self.0, EntityAttr::Type))
            .unwrap_or_else(|| panic!("entity {:?} has no type", self.0))
    }

    /// The entity's type as a variant.
    pub fn ty(self, store: &dyn IrStore) -> Result<Type, DispatchError> {
        Type::wrap(store, self.type_ref(store))
    }

    /// Retype the entity. Members of a laid out compound are frozen with it.
    pub fn set_type(self, store: &mut dyn IrStore, ty: TypeRef) -> Result<(), LayoutError> {
        if let Some(owner) = self.owner(store) {
            ensure_undefined(store, owner)?;
        }
        store.set_entity_attr(self.0, EntityAttr::Type, RawValue::Type(ty));
        Ok(())
    }

    /// The compound (or array) this entity is a member of.
    pub fn owner(self, store: &dyn IrStore) -> Option<TypeRef> {
        store
            .entity_attr(self.0, EntityAttr::Owner)
            .expect_type(&(self.0, EntityAttr::Owner))
    }

    /// Byte offset within the owner, once placed.
    pub fn offset(self, store: &dyn IrStore) -> Option<u32> {
        store
            .entity_attr(self.0, EntityAttr::Offset)
            .expect_int(&(self.0, EntityAttr::Offset))
            .map(|v| {
                u32::try_from(v)
                    .unwrap_or_else(|_| panic!("offset of {:?} out of range: {v}", self.0))
            })
    }

    /// Make this entity a member of `compound`.
    ///
    /// The compound must still be undefined; this is the normal construction
    /// order (members first, then `finish_layout` on the compound). With an
    /// explicit `offset` the member is placed there, otherwise layout assigns
    /// the next aligned offset.
    pub fn bind_to(
        self,
        store: &mut dyn IrStore,
        compound: TypeRef,
        offset: Option<u32>,
    ) -> Result<(), LayoutError> {
        if !store.type_tag(compound).is_compound() {
            return Err(LayoutError::NotACompound { ty: compound });
        }
        ensure_undefined(store, compound)?;
        if let Some(owner) = self.owner(store) {
            return Err(LayoutError::MemberAlreadyBound {
                entity: self.0,
                owner,
            });
        }

        store.push_type_list(compound, TypeList::Members, RawValue::Entity(self.0));
        store.set_entity_attr(self.0, EntityAttr::Owner, RawValue::Type(compound));
        store.set_entity_attr(
            self.0,
            EntityAttr::Offset,
            offset.map(|o| RawValue::Int(i64::from(o))).unwrap_or_default(),
        );
        tracing::trace!(entity = ?self.0, ?compound, ?offset, "bound member");
        Ok(())
    }

    /// Linked procedure graph.
    pub fn graph(self, store: &dyn IrStore) -> Option<GraphRef> {
        store
            .entity_attr(self.0, EntityAttr::Graph)
            .expect_graph(&(self.0, EntityAttr::Graph))
    }

    /// Create the procedure graph for this entity.
    pub fn create_graph(self, store: &mut dyn IrStore) -> GraphRef {
        store.new_graph(self.0)
    }

    /// End node of the linked procedure graph, the root for traversals.
    pub fn end_node(self, store: &dyn IrStore) -> Option<NodeRef> {
        self.graph(store)
            .and_then(|g| store.graph_anchor(g, GraphAnchor::End))
    }

    /// Virtual table slot of a method member.
    pub fn vtable_number(self, store: &dyn IrStore) -> Option<u32> {
        store
            .entity_attr(self.0, EntityAttr::VtableNumber)
            .expect_int(&(self.0, EntityAttr::VtableNumber))
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Reserve a slot before layout, e.g. to reuse the slot of an overridden
    /// method. Slots of a laid out class are frozen with it.
    pub fn set_vtable_number(
        self,
        store: &mut dyn IrStore,
        slot: u32,
    ) -> Result<(), LayoutError> {
        if let Some(owner) = self.owner(store) {
            ensure_undefined(store, owner)?;
        }
        store.set_entity_attr(self.0, EntityAttr::VtableNumber, RawValue::Int(i64::from(slot)));
        Ok(())
    }
}

#[cfg(test)]
mod tests;
