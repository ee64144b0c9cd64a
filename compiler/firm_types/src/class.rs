//! Class types: compounds with an inheritance graph and a virtual table.
//!
//! Supertype and subtype edges are kept as ordered adjacency lists on both
//! ends. The graph is a DAG; an edge that would close a cycle is rejected
//! when it is added.

use firm_store::{IrStore, RawValue, TypeAttr, TypeList, TypeRef, TypeTag};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::layout::{ensure_dependency, ensure_undefined, fix_layout, read_u32, state_of};
use crate::{compound, Entity, HasLayout, LayoutError, LayoutState};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassType(TypeRef);

impl ClassType {
    pub fn new(store: &mut dyn IrStore) -> Self {
        ClassType(store.new_type(TypeTag::CLASS))
    }

    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        ClassType(ty)
    }

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

    fn related(self, store: &dyn IrStore, list: TypeList) -> Vec<ClassType> {
        store
            .type_list(self.0, list)
            .iter()
            .map(|v| {
                let ty = v
                    .expect_type(&(self.0, list))
                    .unwrap_or_else(|| panic!("{list:?} of {:?} has a hole", self.0));
                ClassType(ty)
            })
            .collect()
    }

    /// Direct supertypes, in the order they were added.
    pub fn supertypes(self, store: &dyn IrStore) -> Vec<ClassType> {
        self.related(store, TypeList::Supertypes)
    }

    /// Direct subtypes, in the order they were added.
    pub fn subtypes(self, store: &dyn IrStore) -> Vec<ClassType> {
        self.related(store, TypeList::Subtypes)
    }

    /// Add `supertype` as a direct supertype. Adding an existing edge is a
    /// no-op.
    pub fn add_supertype(
        self,
        store: &mut dyn IrStore,
        supertype: ClassType,
    ) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        if supertype == self || supertype.is_subclass_of(store, self) {
            return Err(LayoutError::InheritanceCycle {
                class: self.0,
                supertype: supertype.0,
            });
        }
        if self.supertypes(store).contains(&supertype) {
            return Ok(());
        }
        store.push_type_list(self.0, TypeList::Supertypes, RawValue::Type(supertype.0));
        store.push_type_list(supertype.0, TypeList::Subtypes, RawValue::Type(self.0));
        tracing::trace!(class = ?self.0, supertype = ?supertype.0, "added supertype");
        Ok(())
    }

    /// Remove a direct supertype edge. Returns whether it existed.
    pub fn remove_supertype(
        self,
        store: &mut dyn IrStore,
        supertype: ClassType,
    ) -> Result<bool, LayoutError> {
        ensure_undefined(store, self.0)?;
        let removed = remove_entry(store, self.0, TypeList::Supertypes, supertype.0);
        if removed {
            remove_entry(store, supertype.0, TypeList::Subtypes, self.0);
        }
        Ok(removed)
    }

    /// Whether `other` is a direct or transitive supertype of `self`.
    pub fn is_subclass_of(self, store: &dyn IrStore, other: ClassType) -> bool {
        let mut visited: FxHashSet<ClassType> = FxHashSet::default();
        let mut stack: SmallVec<[ClassType; 8]> = self.supertypes(store).into_iter().collect();
        while let Some(class) = stack.pop() {
            if class == other {
                return true;
            }
            if visited.insert(class) {
                stack.extend(class.supertypes(store));
            }
        }
        false
    }

    /// Number of virtual table slots, inherited ones included.
    pub fn vtable_size(self, store: &dyn IrStore) -> Result<u32, LayoutError> {
        if state_of(store, self.0) == LayoutState::Undefined {
            return Err(LayoutError::LayoutNotFixed { ty: self.0 });
        }
        Ok(read_u32(store, self.0, TypeAttr::VtableSize).unwrap_or(0))
    }

    /// Assign slots to method members that have none. Inherited slots come
    /// first; preset slots are kept.
    fn layout_vtable(self, store: &mut dyn IrStore) -> Result<u32, LayoutError> {
        let inherited = self
            .supertypes(store)
            .into_iter()
            .map(|sup| read_u32(store, sup.0, TypeAttr::VtableSize).unwrap_or(0))
            .max()
            .unwrap_or(0);

        let methods: Vec<Entity> = self
            .members(store)
            .into_iter()
            .filter(|&m| !compound::is_data_member(store, m))
            .collect();
        let mut next = methods
            .iter()
            .filter_map(|m| m.vtable_number(store))
            .map(|n| n + 1)
            .fold(inherited, u32::max);
        for method in methods {
            if method.vtable_number(store).is_none() {
                method.set_vtable_number(store, next)?;
                next += 1;
            }
        }
        Ok(next)
    }
}

fn remove_entry(store: &mut dyn IrStore, ty: TypeRef, list: TypeList, target: TypeRef) -> bool {
    let entries: Vec<RawValue> = store.type_list(ty, list).to_vec();
    let Some(pos) = entries.iter().position(|&v| v == RawValue::Type(target)) else {
        return false;
    };
    store.resize_type_list(ty, list, 0);
    for (i, value) in entries.into_iter().enumerate() {
        if i != pos {
            store.push_type_list(ty, list, value);
        }
    }
    true
}

impl HasLayout for ClassType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    /// Lays out data members like a struct, then the virtual table.
    /// Supertypes must be laid out first, as their tables are inherited.
    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        for sup in self.supertypes(store) {
            ensure_dependency(store, self.0, sup.0)?;
        }
        let (size, align) = compound::layout_members(store, self.0)?;
        let vtable = self.layout_vtable(store)?;
        store.set_type_attr(self.0, TypeAttr::VtableSize, RawValue::Int(i64::from(vtable)));
        fix_layout(store, self.0, size, align);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
