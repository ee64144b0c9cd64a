//! Array types.
//!
//! An array has an element type, a fixed number of dimensions and one
//! `(lower, upper)` bound pair per dimension. Bounds are either constants or
//! graph nodes; only constant bounds can be laid out.

use firm_store::{EntityAttr, IrStore, NodeRef, RawValue, TypeAttr, TypeList, TypeRef, TypeTag};

use crate::layout::{
    ensure_dependency, ensure_undefined, fix_layout, fixed_alignment, fixed_size, read_u32,
};
use crate::{Entity, HasLayout, LayoutError};

/// One array bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayBound {
    Const(i64),
    /// Computed at run time by this node (variable length arrays).
    Node(NodeRef),
}

impl ArrayBound {
    fn to_raw(self) -> RawValue {
        match self {
            ArrayBound::Const(v) => RawValue::Int(v),
            ArrayBound::Node(n) => RawValue::Node(n),
        }
    }

    #[track_caller]
    fn from_raw(value: RawValue, ty: TypeRef) -> Option<Self> {
        match value {
            RawValue::Absent => None,
            RawValue::Int(v) => Some(ArrayBound::Const(v)),
            RawValue::Node(n) => Some(ArrayBound::Node(n)),
            other => panic!("store corruption: array bound of {ty:?} holds {}", other.shape()),
        }
    }
}

impl From<i64> for ArrayBound {
    fn from(v: i64) -> Self {
        ArrayBound::Const(v)
    }
}

impl From<i32> for ArrayBound {
    fn from(v: i32) -> Self {
        ArrayBound::Const(i64::from(v))
    }
}

impl From<NodeRef> for ArrayBound {
    fn from(n: NodeRef) -> Self {
        ArrayBound::Node(n)
    }
}

/// A multi-dimensional array of one element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayType(TypeRef);

impl ArrayType {
    /// An array of `element` with `dimensions` unset bound pairs.
    ///
    /// The element entity (how one element is embedded in the array) is
    /// created here, owned by the array at offset 0.
    pub fn new(store: &mut dyn IrStore, element: TypeRef, dimensions: usize) -> Self {
        let ty = store.new_type(TypeTag::ARRAY);
        store.set_type_attr(ty, TypeAttr::ElementType, RawValue::Type(element));
        store.set_type_attr(ty, TypeAttr::Dimensions, RawValue::Int(dim_count(dimensions)));
        store.resize_type_list(ty, TypeList::LowerBounds, dimensions);
        store.resize_type_list(ty, TypeList::UpperBounds, dimensions);

        let elem = store.new_entity("elem_ent", element);
        store.set_entity_attr(elem, EntityAttr::Owner, RawValue::Type(ty));
        store.set_entity_attr(elem, EntityAttr::Offset, RawValue::Int(0));
        store.set_type_attr(ty, TypeAttr::ElementEntity, RawValue::Entity(elem));
        ArrayType(ty)
    }

    pub(crate) const fn from_ref(ty: TypeRef) -> Self {
        ArrayType(ty)
    }

    pub fn element_type(self, store: &dyn IrStore) -> TypeRef {
        store
            .type_attr(self.0, TypeAttr::ElementType)
            .expect_type(&(self.0, TypeAttr::ElementType))
            .unwrap_or_else(|| panic!("array {:?} has no element type", self.0))
    }

    /// Change the element type. The element entity follows.
    pub fn set_element_type(
        self,
        store: &mut dyn IrStore,
        element: TypeRef,
    ) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        store.set_type_attr(self.0, TypeAttr::ElementType, RawValue::Type(element));
        let elem = self.element_entity(store);
        store.set_entity_attr(elem.entity_ref(), EntityAttr::Type, RawValue::Type(element));
        Ok(())
    }

    pub fn element_entity(self, store: &dyn IrStore) -> Entity {
        let entity = store
            .type_attr(self.0, TypeAttr::ElementEntity)
            .expect_entity(&(self.0, TypeAttr::ElementEntity))
            .unwrap_or_else(|| panic!("array {:?} has no element entity", self.0));
        Entity::from_ref(entity)
    }

    pub fn dimensions(self, store: &dyn IrStore) -> usize {
        read_u32(store, self.0, TypeAttr::Dimensions).map_or(0, |d| d as usize)
    }

    fn check_dim(self, store: &dyn IrStore, dim: usize) -> Result<(), LayoutError> {
        let dimensions = self.dimensions(store);
        if dim < dimensions {
            Ok(())
        } else {
            Err(LayoutError::DimensionOutOfRange {
                ty: self.0,
                dim,
                dimensions,
            })
        }
    }

    fn bound(
        self,
        store: &dyn IrStore,
        list: TypeList,
        dim: usize,
    ) -> Result<Option<ArrayBound>, LayoutError> {
        self.check_dim(store, dim)?;
        let raw = store.type_list(self.0, list)[dim];
        Ok(ArrayBound::from_raw(raw, self.0))
    }

    fn set_bound(
        self,
        store: &mut dyn IrStore,
        list: TypeList,
        dim: usize,
        bound: ArrayBound,
    ) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        self.check_dim(store, dim)?;
        store.set_type_list(self.0, list, dim, bound.to_raw());
        Ok(())
    }

    pub fn lower_bound(
        self,
        store: &dyn IrStore,
        dim: usize,
    ) -> Result<Option<ArrayBound>, LayoutError> {
        self.bound(store, TypeList::LowerBounds, dim)
    }

    pub fn upper_bound(
        self,
        store: &dyn IrStore,
        dim: usize,
    ) -> Result<Option<ArrayBound>, LayoutError> {
        self.bound(store, TypeList::UpperBounds, dim)
    }

    pub fn set_lower_bound(
        self,
        store: &mut dyn IrStore,
        dim: usize,
        bound: impl Into<ArrayBound>,
    ) -> Result<(), LayoutError> {
        self.set_bound(store, TypeList::LowerBounds, dim, bound.into())
    }

    pub fn set_upper_bound(
        self,
        store: &mut dyn IrStore,
        dim: usize,
        bound: impl Into<ArrayBound>,
    ) -> Result<(), LayoutError> {
        self.set_bound(store, TypeList::UpperBounds, dim, bound.into())
    }

    /// Set both bounds of `dim`.
    pub fn set_bounds(
        self,
        store: &mut dyn IrStore,
        dim: usize,
        lower: impl Into<ArrayBound>,
        upper: impl Into<ArrayBound>,
    ) -> Result<(), LayoutError> {
        // Validate before the first write so a failure leaves both bounds untouched.
        ensure_undefined(store, self.0)?;
        self.check_dim(store, dim)?;
        self.set_lower_bound(store, dim, lower)?;
        self.set_upper_bound(store, dim, upper)
    }

    /// Number of elements along `dim`, if both bounds are constants.
    fn extent(self, store: &dyn IrStore, dim: usize) -> Result<u64, LayoutError> {
        let lower = self.lower_bound(store, dim)?;
        let upper = self.upper_bound(store, dim)?;
        let (lower, upper) = match (lower, upper) {
            (Some(ArrayBound::Const(lo)), Some(ArrayBound::Const(hi))) => (lo, hi),
            (Some(ArrayBound::Node(node)), _) | (_, Some(ArrayBound::Node(node))) => {
                return Err(LayoutError::DynamicBound { ty: self.0, dim, node });
            }
            _ => return Err(LayoutError::UnsetBound { ty: self.0, dim }),
        };
        let extent = i128::from(upper) - i128::from(lower);
        if extent < 0 {
            return Err(LayoutError::NegativeExtent {
                ty: self.0,
                dim,
                lower,
                upper,
            });
        }
        u64::try_from(extent).map_err(|_| LayoutError::SizeOverflow { ty: self.0 })
    }
}

fn dim_count(dimensions: usize) -> i64 {
    i64::try_from(dimensions).unwrap_or_else(|_| panic!("{dimensions} array dimensions"))
}

impl HasLayout for ArrayType {
    fn type_ref(self) -> TypeRef {
        self.0
    }

    /// `size = element size * product(upper - lower)`; zero dimensions give
    /// size 0. The element type must already be laid out.
    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        ensure_undefined(store, self.0)?;
        let element = self.element_type(store);
        ensure_dependency(store, self.0, element)?;

        let dimensions = self.dimensions(store);
        let mut count: u64 = u64::from(dimensions > 0);
        for dim in 0..dimensions {
            let extent = self.extent(store, dim)?;
            count = count
                .checked_mul(extent)
                .ok_or(LayoutError::SizeOverflow { ty: self.0 })?;
        }

        let elem_size = fixed_size(store, element)?;
        let size = count
            .checked_mul(u64::from(elem_size))
            .and_then(|s| u32::try_from(s).ok())
            .ok_or(LayoutError::SizeOverflow { ty: self.0 })?;
        let align = match read_u32(store, self.0, TypeAttr::AlignBytes) {
            Some(align) => align,
            None => fixed_alignment(store, element)?,
        };
        fix_layout(store, self.0, size, align);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
