//! The layout state machine shared by every type variant.

use firm_mode::Mode;
use firm_store::{IrStore, RawValue, TypeAttr, TypeRef};

use crate::LayoutError;

/// Layout progress of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutState {
    /// Mutable; size and alignment are not readable.
    Undefined,
    /// Frozen; size and alignment are readable and stable.
    LayoutFixed,
}

/// Capabilities every type variant shares.
///
/// `finish_layout` is the only variant-specific part. The getters fail with
/// [`LayoutError::LayoutNotFixed`] until it succeeded, and the setters fail
/// with [`LayoutError::AlreadyFixed`] afterwards.
pub trait HasLayout: Copy {
    fn type_ref(self) -> TypeRef;

    /// Compute size and alignment and move to [`LayoutState::LayoutFixed`].
    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError>;

    fn layout_state(self, store: &dyn IrStore) -> LayoutState {
        state_of(store, self.type_ref())
    }

    fn is_layout_fixed(self, store: &dyn IrStore) -> bool {
        self.layout_state(store) == LayoutState::LayoutFixed
    }

    fn size_bytes(self, store: &dyn IrStore) -> Result<u32, LayoutError> {
        fixed_size(store, self.type_ref())
    }

    fn alignment_bytes(self, store: &dyn IrStore) -> Result<u32, LayoutError> {
        fixed_alignment(store, self.type_ref())
    }

    /// Preset the size; only some variants keep it through `finish_layout`.
    fn set_size_bytes(self, store: &mut dyn IrStore, size: u32) -> Result<(), LayoutError> {
        let ty = self.type_ref();
        ensure_undefined(store, ty)?;
        store.set_type_attr(ty, TypeAttr::SizeBytes, RawValue::Int(i64::from(size)));
        Ok(())
    }

    /// Override the alignment `finish_layout` would compute.
    fn set_alignment_bytes(self, store: &mut dyn IrStore, align: u32) -> Result<(), LayoutError> {
        let ty = self.type_ref();
        ensure_undefined(store, ty)?;
        if !align.is_power_of_two() {
            return Err(LayoutError::InvalidAlignment { ty, align });
        }
        store.set_type_attr(ty, TypeAttr::AlignBytes, RawValue::Int(i64::from(align)));
        Ok(())
    }

    /// Associated mode of atomic types.
    fn mode(self, store: &dyn IrStore) -> Option<Mode> {
        store
            .type_attr(self.type_ref(), TypeAttr::Mode)
            .expect_mode(&(self.type_ref(), TypeAttr::Mode))
    }
}

pub(crate) fn state_of(store: &dyn IrStore, ty: TypeRef) -> LayoutState {
    let fixed = store
        .type_attr(ty, TypeAttr::LayoutFixed)
        .expect_flag(&(ty, TypeAttr::LayoutFixed))
        .unwrap_or(false);
    if fixed {
        LayoutState::LayoutFixed
    } else {
        LayoutState::Undefined
    }
}

pub(crate) fn ensure_undefined(store: &dyn IrStore, ty: TypeRef) -> Result<(), LayoutError> {
    match state_of(store, ty) {
        LayoutState::Undefined => Ok(()),
        LayoutState::LayoutFixed => Err(LayoutError::AlreadyFixed { ty }),
    }
}

/// Fail unless `dependency` of `ty` is already laid out.
pub(crate) fn ensure_dependency(
    store: &dyn IrStore,
    ty: TypeRef,
    dependency: TypeRef,
) -> Result<(), LayoutError> {
    match state_of(store, dependency) {
        LayoutState::LayoutFixed => Ok(()),
        LayoutState::Undefined => Err(LayoutError::DependencyNotFixed { ty, dependency }),
    }
}

/// Unsigned 32-bit field; anything else is store corruption.
#[track_caller]
pub(crate) fn read_u32(store: &dyn IrStore, ty: TypeRef, attr: TypeAttr) -> Option<u32> {
    store
        .type_attr(ty, attr)
        .expect_int(&(ty, attr))
        .map(|v| {
            u32::try_from(v).unwrap_or_else(|_| panic!("{attr:?} of {ty:?} out of range: {v}"))
        })
}

#[track_caller]
fn read_fixed(store: &dyn IrStore, ty: TypeRef, attr: TypeAttr) -> Result<u32, LayoutError> {
    if state_of(store, ty) == LayoutState::Undefined {
        return Err(LayoutError::LayoutNotFixed { ty });
    }
    Ok(read_u32(store, ty, attr)
        .unwrap_or_else(|| panic!("fixed {ty:?} has no {attr:?}")))
}

pub(crate) fn fixed_size(store: &dyn IrStore, ty: TypeRef) -> Result<u32, LayoutError> {
    read_fixed(store, ty, TypeAttr::SizeBytes)
}

pub(crate) fn fixed_alignment(store: &dyn IrStore, ty: TypeRef) -> Result<u32, LayoutError> {
    read_fixed(store, ty, TypeAttr::AlignBytes)
}

/// Write the final size and alignment and freeze `ty`.
pub(crate) fn fix_layout(store: &mut dyn IrStore, ty: TypeRef, size: u32, align: u32) {
    store.set_type_attr(ty, TypeAttr::SizeBytes, RawValue::Int(i64::from(size)));
    store.set_type_attr(ty, TypeAttr::AlignBytes, RawValue::Int(i64::from(align)));
    store.set_type_attr(ty, TypeAttr::LayoutFixed, RawValue::Flag(true));
    tracing::debug!(?ty, tag = %store.type_tag(ty), size, align, "layout fixed");
}

/// Round `offset` up to a multiple of `align` (a power of two).
pub(crate) fn align_up(offset: u32, align: u32) -> Option<u32> {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    offset.checked_add(mask).map(|v| v & !mask)
}
