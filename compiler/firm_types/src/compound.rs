//! Member layout shared by structs and classes.

use firm_store::{EntityAttr, IrStore, RawValue, TypeAttr, TypeList, TypeRef, TypeTag};

use crate::layout::{
    align_up, ensure_dependency, ensure_undefined, fixed_alignment, fixed_size, read_u32,
};
use crate::{Entity, LayoutError};

/// Member entities of `ty`, in declaration order.
pub(crate) fn members(store: &dyn IrStore, ty: TypeRef) -> Vec<Entity> {
    store
        .type_list(ty, TypeList::Members)
        .iter()
        .map(|v| {
            let entity = v
                .expect_entity(&(ty, TypeList::Members))
                .unwrap_or_else(|| panic!("member list of {ty:?} has a hole"));
            Entity::from_ref(entity)
        })
        .collect()
}

/// Create an entity and bind it as the next member of `ty`.
pub(crate) fn add_member(
    store: &mut dyn IrStore,
    ty: TypeRef,
    name: &str,
    member_type: TypeRef,
) -> Result<Entity, LayoutError> {
    ensure_undefined(store, ty)?;
    let member = Entity::new(store, name, member_type);
    member.bind_to(store, ty, None)?;
    Ok(member)
}

/// Whether `entity` occupies storage in its owner. Method members are
/// dispatched through the virtual table and take no space.
pub(crate) fn is_data_member(store: &dyn IrStore, entity: Entity) -> bool {
    store.type_tag(entity.type_ref(store)) != TypeTag::METHOD
}

/// Size and alignment of a compound from its members.
///
/// Members without an explicit offset are placed at the current end rounded
/// up to their alignment; members with one must be aligned and may overlap.
/// Offsets are written back to the members. The result size is the largest
/// member end rounded up to the compound's alignment, which is the largest
/// member alignment (or an explicitly set larger one). An empty compound has
/// size 0 and alignment 1.
pub(crate) fn layout_members(
    store: &mut dyn IrStore,
    ty: TypeRef,
) -> Result<(u32, u32), LayoutError> {
    let members = members(store, ty);

    // Check every dependency first so a failure writes nothing.
    for &member in &members {
        ensure_dependency(store, ty, member.type_ref(store))?;
    }

    let mut end: u32 = 0;
    let mut align_all = read_u32(store, ty, TypeAttr::AlignBytes).unwrap_or(1);
    let mut placed = Vec::with_capacity(members.len());

    for member in members.into_iter().filter(|&m| is_data_member(store, m)) {
        let member_ty = member.type_ref(store);
        let size = fixed_size(store, member_ty)?;
        let align = fixed_alignment(store, member_ty)?.max(1);

        let offset = match member.offset(store) {
            Some(offset) if offset % align != 0 => {
                return Err(LayoutError::MisalignedMember {
                    ty,
                    member: member.entity_ref(),
                    offset,
                    align,
                });
            }
            Some(offset) => offset,
            None => align_up(end, align).ok_or(LayoutError::SizeOverflow { ty })?,
        };
        let member_end = offset
            .checked_add(size)
            .ok_or(LayoutError::SizeOverflow { ty })?;
        end = end.max(member_end);
        align_all = align_all.max(align);
        placed.push((member, offset));
    }

    let size = align_up(end, align_all).ok_or(LayoutError::SizeOverflow { ty })?;
    for (member, offset) in placed {
        store.set_entity_attr(
            member.entity_ref(),
            EntityAttr::Offset,
            RawValue::Int(i64::from(offset)),
        );
    }
    Ok((size, align_all))
}

/// Size and alignment of a compound whose members share storage.
///
/// Every data member sits at its explicit offset, or at 0. The size is the
/// largest member end, at least a preset size, rounded up to the largest
/// member alignment (or a preset larger one).
pub(crate) fn overlay_members(
    store: &mut dyn IrStore,
    ty: TypeRef,
) -> Result<(u32, u32), LayoutError> {
    let members = members(store, ty);
    for &member in &members {
        ensure_dependency(store, ty, member.type_ref(store))?;
    }

    let mut end = read_u32(store, ty, TypeAttr::SizeBytes).unwrap_or(0);
    let mut align_all = read_u32(store, ty, TypeAttr::AlignBytes).unwrap_or(1);
    let mut placed = Vec::with_capacity(members.len());

    for member in members.into_iter().filter(|&m| is_data_member(store, m)) {
        let member_ty = member.type_ref(store);
        let size = fixed_size(store, member_ty)?;
        let align = fixed_alignment(store, member_ty)?.max(1);
        let offset = member.offset(store).unwrap_or(0);
        if offset % align != 0 {
            return Err(LayoutError::MisalignedMember {
                ty,
                member: member.entity_ref(),
                offset,
                align,
            });
        }
        let member_end = offset
            .checked_add(size)
            .ok_or(LayoutError::SizeOverflow { ty })?;
        end = end.max(member_end);
        align_all = align_all.max(align);
        placed.push((member, offset));
    }

    let size = align_up(end, align_all).ok_or(LayoutError::SizeOverflow { ty })?;
    for (member, offset) in placed {
        store.set_entity_attr(
            member.entity_ref(),
            EntityAttr::Offset,
            RawValue::Int(i64::from(offset)),
        );
    }
    Ok((size, align_all))
}
