//! Layout contract violations.

use firm_mode::Mode;
use firm_store::{DispatchError, EntityRef, NodeRef, TypeRef};
use thiserror::Error;

/// A call that breaks the layout state machine or the construction order.
///
/// These are bugs in the caller's pipeline. They surface at the violating
/// call and leave the type unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout of {ty:?} is not fixed yet")]
    LayoutNotFixed { ty: TypeRef },
    #[error("layout of {ty:?} is already fixed")]
    AlreadyFixed { ty: TypeRef },
    #[error("cannot finish {ty:?}: contained type {dependency:?} is not laid out")]
    DependencyNotFixed { ty: TypeRef, dependency: TypeRef },
    #[error("dimension {dim} of {ty:?} has negative extent ({lower}..{upper})")]
    NegativeExtent {
        ty: TypeRef,
        dim: usize,
        lower: i64,
        upper: i64,
    },
    #[error("dimension {dim} of {ty:?} has no bound set")]
    UnsetBound { ty: TypeRef, dim: usize },
    #[error("dimension {dim} of {ty:?} has a dynamic bound ({node:?}); its size is unknown")]
    DynamicBound {
        ty: TypeRef,
        dim: usize,
        node: NodeRef,
    },
    #[error("dimension {dim} out of range for {ty:?} with {dimensions} dimensions")]
    DimensionOutOfRange {
        ty: TypeRef,
        dim: usize,
        dimensions: usize,
    },
    #[error("index {index} out of range for {ty:?} (len {len})")]
    IndexOutOfRange { ty: TypeRef, index: usize, len: usize },
    #[error("size of {ty:?} overflows")]
    SizeOverflow { ty: TypeRef },
    #[error("alignment {align} of {ty:?} is not a power of two")]
    InvalidAlignment { ty: TypeRef, align: u32 },
    #[error("member {member:?} of {ty:?} at offset {offset} violates alignment {align}")]
    MisalignedMember {
        ty: TypeRef,
        member: EntityRef,
        offset: u32,
        align: u32,
    },
    #[error("{ty:?} contains itself")]
    ContainmentCycle { ty: TypeRef },
    #[error("making {supertype:?} a supertype of {class:?} closes an inheritance cycle")]
    InheritanceCycle { class: TypeRef, supertype: TypeRef },
    #[error("{ty:?} is not a compound type")]
    NotACompound { ty: TypeRef },
    #[error("entity {entity:?} is already a member of {owner:?}")]
    MemberAlreadyBound { entity: EntityRef, owner: TypeRef },
    #[error("mode {mode} cannot back a primitive type")]
    InvalidPrimitiveMode { mode: Mode },
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
