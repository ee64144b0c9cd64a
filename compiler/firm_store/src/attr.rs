//! Field addresses for raw store access.

/// Scalar fields of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeAttr {
    /// `Int`: size in bytes.
    SizeBytes,
    /// `Int`: alignment in bytes.
    AlignBytes,
    /// `Flag`: `true` once the layout is fixed.
    LayoutFixed,
    /// `Mode`: the associated mode of atomic types.
    Mode,
    /// `Type`: referent of a pointer.
    PointsTo,
    /// `Type`: element of an array.
    ElementType,
    /// `Entity`: the element entity of an array.
    ElementEntity,
    /// `Int`: dimension count of an array.
    Dimensions,
    /// `Flag`: variadic method.
    Variadic,
    /// `Int`: additional method property bits.
    Properties,
    /// `Int`: number of virtual table slots of a class.
    VtableSize,
}

/// Ordered list fields of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeList {
    /// `Type` entries.
    Params,
    /// `Type` entries.
    Results,
    /// `Entity` entries of a compound.
    Members,
    /// `Int` or `Node` entries, one per dimension.
    LowerBounds,
    /// `Int` or `Node` entries, one per dimension.
    UpperBounds,
    /// `Type` entries of a class.
    Supertypes,
    /// `Type` entries of a class.
    Subtypes,
}

/// Scalar fields of a node beyond its opcode, mode, block and inputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeAttr {
    /// `Int`: overridden pin state.
    PinState,
    /// `Type`: static type (Cast, Builtin).
    Type,
    /// `Int`: constant value (Const).
    Value,
    /// `Int`: projection number (Proj).
    ProjNum,
    /// `Mode`: result mode of Div, Mod and Load.
    ResultMode,
    /// `Flag`: Div is known to be exact.
    NoRemainder,
    /// `Int`: builtin kind (Builtin).
    BuiltinKind,
    /// `Entity`: entity whose address a node yields.
    Entity,
}

/// Scalar fields of an entity. The name is read through
/// [`IrStore::entity_name`](crate::IrStore::entity_name).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityAttr {
    /// `Type`: the entity's own type.
    Type,
    /// `Type`: the compound the entity is a member of.
    Owner,
    /// `Int`: byte offset within the owner.
    Offset,
    /// `Graph`: linked procedure graph.
    Graph,
    /// `Int`: virtual table slot of a method member.
    VtableNumber,
}

/// Distinguished nodes of a graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum GraphAnchor {
    Start = 0,
    End = 1,
    StartBlock = 2,
    EndBlock = 3,
}

impl GraphAnchor {
    pub const COUNT: usize = 4;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
