//! Kind tags attached to every type and node handle.
//!
//! The store keeps tags as plain numbers. Only the typed layers know which
//! variant a tag stands for; the store itself never looks past
//! [`TypeTag::is_compound`].

use std::fmt;

/// Runtime kind of a type handle.
///
/// # Ranges
/// - 0-15: atomic kinds (no members)
/// - 16-31: compound kinds (own member entities)
/// - 32-255: unassigned
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeTag(u8);

impl TypeTag {
    pub const PRIMITIVE: Self = Self(0);
    pub const POINTER: Self = Self(1);
    pub const METHOD: Self = Self(2);
    pub const ARRAY: Self = Self(3);

    pub const STRUCT: Self = Self(16);
    pub const CLASS: Self = Self(17);
    pub const UNION: Self = Self(18);

    const COMPOUND_START: u8 = 16;
    const COMPOUND_END: u8 = 32;

    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Tags in the compound range own an ordered member list.
    #[inline]
    pub const fn is_compound(self) -> bool {
        self.0 >= Self::COMPOUND_START && self.0 < Self::COMPOUND_END
    }

    #[inline]
    pub const fn is_atomic(self) -> bool {
        self.0 < Self::COMPOUND_START
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::PRIMITIVE => "primitive",
            Self::POINTER => "pointer",
            Self::METHOD => "method",
            Self::ARRAY => "array",
            Self::STRUCT => "struct",
            Self::CLASS => "class",
            Self::UNION => "union",
            _ => return write!(f, "TypeTag({})", self.0),
        };
        f.write_str(name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Runtime opcode of a node handle.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct OpTag(u16);

impl OpTag {
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpTag({})", self.0)
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
