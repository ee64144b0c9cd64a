//! Mode sorts and arithmetic kinds.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Classification bits shared by groups of sorts.
    ///
    /// A sort's class answers the common "can this carry a number / a data
    /// value / a boolean / memory" questions without matching on every sort.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct SortClass: u8 {
        /// Numeric value (integer or float).
        const NUM = 1 << 0;
        /// Data value that can live in a register.
        const DATA = 1 << 1;
        /// Data value or internal boolean.
        const DATAB = 1 << 2;
        /// Data value or memory.
        const DATA_M = 1 << 3;
    }
}

/// What kind of value a mode represents.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ModeSort {
    /// Tuples, `ANY`, `BAD`: no machine representation.
    Auxiliary = 0,
    /// Control flow (`X`, `BB`).
    ControlFlow = 1,
    /// The memory state (`M`).
    Memory = 2,
    /// Result of comparisons (`b`).
    InternalBoolean = 3,
    /// Addresses.
    Reference = 4,
    /// Integers.
    IntNumber = 5,
    /// Floating point numbers.
    FloatNumber = 6,
}

impl ModeSort {
    /// Classification bits for this sort.
    pub const fn class(self) -> SortClass {
        match self {
            Self::Auxiliary | Self::ControlFlow => SortClass::empty(),
            Self::Memory => SortClass::DATA_M,
            Self::InternalBoolean => SortClass::DATAB,
            Self::Reference => SortClass::DATA
                .union(SortClass::DATAB)
                .union(SortClass::DATA_M),
            Self::IntNumber | Self::FloatNumber => SortClass::all(),
        }
    }

    /// Sorts that carry a numeric representation (and therefore a bit size).
    #[inline]
    pub const fn is_data(self) -> bool {
        self.class().contains(SortClass::DATA)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Auxiliary => "auxiliary",
            Self::ControlFlow => "control_flow",
            Self::Memory => "memory",
            Self::InternalBoolean => "internal_boolean",
            Self::Reference => "reference",
            Self::IntNumber => "int_number",
            Self::FloatNumber => "float_number",
        }
    }
}

impl fmt::Display for ModeSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How arithmetic on values of a mode behaves.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Arithmetic {
    /// No arithmetic (non-data modes, internal boolean).
    None,
    TwosComplement,
    OnesComplement,
    /// Binary coded decimal integers.
    IntBcd,
    Ieee754,
    /// Binary coded decimal floats.
    FloatBcd,
}

impl Arithmetic {
    /// Arithmetic kinds valid for integer and reference modes.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::TwosComplement | Self::OnesComplement | Self::IntBcd
        )
    }

    /// Arithmetic kinds valid for float modes.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Ieee754 | Self::FloatBcd)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TwosComplement => "twos_complement",
            Self::OnesComplement => "ones_complement",
            Self::IntBcd => "int_BCD",
            Self::Ieee754 => "ieee754",
            Self::FloatBcd => "float_BCD",
        }
    }
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
