//! Mode classes for operand checks.

use std::fmt;

use firm_mode::{modes, Mode};

/// The family of modes an operand position accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModeClass {
    /// The memory mode `M`.
    Memory,
    /// The control flow mode `X`.
    Control,
    /// The tuple mode `T`.
    Tuple,
    /// Integer, float or reference values.
    Data,
    /// Scalar integers.
    Int,
    /// References.
    Reference,
    Any,
}

impl ModeClass {
    pub fn accepts(self, mode: Mode) -> bool {
        match self {
            ModeClass::Memory => mode == modes().m,
            ModeClass::Control => mode == modes().x,
            ModeClass::Tuple => mode == modes().t,
            ModeClass::Data => mode.is_data(),
            ModeClass::Int => mode.is_int(),
            ModeClass::Reference => mode.is_reference(),
            ModeClass::Any => true,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ModeClass::Memory => "memory",
            ModeClass::Control => "control flow",
            ModeClass::Tuple => "tuple",
            ModeClass::Data => "data",
            ModeClass::Int => "integer",
            ModeClass::Reference => "reference",
            ModeClass::Any => "any",
        }
    }
}

impl fmt::Display for ModeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
