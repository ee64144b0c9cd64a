//! Mode descriptors: the identity of a mode.

use crate::{Arithmetic, ModeError, ModeSort};

/// Largest bit width a data mode may have.
const MAX_BITS: u32 = 128;

/// The tuple that identifies a mode in the registry.
///
/// Two requests with equal descriptors always resolve to the same
/// [`Mode`](crate::Mode). Scalar modes have `vector_lanes == 1`; `bit_size`
/// is the width of one lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeDescriptor {
    pub sort: ModeSort,
    pub bit_size: u32,
    pub signed: bool,
    pub arithmetic: Arithmetic,
    /// Shift amounts are taken modulo this value; 0 means "no wrapping".
    pub modulo_shift: u32,
    pub vector_lanes: u32,
}

impl ModeDescriptor {
    /// Two's complement integer with the conventional modulo shift
    /// (at least 32, as shift units operate on full registers).
    pub const fn int(bit_size: u32, signed: bool) -> Self {
        let modulo_shift = if bit_size < 32 {
            32
        } else {
            bit_size.next_power_of_two()
        };
        Self {
            sort: ModeSort::IntNumber,
            bit_size,
            signed,
            arithmetic: Arithmetic::TwosComplement,
            modulo_shift,
            vector_lanes: 1,
        }
    }

    /// IEEE-754 float.
    pub const fn float(bit_size: u32) -> Self {
        Self {
            sort: ModeSort::FloatNumber,
            bit_size,
            signed: true,
            arithmetic: Arithmetic::Ieee754,
            modulo_shift: 0,
            vector_lanes: 1,
        }
    }

    /// Unsigned two's complement address.
    pub const fn reference(bit_size: u32) -> Self {
        Self {
            sort: ModeSort::Reference,
            bit_size,
            signed: false,
            arithmetic: Arithmetic::TwosComplement,
            modulo_shift: bit_size,
            vector_lanes: 1,
        }
    }

    /// Internal boolean (comparison results).
    pub const fn internal_boolean() -> Self {
        Self {
            sort: ModeSort::InternalBoolean,
            bit_size: 1,
            signed: false,
            arithmetic: Arithmetic::None,
            modulo_shift: 0,
            vector_lanes: 1,
        }
    }

    /// A mode without machine representation (control flow, memory, tuples).
    pub const fn special(sort: ModeSort) -> Self {
        Self {
            sort,
            bit_size: 0,
            signed: false,
            arithmetic: Arithmetic::None,
            modulo_shift: 0,
            vector_lanes: 1,
        }
    }

    /// The same representation with `lanes` lanes.
    #[must_use]
    pub const fn with_lanes(self, lanes: u32) -> Self {
        Self {
            vector_lanes: lanes,
            ..self
        }
    }

    /// Check that this descriptor describes a consistent representation.
    pub fn validate(&self) -> Result<(), ModeError> {
        let Self {
            sort,
            bit_size,
            signed,
            arithmetic,
            modulo_shift,
            vector_lanes,
        } = *self;

        if vector_lanes == 0 {
            return Err(ModeError::ZeroVectorLanes);
        }

        let arithmetic_ok = match sort {
            ModeSort::IntNumber => arithmetic.is_integer(),
            ModeSort::FloatNumber => arithmetic.is_float(),
            ModeSort::Reference => arithmetic == Arithmetic::TwosComplement,
            ModeSort::InternalBoolean
            | ModeSort::Memory
            | ModeSort::ControlFlow
            | ModeSort::Auxiliary => arithmetic == Arithmetic::None,
        };
        if !arithmetic_ok {
            return Err(ModeError::InconsistentArithmetic { sort, arithmetic });
        }

        if !sort.is_data() {
            if vector_lanes != 1 {
                return Err(ModeError::NonDataVector { sort });
            }
            // The internal boolean is a single bit; everything else is unsized.
            let expected_bits = u32::from(sort == ModeSort::InternalBoolean);
            if bit_size != expected_bits {
                return Err(ModeError::SizedNonDataMode {
                    sort,
                    bits: bit_size,
                });
            }
            return Ok(());
        }

        if bit_size == 0 {
            return Err(ModeError::ZeroBitSize { sort });
        }
        if bit_size > MAX_BITS {
            return Err(ModeError::BitSizeTooLarge {
                sort,
                bits: bit_size,
            });
        }
        if sort == ModeSort::FloatNumber && !signed {
            return Err(ModeError::UnsignedFloat);
        }

        let shift_ok = match sort {
            ModeSort::FloatNumber => modulo_shift == 0,
            _ => modulo_shift == 0 || (modulo_shift.is_power_of_two() && modulo_shift >= bit_size),
        };
        if !shift_ok {
            return Err(ModeError::InvalidModuloShift {
                shift: modulo_shift,
                bits: bit_size,
            });
        }

        Ok(())
    }
}
