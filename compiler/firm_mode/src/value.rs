//! Distinguished values of a mode.
//!
//! These are pure functions of the descriptor. A value that the mode cannot
//! represent (`minus_one` of an unsigned mode, anything of `M`) is `None`.

use crate::{Arithmetic, Mode, ModeSort};

/// A constant representable in some mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModeValue {
    Signed(i128),
    Unsigned(u128),
    /// IEEE bit pattern of the value as an `f64`.
    Float(u64),
    Bool(bool),
}

impl ModeValue {
    pub fn float(value: f64) -> Self {
        ModeValue::Float(value.to_bits())
    }

    /// Numeric value as a float; booleans map to 0 and 1.
    #[allow(clippy::cast_precision_loss, reason = "approximate view")]
    pub fn as_f64(self) -> f64 {
        match self {
            ModeValue::Signed(v) => v as f64,
            ModeValue::Unsigned(v) => v as f64,
            ModeValue::Float(bits) => f64::from_bits(bits),
            ModeValue::Bool(b) => f64::from(u8::from(b)),
        }
    }
}

/// Largest finite value of an IEEE format with `bits` total width.
///
/// Formats wider than `f64` saturate to `f64::MAX`.
fn float_max(bits: u32) -> f64 {
    match bits {
        16 => 65504.0,
        32 => f64::from(f32::MAX),
        _ => f64::MAX,
    }
}

/// Largest value of an unsigned field of `bits` bits.
fn unsigned_max(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

/// Largest value of a signed field of `bits` bits.
fn signed_max(bits: u32) -> i128 {
    if bits >= 128 {
        i128::MAX
    } else {
        (1i128 << (bits - 1)) - 1
    }
}

/// Largest BCD number with `bits / 4` digits.
fn bcd_max(bits: u32) -> u128 {
    let digits = (bits / 4).min(38);
    10u128.pow(digits) - 1
}

impl Mode {
    /// Scalar numeric or boolean mode; vectors and unsized modes have no
    /// distinguished values.
    fn has_values(self) -> bool {
        self.is_datab() && !self.is_vector()
    }

    fn int_like(self) -> bool {
        matches!(self.sort(), ModeSort::IntNumber | ModeSort::Reference)
    }

    pub fn min_value(self) -> Option<ModeValue> {
        if !self.has_values() {
            return None;
        }
        let bits = self.bit_size();
        match self.sort() {
            ModeSort::InternalBoolean => Some(ModeValue::Bool(false)),
            ModeSort::FloatNumber => Some(ModeValue::float(-float_max(bits))),
            _ if !self.is_signed() => Some(ModeValue::Unsigned(0)),
            _ => Some(ModeValue::Signed(match self.arithmetic() {
                Arithmetic::OnesComplement => -signed_max(bits),
                Arithmetic::IntBcd => -i128::try_from(bcd_max(bits)).unwrap_or(i128::MAX),
                _ if bits >= 128 => i128::MIN,
                _ => -(1i128 << (bits - 1)),
            })),
        }
    }

    pub fn max_value(self) -> Option<ModeValue> {
        if !self.has_values() {
            return None;
        }
        let bits = self.bit_size();
        match self.sort() {
            ModeSort::InternalBoolean => Some(ModeValue::Bool(true)),
            ModeSort::FloatNumber => Some(ModeValue::float(float_max(bits))),
            _ if self.arithmetic() == Arithmetic::IntBcd => {
                let max = bcd_max(bits);
                Some(if self.is_signed() {
                    ModeValue::Signed(i128::try_from(max).unwrap_or(i128::MAX))
                } else {
                    ModeValue::Unsigned(max)
                })
            }
            _ if self.is_signed() => Some(ModeValue::Signed(signed_max(bits))),
            _ => Some(ModeValue::Unsigned(unsigned_max(bits))),
        }
    }

    /// The zero value (null pointer for references, `false` for booleans).
    pub fn null_value(self) -> Option<ModeValue> {
        if !self.has_values() {
            return None;
        }
        Some(match self.sort() {
            ModeSort::InternalBoolean => ModeValue::Bool(false),
            ModeSort::FloatNumber => ModeValue::float(0.0),
            _ if self.is_signed() => ModeValue::Signed(0),
            _ => ModeValue::Unsigned(0),
        })
    }

    pub fn one_value(self) -> Option<ModeValue> {
        if !self.has_values() {
            return None;
        }
        Some(match self.sort() {
            ModeSort::InternalBoolean => ModeValue::Bool(true),
            ModeSort::FloatNumber => ModeValue::float(1.0),
            _ if self.is_signed() => ModeValue::Signed(1),
            _ => ModeValue::Unsigned(1),
        })
    }

    /// `-1`, for signed numeric modes only.
    pub fn minus_one_value(self) -> Option<ModeValue> {
        if !self.has_values() || !self.is_num() || !self.is_signed() {
            return None;
        }
        Some(if self.is_float() {
            ModeValue::float(-1.0)
        } else {
            ModeValue::Signed(-1)
        })
    }

    /// The value with every bit set, for integer-like modes and booleans.
    pub fn all_one_value(self) -> Option<ModeValue> {
        if !self.has_values() {
            return None;
        }
        if self.is_internal_boolean() {
            return Some(ModeValue::Bool(true));
        }
        if !self.int_like() {
            return None;
        }
        Some(if self.is_signed() {
            ModeValue::Signed(-1)
        } else {
            ModeValue::Unsigned(unsigned_max(self.bit_size()))
        })
    }

    /// Positive infinity, for IEEE float modes.
    pub fn infinite_value(self) -> Option<ModeValue> {
        (self.is_float() && self.arithmetic() == Arithmetic::Ieee754)
            .then(|| ModeValue::float(f64::INFINITY))
    }

    /// A quiet NaN, for IEEE float modes.
    pub fn nan_value(self) -> Option<ModeValue> {
        (self.is_float() && self.arithmetic() == Arithmetic::Ieee754)
            .then(|| ModeValue::float(f64::NAN))
    }
}
