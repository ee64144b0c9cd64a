//! Relations between modes: conversions, counterparts and wrapping rules.

use crate::{Arithmetic, Mode, ModeDescriptor, ModeRegistry, ModeSort};

/// Significand precision (hidden bit included) of an IEEE format.
fn significand_bits(bits: u32) -> u32 {
    match bits {
        16 => 11,
        32 => 24,
        64 => 53,
        80 => 64,
        128 => 113,
        other => other,
    }
}

/// Intern the integer mode for `desc`, naming it after its shape.
fn int_mode(desc: ModeDescriptor) -> Option<Mode> {
    let registry = ModeRegistry::global();
    if let Some(mode) = registry.find(&desc) {
        return Some(mode);
    }
    let name = format!("I{}{}", desc.bit_size, if desc.signed { 's' } else { 'u' });
    registry.get_or_create(&name, desc).ok()
}

impl Mode {
    /// Whether every value of `self` is representable in `other`.
    pub fn is_smaller_than(self, other: Mode) -> bool {
        if self == other {
            return true;
        }
        if self.is_vector() || other.is_vector() {
            return false;
        }
        let (sb, ob) = (self.bit_size(), other.bit_size());
        match (self.sort(), other.sort()) {
            (ModeSort::IntNumber, ModeSort::IntNumber) => {
                if self.arithmetic() != other.arithmetic() {
                    return false;
                }
                match (self.is_signed(), other.is_signed()) {
                    (true, true) | (false, false) => ob >= sb,
                    (false, true) => ob > sb,
                    (true, false) => false,
                }
            }
            (ModeSort::IntNumber, ModeSort::FloatNumber) => {
                let int_bits = sb - u32::from(self.is_signed());
                other.arithmetic() == Arithmetic::Ieee754 && int_bits <= significand_bits(ob)
            }
            (ModeSort::FloatNumber, ModeSort::FloatNumber) => {
                self.arithmetic() == other.arithmetic() && ob >= sb
            }
            (ModeSort::Reference, ModeSort::Reference) => ob >= sb,
            _ => false,
        }
    }

    /// Whether every value of `self` converts to `other` without loss.
    ///
    /// Unlike [`Mode::is_smaller_than`] this accepts the internal boolean,
    /// which converts to any integer mode as 0 or 1.
    pub fn values_fit_in(self, other: Mode) -> bool {
        if self.is_internal_boolean() {
            return other.is_int() || other.is_internal_boolean();
        }
        self.is_smaller_than(other)
    }

    /// The unsigned integer mode of the same width.
    ///
    /// References map to the unsigned integer of their width.
    pub fn unsigned_counterpart(self) -> Option<Mode> {
        if !(self.is_int() || self.is_reference()) {
            return None;
        }
        if self.is_int() && !self.is_signed() {
            return Some(self);
        }
        int_mode(ModeDescriptor::int(self.bit_size(), false))
    }

    /// The signed integer mode of the same width.
    pub fn signed_counterpart(self) -> Option<Mode> {
        if !(self.is_int() || self.is_reference()) {
            return None;
        }
        if self.is_int() && self.is_signed() {
            return Some(self);
        }
        int_mode(ModeDescriptor::int(self.bit_size(), true))
    }

    /// The integer mode with twice the width and the same signedness.
    pub fn double_bits_int_mode(self) -> Option<Mode> {
        if !self.is_int() {
            return None;
        }
        // Widths above 128 bits fail validation and yield `None`.
        int_mode(ModeDescriptor {
            arithmetic: self.arithmetic(),
            ..ModeDescriptor::int(self.bit_size() * 2, self.is_signed())
        })
    }

    /// Whether `+0.0` and `-0.0` must be kept apart.
    pub fn honors_signed_zeros(self) -> bool {
        self.sort() == ModeSort::FloatNumber && self.arithmetic() == Arithmetic::Ieee754
    }

    /// Whether negating the minimum value overflows.
    pub fn overflows_on_unary_minus(self) -> bool {
        self.sort() != ModeSort::FloatNumber && self.arithmetic() == Arithmetic::TwosComplement
    }

    /// Whether arithmetic results wrap modulo `2^bits`.
    pub fn wraps_around(self) -> bool {
        self.sort() == ModeSort::IntNumber
    }

    /// Whether a conversion to `other` reinterprets bits without changing them.
    pub fn is_reinterpret_cast_to(self, other: Mode) -> bool {
        if self == other {
            return true;
        }
        self.bit_size() == other.bit_size()
            && self.vector_lanes() == other.vector_lanes()
            && self.arithmetic() == other.arithmetic()
            && self.arithmetic() == Arithmetic::TwosComplement
    }
}

#[cfg(test)]
mod tests;
