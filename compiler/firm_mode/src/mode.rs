//! The interned mode handle.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::{Arithmetic, ModeDescriptor, ModeSort, SortClass};

/// Registry-owned payload behind a [`Mode`].
#[derive(Debug)]
pub(crate) struct ModeData {
    pub(crate) name: Box<str>,
    pub(crate) desc: ModeDescriptor,
}

/// An interned machine value representation.
///
/// `Mode` is a `'static` reference into the registry. Equality and hashing
/// use the address of the interned entry, never the descriptor, so two modes
/// are equal exactly when the registry handed out the same entry.
#[derive(Copy, Clone)]
pub struct Mode(&'static ModeData);

impl Mode {
    #[inline]
    pub(crate) const fn from_data(data: &'static ModeData) -> Self {
        Mode(data)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        &self.0.name
    }

    #[inline]
    pub fn descriptor(self) -> ModeDescriptor {
        self.0.desc
    }

    #[inline]
    pub fn sort(self) -> ModeSort {
        self.0.desc.sort
    }

    /// Width of one lane in bits (0 for non-data modes).
    #[inline]
    pub fn bit_size(self) -> u32 {
        self.0.desc.bit_size
    }

    /// Bytes needed to store a value of this mode, all lanes included.
    pub fn size_bytes(self) -> u32 {
        let bits = u64::from(self.0.desc.bit_size) * u64::from(self.0.desc.vector_lanes);
        // Bounded by 128 bits per lane, so the division always fits.
        u32::try_from(bits.div_ceil(8)).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn is_signed(self) -> bool {
        self.0.desc.signed
    }

    #[inline]
    pub fn arithmetic(self) -> Arithmetic {
        self.0.desc.arithmetic
    }

    #[inline]
    pub fn modulo_shift(self) -> u32 {
        self.0.desc.modulo_shift
    }

    #[inline]
    pub fn vector_lanes(self) -> u32 {
        self.0.desc.vector_lanes
    }

    #[inline]
    pub fn is_vector(self) -> bool {
        self.0.desc.vector_lanes > 1
    }

    #[inline]
    pub fn class(self) -> SortClass {
        self.sort().class()
    }

    #[inline]
    pub fn is_num(self) -> bool {
        self.class().contains(SortClass::NUM)
    }

    #[inline]
    pub fn is_data(self) -> bool {
        self.class().contains(SortClass::DATA)
    }

    #[inline]
    pub fn is_datab(self) -> bool {
        self.class().contains(SortClass::DATAB)
    }

    #[inline]
    pub fn is_data_m(self) -> bool {
        self.class().contains(SortClass::DATA_M)
    }

    /// Scalar integer mode.
    #[inline]
    pub fn is_int(self) -> bool {
        self.sort() == ModeSort::IntNumber && !self.is_vector()
    }

    /// Scalar float mode.
    #[inline]
    pub fn is_float(self) -> bool {
        self.sort() == ModeSort::FloatNumber && !self.is_vector()
    }

    #[inline]
    pub fn is_reference(self) -> bool {
        self.sort() == ModeSort::Reference
    }

    #[inline]
    pub fn is_internal_boolean(self) -> bool {
        self.sort() == ModeSort::InternalBoolean
    }

    #[inline]
    pub fn is_int_vector(self) -> bool {
        self.sort() == ModeSort::IntNumber && self.is_vector()
    }

    #[inline]
    pub fn is_float_vector(self) -> bool {
        self.sort() == ModeSort::FloatNumber && self.is_vector()
    }

    #[inline]
    pub fn is_memory(self) -> bool {
        self.sort() == ModeSort::Memory
    }

    /// Control flow modes (`X`, `BB`).
    #[inline]
    pub fn is_control_flow(self) -> bool {
        self.sort() == ModeSort::ControlFlow
    }
}

impl PartialEq for Mode {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl Eq for Mode {}

impl Hash for Mode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.0, state);
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({})", self.0.name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
