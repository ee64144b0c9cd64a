//! Target description.

use crate::StoreError;

/// Environment variable overriding the pointer width.
pub const POINTER_BITS_ENV: &str = "FIRM_POINTER_BITS";

/// Properties of the compilation target that the IR layout depends on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetConfig {
    pointer_bits: u32,
    pointer_alignment: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            pointer_bits: 64,
            pointer_alignment: 8,
        }
    }
}

impl TargetConfig {
    /// A target with `pointer_bits`-wide, naturally aligned pointers.
    pub fn new(pointer_bits: u32) -> Result<Self, StoreError> {
        if !matches!(pointer_bits, 16 | 32 | 64) {
            return Err(StoreError::InvalidPointerBits { bits: pointer_bits });
        }
        Ok(Self {
            pointer_bits,
            pointer_alignment: pointer_bits / 8,
        })
    }

    /// Default target, with the pointer width taken from `FIRM_POINTER_BITS`
    /// when it is set.
    pub fn from_env() -> Result<Self, StoreError> {
        match std::env::var(POINTER_BITS_ENV) {
            Ok(value) => Self::from_env_value(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_env_value(value: &str) -> Result<Self, StoreError> {
        let bits = value
            .trim()
            .parse::<u32>()
            .map_err(|_| StoreError::InvalidEnv {
                var: POINTER_BITS_ENV,
                value: value.to_owned(),
            })?;
        Self::new(bits)
    }

    /// Override the alignment of pointer-sized values.
    pub fn with_pointer_alignment(self, align: u32) -> Result<Self, StoreError> {
        if !align.is_power_of_two() {
            return Err(StoreError::InvalidPointerAlignment { align });
        }
        Ok(Self {
            pointer_alignment: align,
            ..self
        })
    }

    #[inline]
    pub fn pointer_bits(&self) -> u32 {
        self.pointer_bits
    }

    #[inline]
    pub fn pointer_size(&self) -> u32 {
        self.pointer_bits / 8
    }

    #[inline]
    pub fn pointer_alignment(&self) -> u32 {
        self.pointer_alignment
    }
}
