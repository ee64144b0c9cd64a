//! Mode descriptor validation errors.

use thiserror::Error;

use crate::{Arithmetic, ModeSort};

/// A mode descriptor that cannot describe a real machine representation.
///
/// Raised by [`ModeRegistry::get_or_create`](crate::ModeRegistry::get_or_create)
/// before anything is interned; an inconsistent descriptor never produces a
/// mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("{sort} modes cannot use {arithmetic} arithmetic")]
    InconsistentArithmetic {
        sort: ModeSort,
        arithmetic: Arithmetic,
    },
    #[error("{sort} modes need a non-zero bit size")]
    ZeroBitSize { sort: ModeSort },
    #[error("{sort} mode of {bits} bits is not supported (at most 128 bits)")]
    BitSizeTooLarge { sort: ModeSort, bits: u32 },
    #[error("{sort} modes carry no representation but {bits} bits were requested")]
    SizedNonDataMode { sort: ModeSort, bits: u32 },
    #[error("float modes are always signed")]
    UnsignedFloat,
    #[error("modulo shift {shift} is invalid for a {bits}-bit mode")]
    InvalidModuloShift { shift: u32, bits: u32 },
    #[error("vector modes need at least one lane")]
    ZeroVectorLanes,
    #[error("{sort} modes cannot be vectorised")]
    NonDataVector { sort: ModeSort },
    #[error("no predefined {sort} mode is named `{name}`")]
    UnknownSpecialMode { name: Box<str>, sort: ModeSort },
}
