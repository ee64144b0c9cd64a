//! Machine-level value representations for the Firm IR.
//!
//! A [`Mode`] describes how a value is represented by the machine: its sort
//! (integer, float, reference, memory, control flow, ...), bit width,
//! signedness and arithmetic. Every type and every node in the IR refers to
//! modes, so they are interned once per process and compared by identity.
//!
//! # Interning
//!
//! [`ModeRegistry::global`] owns the process-wide table. Requesting the same
//! [`ModeDescriptor`] twice yields the identical `Mode`; the registry never
//! holds two modes with the same descriptor. Mode payloads are leaked to
//! `'static`, so a `Mode` is a `Copy` pointer with O(1) equality.
//!
//! The commonly used modes (`Is`, `Lu`, `F`, `P`, `M`, `X`, ...) are interned
//! when the registry is first touched and are reachable through [`modes()`].

mod descriptor;
mod error;
mod mode;
mod registry;
mod relations;
mod sort;
mod value;

pub use descriptor::ModeDescriptor;
pub use error::ModeError;
pub use mode::Mode;
pub use registry::{modes, ModeRegistry, Predefined};
pub use sort::{Arithmetic, ModeSort, SortClass};
pub use value::ModeValue;
