//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, reason = "test code")]

use firm_mode::{modes, Mode};
use firm_store::{init, IrStore, MemoryStore, TargetConfig};

use crate::{HasLayout, PrimitiveType};

pub(crate) fn store() -> MemoryStore {
    MemoryStore::new(&init(), TargetConfig::default()).unwrap()
}

/// A finished primitive type for `mode`.
pub(crate) fn fixed_primitive(store: &mut dyn IrStore, mode: Mode) -> PrimitiveType {
    let ty = PrimitiveType::new(store, mode).unwrap();
    ty.finish_layout(store).unwrap();
    ty
}

/// 4 bytes, aligned to 4.
pub(crate) fn int32(store: &mut dyn IrStore) -> PrimitiveType {
    fixed_primitive(store, modes().is)
}

/// 1 byte, aligned to 1.
pub(crate) fn int8(store: &mut dyn IrStore) -> PrimitiveType {
    fixed_primitive(store, modes().bs)
}
