//! Store configuration and variant dispatch errors.

use firm_mode::ModeError;
use thiserror::Error;

use crate::{NodeRef, OpTag, TypeRef, TypeTag};

/// Failure to configure or create a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unsupported pointer width of {bits} bits (expected 16, 32 or 64)")]
    InvalidPointerBits { bits: u32 },
    #[error("pointer alignment {align} is not a power of two")]
    InvalidPointerAlignment { align: u32 },
    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[error(transparent)]
    Mode(#[from] ModeError),
}

/// A handle whose kind tag matches no known variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("type {ty:?} has unknown kind tag {tag}")]
    UnknownTypeKind { ty: TypeRef, tag: TypeTag },
    #[error("node {node:?} has unknown opcode {tag}")]
    UnknownOpcode { node: NodeRef, tag: OpTag },
}
