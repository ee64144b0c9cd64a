//! Node edit errors.

use firm_mode::Mode;
use firm_store::{DispatchError, GraphAnchor, GraphRef, NodeRef, TypeRef};
use thiserror::Error;

use crate::{ModeClass, Opcode};

/// A rejected node edit or lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("{operand:?} belongs to graph {operand_graph:?}, not to graph {graph:?} of {node:?}")]
    ForeignGraph {
        node: NodeRef,
        operand: NodeRef,
        graph: GraphRef,
        operand_graph: GraphRef,
    },
    #[error("operand {pos} of {node:?} must have a {expected} mode, found {found}")]
    ModeMismatch {
        node: NodeRef,
        pos: usize,
        expected: ModeClass,
        found: Mode,
    },
    #[error("{node:?} has no operand {pos} (arity {arity})")]
    OperandOutOfRange {
        node: NodeRef,
        pos: usize,
        arity: usize,
    },
    #[error("{opcode} nodes have a fixed pin state")]
    PinStateFixed { node: NodeRef, opcode: Opcode },
    #[error("{mode} is not a valid result mode for {node:?}")]
    InvalidResultMode { node: NodeRef, mode: Mode },
    #[error("{node:?} needs a {expected} type, {ty:?} is not one")]
    WrongTypeKind {
        node: NodeRef,
        expected: &'static str,
        ty: TypeRef,
    },
    #[error("{node:?} is a {found} node, expected {expected}")]
    UnexpectedOpcode {
        node: NodeRef,
        expected: Opcode,
        found: Opcode,
    },
    #[error("graph {graph:?} has no {anchor:?} anchor")]
    MissingAnchor { graph: GraphRef, anchor: GraphAnchor },
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
