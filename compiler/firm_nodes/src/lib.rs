//! Typed views over IR nodes.
//!
//! Nodes live in the [`IrStore`](firm_store::IrStore); this crate gives each
//! opcode a `Copy` wrapper (`Add`, `Div`, `Load`, ...) with named operand
//! accessors and validating setters. [`Node::wrap`] turns a raw
//! [`NodeRef`](firm_store::NodeRef) into the matching variant, and
//! [`NodeVisitor`] dispatches on it with one method per opcode.
//!
//! On top of that sit whole-graph helpers: [`walk_graph`] for post-order
//! traversal, [`verify_graph`] for structural checks, and [`init_graph`] /
//! [`procedure_end`] for graph anchors.

/// Invoke `$m!` with the full opcode list as `Variant => visit_method` pairs.
///
/// Every per-opcode table in this crate is generated from this one list.
macro_rules! for_each_node {
    ($m:ident) => {
        $m! {
            Block => visit_block,
            Start => visit_start,
            End => visit_end,
            Jmp => visit_jmp,
            Const => visit_const,
            Proj => visit_proj,
            Return => visit_return,
            Add => visit_add,
            Sub => visit_sub,
            Mul => visit_mul,
            Mulh => visit_mulh,
            And => visit_and,
            Or => visit_or,
            Eor => visit_eor,
            Shl => visit_shl,
            Shr => visit_shr,
            Shrs => visit_shrs,
            Div => visit_div,
            Mod => visit_mod,
            Conv => visit_conv,
            Cast => visit_cast,
            Pin => visit_pin,
            Load => visit_load,
            Store => visit_store,
            Builtin => visit_builtin,
        }
    };
}

mod builtin;
mod class;
mod error;
mod graph;
mod node;
mod opcode;
mod ops;
mod pin;
mod verify;
mod visitor;
mod walk;

#[cfg(test)]
mod test_helpers;

pub use builtin::BuiltinKind;
pub use class::ModeClass;
pub use error::NodeError;
pub use graph::{graph_end, graph_start, init_graph, procedure_end};
pub use node::{
    Add, And, AsNodeRef, Block, Builtin, Cast, Const, Conv, Div, End, Eor, HasOperands, Jmp,
    Load, Mod, Mul, Mulh, Node, Or, Pin, Proj, Return, Shl, Shr, Shrs, Start, Store, Sub,
};
pub use opcode::Opcode;
pub use ops::Binop;
pub use pin::PinState;
pub use verify::{verify_graph, verify_node, VerifyProblem};
pub use visitor::NodeVisitor;
pub use walk::walk_graph;
