//! Per-opcode visitor dispatch.

use firm_store::IrStore;

#[allow(clippy::wildcard_imports, reason = "one wrapper per opcode")]
use crate::node::*;

macro_rules! define_visitor {
    ($($variant:ident => $visit:ident,)*) => {
        /// One method per opcode, each defaulting to
        /// [`visit_default`](NodeVisitor::visit_default).
        ///
        /// Override only the opcodes a pass cares about. Dispatch happens in
        /// [`Node::accept`]; [`walk_graph`](crate::walk_graph) drives it over
        /// a whole graph.
        pub trait NodeVisitor {
            /// Fallback for every opcode without an override. Does nothing.
            fn visit_default(&mut self, store: &dyn IrStore, node: Node) {
                let _ = (store, node);
            }

            $(
                fn $visit(&mut self, store: &dyn IrStore, node: $variant) {
                    self.visit_default(store, Node::$variant(node));
                }
            )*
        }
    };
}

for_each_node!(define_visitor);
