//! Node handles and variant dispatch.

use firm_mode::Mode;
use firm_store::{DispatchError, GraphRef, IrStore, NodeAttr, NodeRef, RawValue};

use crate::{NodeError, NodeVisitor, Opcode, PinState};

/// Anything that names a node.
pub trait AsNodeRef: Copy {
    fn node_ref(self) -> NodeRef;
}

impl AsNodeRef for NodeRef {
    #[inline]
    fn node_ref(self) -> NodeRef {
        self
    }
}

/// Operations every node supports regardless of opcode.
pub trait HasOperands: AsNodeRef {
    fn opcode(self) -> Opcode;

    fn graph(self, store: &dyn IrStore) -> GraphRef {
        store.node_graph(self.node_ref())
    }

    fn mode(self, store: &dyn IrStore) -> Mode {
        store.node_mode(self.node_ref())
    }

    /// Containing block; `None` for blocks.
    fn block(self, store: &dyn IrStore) -> Option<Block> {
        store.node_block(self.node_ref()).map(|b| {
            let op = store.node_op(b);
            assert!(
                Opcode::from_tag(op) == Some(Opcode::Block),
                "store corruption: block edge of {:?} points to {b:?} with opcode {op}",
                self.node_ref(),
            );
            Block(b)
        })
    }

    fn set_block(self, store: &mut dyn IrStore, block: Block) -> Result<(), NodeError> {
        check_same_graph(store, self.node_ref(), block.0)?;
        store.set_node_block(self.node_ref(), block.0);
        Ok(())
    }

    fn arity(self, store: &dyn IrStore) -> usize {
        store.node_arity(self.node_ref())
    }

    fn input(self, store: &dyn IrStore, pos: usize) -> Option<NodeRef> {
        store.node_input(self.node_ref(), pos)
    }

    fn inputs(self, store: &dyn IrStore) -> Vec<NodeRef> {
        store.node_inputs(self.node_ref()).to_vec()
    }

    /// Replace input `pos`, checking graph membership and the mode class
    /// the opcode requires there.
    fn set_input(
        self,
        store: &mut dyn IrStore,
        pos: usize,
        value: NodeRef,
    ) -> Result<(), NodeError> {
        set_operand(store, self.opcode(), self.node_ref(), pos, value)
    }

    fn pin_state(self, store: &dyn IrStore) -> PinState {
        let node = self.node_ref();
        match store
            .node_attr(node, NodeAttr::PinState)
            .expect_int(&(node, NodeAttr::PinState))
        {
            None => self.opcode().default_pin_state(),
            Some(raw) => PinState::from_raw(raw)
                .unwrap_or_else(|| panic!("store corruption: {node:?} has pin state {raw}")),
        }
    }

    /// Only exception- and memory-pinned opcodes may change their pin state.
    fn set_pin_state(self, store: &mut dyn IrStore, state: PinState) -> Result<(), NodeError> {
        let opcode = self.opcode();
        if !opcode.has_adjustable_pin_state() {
            return Err(NodeError::PinStateFixed {
                node: self.node_ref(),
                opcode,
            });
        }
        store.set_node_attr(
            self.node_ref(),
            NodeAttr::PinState,
            RawValue::Int(state.raw()),
        );
        Ok(())
    }
}

macro_rules! define_nodes {
    ($($variant:ident => $visit:ident,)*) => {
        $(
            #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
            pub struct $variant(pub(crate) NodeRef);

            impl $variant {
                /// Number of results a projection can select; 0 unless the
                /// node produces a tuple.
                pub const PN_MAX: u32 = match Opcode::$variant.pn_max() {
                    Some(max) => max,
                    None => 0,
                };
            }

            impl AsNodeRef for $variant {
                #[inline]
                fn node_ref(self) -> NodeRef {
                    self.0
                }
            }

            impl HasOperands for $variant {
                #[inline]
                fn opcode(self) -> Opcode {
                    Opcode::$variant
                }
            }

            impl From<$variant> for Node {
                fn from(node: $variant) -> Node {
                    Node::$variant(node)
                }
            }

            impl TryFrom<Node> for $variant {
                type Error = NodeError;

                fn try_from(node: Node) -> Result<Self, NodeError> {
                    match node {
                        Node::$variant(n) => Ok(n),
                        other => Err(NodeError::UnexpectedOpcode {
                            node: other.node_ref(),
                            expected: Opcode::$variant,
                            found: other.opcode(),
                        }),
                    }
                }
            }
        )*

        /// A node with its opcode resolved.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Node {
            $($variant($variant),)*
        }

        impl Node {
            /// Resolve the variant of `node` from its opcode tag.
            ///
            /// Wrapping carries no state: two wraps of one handle compare
            /// equal and observe the same store contents.
            pub fn wrap(store: &dyn IrStore, node: NodeRef) -> Result<Node, DispatchError> {
                let tag = store.node_op(node);
                let opcode = Opcode::from_tag(tag)
                    .ok_or(DispatchError::UnknownOpcode { node, tag })?;
                Ok(match opcode {
                    $(Opcode::$variant => Node::$variant($variant(node)),)*
                })
            }

            /// Call the visitor method for this node's opcode.
            pub fn accept<V: NodeVisitor + ?Sized>(self, store: &dyn IrStore, visitor: &mut V) {
                match self {
                    $(Node::$variant(n) => visitor.$visit(store, n),)*
                }
            }
        }

        impl AsNodeRef for Node {
            fn node_ref(self) -> NodeRef {
                match self {
                    $(Node::$variant(n) => n.0,)*
                }
            }
        }

        impl HasOperands for Node {
            fn opcode(self) -> Opcode {
                match self {
                    $(Node::$variant(_) => Opcode::$variant,)*
                }
            }
        }
    };
}

for_each_node!(define_nodes);

impl Node {
    /// Create a node in the store and wrap it.
    ///
    /// Building well-formed graphs is the caller's job; nothing is checked
    /// here. Use [`verify_node`](crate::verify_node) on the result.
    pub fn create(
        store: &mut dyn IrStore,
        graph: GraphRef,
        opcode: Opcode,
        mode: Mode,
        block: Option<Block>,
        inputs: &[NodeRef],
    ) -> Node {
        let node = store.new_node(graph, opcode.tag(), mode, block.map(|b| b.0), inputs);
        tracing::trace!(?node, %opcode, %mode, "created node");
        match Node::wrap(store, node) {
            Ok(wrapped) => wrapped,
            Err(e) => panic!("store corruption: fresh node lost its opcode: {e}"),
        }
    }
}

/// Input `pos` of `node`; a missing fixed operand is store corruption.
#[track_caller]
pub(crate) fn operand(store: &dyn IrStore, node: NodeRef, pos: usize) -> NodeRef {
    store
        .node_input(node, pos)
        .unwrap_or_else(|| panic!("store corruption: {node:?} lacks operand {pos}"))
}

pub(crate) fn check_same_graph(
    store: &dyn IrStore,
    node: NodeRef,
    operand: NodeRef,
) -> Result<(), NodeError> {
    let graph = store.node_graph(node);
    let operand_graph = store.node_graph(operand);
    if graph == operand_graph {
        Ok(())
    } else {
        Err(NodeError::ForeignGraph {
            node,
            operand,
            graph,
            operand_graph,
        })
    }
}

fn check_operand(
    store: &dyn IrStore,
    opcode: Opcode,
    node: NodeRef,
    pos: usize,
    value: NodeRef,
) -> Result<(), NodeError> {
    check_same_graph(store, node, value)?;
    let found = store.node_mode(value);
    match opcode.operand_class(pos) {
        Some(expected) if !expected.accepts(found) => Err(NodeError::ModeMismatch {
            node,
            pos,
            expected,
            found,
        }),
        _ => Ok(()),
    }
}

pub(crate) fn set_operand(
    store: &mut dyn IrStore,
    opcode: Opcode,
    node: NodeRef,
    pos: usize,
    value: NodeRef,
) -> Result<(), NodeError> {
    let arity = store.node_arity(node);
    if pos >= arity {
        return Err(NodeError::OperandOutOfRange { node, pos, arity });
    }
    check_operand(store, opcode, node, pos, value)?;
    store.set_node_input(node, pos, value);
    Ok(())
}

/// Append a variadic operand.
pub(crate) fn push_operand(
    store: &mut dyn IrStore,
    opcode: Opcode,
    node: NodeRef,
    value: NodeRef,
) -> Result<(), NodeError> {
    let pos = store.node_arity(node);
    if !opcode.is_variadic() {
        return Err(NodeError::OperandOutOfRange {
            node,
            pos,
            arity: pos,
        });
    }
    check_operand(store, opcode, node, pos, value)?;
    store.push_node_input(node, value);
    Ok(())
}

#[cfg(test)]
mod tests;
