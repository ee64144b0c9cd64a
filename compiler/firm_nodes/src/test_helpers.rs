//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, reason = "test code")]

use firm_mode::{modes, Mode};
use firm_store::{init, GraphAnchor, GraphRef, IrStore, MemoryStore, NodeRef, TargetConfig};
use firm_types::{Entity, HasLayout, MethodType};

use crate::{graph_start, init_graph, AsNodeRef, Block, Const, Node, Opcode, Proj, Start};

/// A store holding one initialised procedure graph.
pub(crate) struct Fixture {
    pub(crate) store: MemoryStore,
    pub(crate) graph: GraphRef,
    /// The start block.
    pub(crate) block: Block,
    /// Initial memory, projected from `Start`.
    pub(crate) mem: NodeRef,
}

pub(crate) fn fixture() -> Fixture {
    let mut store = MemoryStore::new(&init(), TargetConfig::default()).unwrap();
    let graph = procedure(&mut store, "main");
    let block = Block(store.graph_anchor(graph, GraphAnchor::StartBlock).unwrap());
    let start = graph_start(&store, graph).unwrap();
    let mem = proj(&mut store, block, start.node_ref(), modes().m, Start::PN_M);
    Fixture {
        store,
        graph,
        block,
        mem,
    }
}

/// A fresh procedure entity with an initialised graph.
pub(crate) fn procedure(store: &mut dyn IrStore, name: &str) -> GraphRef {
    let sig = MethodType::new(store, &[], &[]);
    let entity = Entity::new(store, name, sig.type_ref());
    init_graph(store, entity)
}

/// Create a node in `block`'s graph.
pub(crate) fn node(
    store: &mut dyn IrStore,
    block: Block,
    opcode: Opcode,
    mode: Mode,
    inputs: &[NodeRef],
) -> Node {
    let graph = store.node_graph(block.node_ref());
    Node::create(store, graph, opcode, mode, Some(block), inputs)
}

pub(crate) fn konst(store: &mut dyn IrStore, block: Block, mode: Mode, value: i64) -> NodeRef {
    let c = Const(node(store, block, Opcode::Const, mode, &[]).node_ref());
    c.set_value(store, value);
    c.node_ref()
}

pub(crate) fn proj(
    store: &mut dyn IrStore,
    block: Block,
    pred: NodeRef,
    mode: Mode,
    num: u32,
) -> NodeRef {
    let p = Proj(node(store, block, Opcode::Proj, mode, &[pred]).node_ref());
    p.set_num(store, num);
    p.node_ref()
}
