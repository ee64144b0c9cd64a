//! Graph anchors.

use firm_mode::modes;
use firm_store::{GraphAnchor, GraphRef, IrStore, NodeRef};
use firm_types::Entity;

use crate::{AsNodeRef, Block, End, HasOperands, Node, NodeError, Opcode, Start};

/// Create the procedure graph of `entity` with its four anchors: start
/// block, `Start`, end block and `End`.
pub fn init_graph(store: &mut dyn IrStore, entity: Entity) -> GraphRef {
    let graph = entity.create_graph(store);
    let m = modes();

    let start_block = Node::create(store, graph, Opcode::Block, m.bb, None, &[]);
    let start_block = Block(start_block.node_ref());
    let start = Node::create(store, graph, Opcode::Start, m.t, Some(start_block), &[]);
    let end_block = Node::create(store, graph, Opcode::Block, m.bb, None, &[]);
    let end_block = Block(end_block.node_ref());
    let end = Node::create(store, graph, Opcode::End, m.x, Some(end_block), &[]);

    store.set_graph_anchor(graph, GraphAnchor::StartBlock, start_block.0);
    store.set_graph_anchor(graph, GraphAnchor::Start, start.node_ref());
    store.set_graph_anchor(graph, GraphAnchor::EndBlock, end_block.0);
    store.set_graph_anchor(graph, GraphAnchor::End, end.node_ref());

    tracing::debug!(?graph, entity = entity.name(store), "initialised graph");
    graph
}

fn anchored(
    store: &dyn IrStore,
    graph: GraphRef,
    anchor: GraphAnchor,
    expected: Opcode,
) -> Result<NodeRef, NodeError> {
    let node = store
        .graph_anchor(graph, anchor)
        .ok_or(NodeError::MissingAnchor { graph, anchor })?;
    let found = Node::wrap(store, node)?.opcode();
    if found == expected {
        Ok(node)
    } else {
        Err(NodeError::UnexpectedOpcode {
            node,
            expected,
            found,
        })
    }
}

pub fn graph_start(store: &dyn IrStore, graph: GraphRef) -> Result<Start, NodeError> {
    anchored(store, graph, GraphAnchor::Start, Opcode::Start).map(Start)
}

pub fn graph_end(store: &dyn IrStore, graph: GraphRef) -> Result<End, NodeError> {
    anchored(store, graph, GraphAnchor::End, Opcode::End).map(End)
}

/// End node of the procedure graph linked to `entity`, the usual root for
/// traversals. `Ok(None)` if the entity has no graph.
pub fn procedure_end(store: &dyn IrStore, entity: Entity) -> Result<Option<End>, NodeError> {
    entity
        .graph(store)
        .map(|graph| graph_end(store, graph))
        .transpose()
}
