//! Graph traversal.

use firm_store::{GraphAnchor, GraphRef, IrStore, NodeRef};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::{Node, NodeError, NodeVisitor};

/// Visit every node reachable from the `End` anchor of `graph` in post
/// order: a node's block and operands come before the node itself, except
/// along back edges. Each node is visited once.
///
/// Returns the number of nodes visited. Stops at the first node whose
/// opcode is unknown.
#[tracing::instrument(level = "debug", skip_all, fields(?graph))]
pub fn walk_graph<V: NodeVisitor + ?Sized>(
    store: &dyn IrStore,
    graph: GraphRef,
    visitor: &mut V,
) -> Result<usize, NodeError> {
    let end = store.graph_anchor(graph, GraphAnchor::End).ok_or(NodeError::MissingAnchor {
        graph,
        anchor: GraphAnchor::End,
    })?;

    let mut seen: FxHashSet<NodeRef> = FxHashSet::default();
    // (node, operands already pushed)
    let mut stack: SmallVec<[(NodeRef, bool); 32]> = SmallVec::new();
    stack.push((end, false));
    let mut visited = 0;

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            Node::wrap(store, node)?.accept(store, visitor);
            visited += 1;
            continue;
        }
        if !seen.insert(node) {
            continue;
        }
        stack.push((node, true));
        // Pushed in reverse so the block pops first, then operands in order.
        for &input in store.node_inputs(node).iter().rev() {
            if !seen.contains(&input) {
                stack.push((input, false));
            }
        }
        if let Some(block) = store.node_block(node) {
            if !seen.contains(&block) {
                stack.push((block, false));
            }
        }
    }

    tracing::debug!(visited, "walk finished");
    Ok(visited)
}
