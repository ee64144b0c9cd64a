//! Structural graph verification.

use firm_mode::Mode;
use firm_store::{DispatchError, GraphRef, IrStore, NodeAttr, NodeRef};
use thiserror::Error;

use crate::{AsNodeRef, HasOperands, ModeClass, Node, Opcode, Proj};

/// One structural defect found by [`verify_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyProblem {
    #[error(transparent)]
    UnknownOpcode(DispatchError),
    #[error("{opcode} node {node:?} lacks operand {pos}")]
    MissingOperand {
        node: NodeRef,
        opcode: Opcode,
        pos: usize,
    },
    #[error("{opcode} node {node:?} takes {expected} operands, has {arity}")]
    ExtraOperands {
        node: NodeRef,
        opcode: Opcode,
        expected: usize,
        arity: usize,
    },
    #[error("{node:?} uses {operand:?} from another graph")]
    ForeignOperand { node: NodeRef, operand: NodeRef },
    #[error("block edge of {node:?} leaves the graph or hits non-block {block:?}")]
    BadBlock { node: NodeRef, block: NodeRef },
    #[error("operand {pos} of {node:?} must have a {expected} mode, found {found}")]
    OperandMode {
        node: NodeRef,
        pos: usize,
        expected: ModeClass,
        found: Mode,
    },
    #[error("operand {pos} of {opcode} node {node:?} has mode {found}, expected {expected}")]
    ResultMode {
        node: NodeRef,
        opcode: Opcode,
        pos: usize,
        expected: Mode,
        found: Mode,
    },
    #[error("{node:?} projects result {num} of a {pred} node (results: {max:?})")]
    ProjOutOfRange {
        node: NodeRef,
        pred: Opcode,
        num: u32,
        max: Option<u32>,
    },
    #[error("{opcode} node {node:?} has no {attr:?}")]
    MissingAttribute {
        node: NodeRef,
        opcode: Opcode,
        attr: NodeAttr,
    },
}

/// Check one node: opcode, arity, graph membership, operand mode classes,
/// binop mode agreement and projection numbers.
pub fn verify_node(store: &dyn IrStore, node: NodeRef) -> Vec<VerifyProblem> {
    let wrapped = match Node::wrap(store, node) {
        Ok(n) => n,
        Err(e) => return vec![VerifyProblem::UnknownOpcode(e)],
    };
    let opcode = wrapped.opcode();
    let graph = store.node_graph(node);
    let mut problems = Vec::new();

    if let Some(block) = store.node_block(node) {
        if store.node_graph(block) != graph
            || Opcode::from_tag(store.node_op(block)) != Some(Opcode::Block)
        {
            problems.push(VerifyProblem::BadBlock { node, block });
        }
    }

    let inputs = store.node_inputs(node);
    let fixed = opcode.fixed_arity();
    if inputs.len() < fixed {
        problems.push(VerifyProblem::MissingOperand {
            node,
            opcode,
            pos: inputs.len(),
        });
    } else if inputs.len() > fixed && !opcode.is_variadic() {
        problems.push(VerifyProblem::ExtraOperands {
            node,
            opcode,
            expected: fixed,
            arity: inputs.len(),
        });
    }

    let mut operands_ok = inputs.len() >= fixed;
    for (pos, &input) in inputs.iter().enumerate() {
        if store.node_graph(input) != graph {
            problems.push(VerifyProblem::ForeignOperand {
                node,
                operand: input,
            });
            operands_ok = false;
            continue;
        }
        let found = store.node_mode(input);
        if let Some(expected) = opcode.operand_class(pos) {
            if !expected.accepts(found) {
                problems.push(VerifyProblem::OperandMode {
                    node,
                    pos,
                    expected,
                    found,
                });
                operands_ok = false;
            }
        }
    }

    if operands_ok {
        check_modes(store, wrapped, &mut problems);
    }
    problems
}

/// Mode agreement between a node, its operands and its attributes.
fn check_modes(store: &dyn IrStore, node: Node, problems: &mut Vec<VerifyProblem>) {
    const LEFT: &[usize] = &[0];
    const BOTH: &[usize] = &[0, 1];
    const DIVIDEND_DIVISOR: &[usize] = &[1, 2];

    let (positions, expected): (&[usize], Mode) = match node {
        // Pointer arithmetic mixes a reference and an offset.
        Node::Add(_) | Node::Sub(_) if node.mode(store).is_reference() => return,
        Node::Shl(_) | Node::Shr(_) | Node::Shrs(_) => (LEFT, node.mode(store)),
        _ if node.opcode().is_binop() => (BOTH, node.mode(store)),
        Node::Div(_) | Node::Mod(_) => {
            let attr = NodeAttr::ResultMode;
            let Some(resmode) = store
                .node_attr(node.node_ref(), attr)
                .expect_mode(&(node.node_ref(), attr))
            else {
                problems.push(missing(node, attr));
                return;
            };
            (DIVIDEND_DIVISOR, resmode)
        }
        Node::Proj(proj) => return check_proj(store, proj, problems),
        _ => return,
    };

    let inputs = store.node_inputs(node.node_ref());
    for &pos in positions {
        let found = store.node_mode(inputs[pos]);
        if found != expected {
            problems.push(VerifyProblem::ResultMode {
                node: node.node_ref(),
                opcode: node.opcode(),
                pos,
                expected,
                found,
            });
        }
    }
}

fn check_proj(store: &dyn IrStore, proj: Proj, problems: &mut Vec<VerifyProblem>) {
    let attr = NodeAttr::ProjNum;
    let Some(raw) = store
        .node_attr(proj.node_ref(), attr)
        .expect_int(&(proj.node_ref(), attr))
    else {
        problems.push(missing(Node::Proj(proj), attr));
        return;
    };
    let Ok(pred) = Node::wrap(store, proj.pred_ref(store)) else {
        // Reported when the predecessor itself is verified.
        return;
    };
    // A negative number is out of range for every predecessor.
    let num = u32::try_from(raw).unwrap_or(u32::MAX);
    let max = pred.opcode().pn_max();
    if !matches!(max, Some(max) if num < max) {
        problems.push(VerifyProblem::ProjOutOfRange {
            node: proj.node_ref(),
            pred: pred.opcode(),
            num,
            max,
        });
    }
}

fn missing(node: Node, attr: NodeAttr) -> VerifyProblem {
    VerifyProblem::MissingAttribute {
        node: node.node_ref(),
        opcode: node.opcode(),
        attr,
    }
}

/// Verify every node of `graph`, reachable or not.
#[tracing::instrument(level = "debug", skip_all, fields(?graph))]
pub fn verify_graph(store: &dyn IrStore, graph: GraphRef) -> Vec<VerifyProblem> {
    let problems: Vec<_> = store
        .graph_nodes(graph)
        .iter()
        .flat_map(|&node| verify_node(store, node))
        .collect();
    if problems.is_empty() {
        tracing::debug!("graph verified");
    } else {
        tracing::debug!(problems = problems.len(), "graph has problems");
    }
    problems
}

#[cfg(test)]
mod tests;
