#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use firm_mode::modes;
use firm_store::{GraphAnchor, OpTag};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{fixture, konst, node, procedure, Fixture};
use crate::{Binop, ModeClass};

#[test]
fn every_opcode_wraps_to_its_variant() {
    let Fixture {
        mut store, block, ..
    } = fixture();
    for op in Opcode::ALL {
        let created = node(&mut store, block, op, modes().is, &[]);
        assert_eq!(created.opcode(), op);
        assert_eq!(Node::wrap(&store, created.node_ref()), Ok(created));
    }
}

#[test]
fn unknown_opcode_is_a_dispatch_error() {
    let Fixture {
        mut store, graph, ..
    } = fixture();
    let raw = store.new_node(graph, OpTag::from_raw(99), modes().is, None, &[]);
    assert_eq!(
        Node::wrap(&store, raw),
        Err(DispatchError::UnknownOpcode {
            node: raw,
            tag: OpTag::from_raw(99),
        })
    );
}

#[test]
fn wrapping_twice_observes_the_same_node() {
    let Fixture {
        mut store, block, ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let b = konst(&mut store, block, modes().is, 2);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, b]);

    let first = Node::wrap(&store, add.node_ref()).unwrap();
    let second = Node::wrap(&store, add.node_ref()).unwrap();
    let (Node::Add(x), Node::Add(y)) = (first, second) else {
        panic!("expected Add, got {first:?}");
    };
    x.set_left(&mut store, b).unwrap();
    assert_eq!(y.left_ref(&store), b);
}

#[test]
fn common_accessors() {
    let Fixture {
        mut store,
        graph,
        block,
        ..
    } = fixture();
    let c = konst(&mut store, block, modes().ls, 7);
    let c = Node::wrap(&store, c).unwrap();
    assert_eq!(c.graph(&store), graph);
    assert_eq!(c.mode(&store), modes().ls);
    assert_eq!(c.block(&store), Some(block));
    assert_eq!(c.arity(&store), 0);
    assert_eq!(block.block(&store), None);
}

#[test]
fn set_input_checks_mode_class() {
    let Fixture {
        mut store,
        block,
        mem,
        ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, a]);

    assert_eq!(
        add.set_input(&mut store, 1, mem),
        Err(NodeError::ModeMismatch {
            node: add.node_ref(),
            pos: 1,
            expected: ModeClass::Data,
            found: modes().m,
        })
    );
    assert_eq!(
        add.set_input(&mut store, 2, a),
        Err(NodeError::OperandOutOfRange {
            node: add.node_ref(),
            pos: 2,
            arity: 2,
        })
    );
    assert_eq!(add.inputs(&store), vec![a, a]);
}

#[test]
fn operands_must_share_the_graph() {
    let Fixture {
        mut store,
        graph,
        block,
        ..
    } = fixture();
    let other = procedure(&mut store, "other");
    let other_block = Block(store.graph_anchor(other, GraphAnchor::StartBlock).unwrap());
    let foreign = konst(&mut store, other_block, modes().is, 3);
    let a = konst(&mut store, block, modes().is, 1);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, a]);

    assert_eq!(
        add.set_input(&mut store, 0, foreign),
        Err(NodeError::ForeignGraph {
            node: add.node_ref(),
            operand: foreign,
            graph,
            operand_graph: other,
        })
    );
    assert!(matches!(
        add.set_block(&mut store, other_block),
        Err(NodeError::ForeignGraph { .. })
    ));
}

#[test]
fn pin_state_defaults_and_overrides() {
    let Fixture {
        mut store,
        block,
        mem,
        ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 6);
    let div = node(&mut store, block, Opcode::Div, modes().t, &[mem, a, a]);
    assert_eq!(div.pin_state(&store), PinState::ExcPinned);
    div.set_pin_state(&mut store, PinState::Pinned).unwrap();
    assert_eq!(div.pin_state(&store), PinState::Pinned);

    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, a]);
    assert_eq!(add.pin_state(&store), PinState::Floats);
    assert_eq!(
        add.set_pin_state(&mut store, PinState::Pinned),
        Err(NodeError::PinStateFixed {
            node: add.node_ref(),
            opcode: Opcode::Add,
        })
    );
}

#[derive(Default)]
struct Counter {
    adds: usize,
    others: usize,
}

impl NodeVisitor for Counter {
    fn visit_default(&mut self, _store: &dyn IrStore, _node: Node) {
        self.others += 1;
    }

    fn visit_add(&mut self, store: &dyn IrStore, node: Add) {
        assert_eq!(node.mode(store), modes().is);
        self.adds += 1;
    }
}

#[test]
fn accept_dispatches_on_opcode() {
    let Fixture {
        mut store, block, ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, a]);
    let sub = node(&mut store, block, Opcode::Sub, modes().is, &[a, a]);

    let mut counter = Counter::default();
    add.accept(&store, &mut counter);
    sub.accept(&store, &mut counter);
    Node::wrap(&store, a).unwrap().accept(&store, &mut counter);
    assert_eq!((counter.adds, counter.others), (1, 2));
}
