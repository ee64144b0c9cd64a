#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use firm_mode::modes;
use firm_store::{GraphAnchor, OpTag};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{fixture, konst, node, procedure, proj, Fixture};
use crate::Block;

#[test]
fn well_formed_graph_has_no_problems() {
    let Fixture {
        mut store,
        graph,
        block,
        mem,
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let b = konst(&mut store, block, modes().is, 2);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, b]).node_ref();
    let ret = node(&mut store, block, Opcode::Return, modes().x, &[mem, add]).node_ref();
    let end_block = Block(store.graph_anchor(graph, GraphAnchor::EndBlock).unwrap());
    end_block.add_pred(&mut store, ret).unwrap();

    assert_eq!(verify_graph(&store, graph), vec![]);
}

#[test]
fn binop_operand_modes_must_agree() {
    let Fixture {
        mut store, block, ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let wide = konst(&mut store, block, modes().ls, 2);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, wide]).node_ref();
    assert_eq!(
        verify_node(&store, add),
        vec![VerifyProblem::ResultMode {
            node: add,
            opcode: Opcode::Add,
            pos: 1,
            expected: modes().is,
            found: modes().ls,
        }]
    );
}

#[test]
fn pointer_arithmetic_is_accepted() {
    let Fixture {
        mut store, block, ..
    } = fixture();
    let base = konst(&mut store, block, modes().p, 0x100);
    let off = konst(&mut store, block, modes().ls, 8);
    let add = node(&mut store, block, Opcode::Add, modes().p, &[base, off]).node_ref();
    assert_eq!(verify_node(&store, add), vec![]);
}

#[test]
fn operand_mode_classes_are_checked() {
    let Fixture {
        mut store,
        block,
        mem,
        ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let add = node(&mut store, block, Opcode::Add, modes().is, &[a, mem]).node_ref();
    assert_eq!(
        verify_node(&store, add),
        vec![VerifyProblem::OperandMode {
            node: add,
            pos: 1,
            expected: ModeClass::Data,
            found: modes().m,
        }]
    );
}

#[test]
fn arity_is_checked() {
    let Fixture {
        mut store, block, ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 1);
    let short = node(&mut store, block, Opcode::Add, modes().is, &[a]).node_ref();
    let long = node(&mut store, block, Opcode::Conv, modes().ls, &[a, a]).node_ref();
    assert_eq!(
        verify_node(&store, short),
        vec![VerifyProblem::MissingOperand {
            node: short,
            opcode: Opcode::Add,
            pos: 1,
        }]
    );
    assert_eq!(
        verify_node(&store, long),
        vec![VerifyProblem::ExtraOperands {
            node: long,
            opcode: Opcode::Conv,
            expected: 1,
            arity: 2,
        }]
    );
}

#[test]
fn foreign_operands_are_reported() {
    let Fixture {
        mut store,
        graph,
        block,
        ..
    } = fixture();
    let other = procedure(&mut store, "other");
    let other_block = Block(store.graph_anchor(other, GraphAnchor::StartBlock).unwrap());
    let foreign = konst(&mut store, other_block, modes().is, 3);
    let conv =
        Node::create(&mut store, graph, Opcode::Conv, modes().ls, Some(block), &[foreign]);
    assert_eq!(
        verify_node(&store, conv.node_ref()),
        vec![VerifyProblem::ForeignOperand {
            node: conv.node_ref(),
            operand: foreign,
        }]
    );
}

#[test]
fn projection_numbers_are_bounded() {
    let Fixture {
        mut store,
        graph,
        block,
        ..
    } = fixture();
    let start = store.graph_anchor(graph, GraphAnchor::Start).unwrap();
    let bad = proj(&mut store, block, start, modes().is, 7);
    assert_eq!(
        verify_node(&store, bad),
        vec![VerifyProblem::ProjOutOfRange {
            node: bad,
            pred: Opcode::Start,
            num: 7,
            max: Some(5),
        }]
    );

    let a = konst(&mut store, block, modes().is, 1);
    let pin = node(&mut store, block, Opcode::Pin, modes().t, &[a]).node_ref();
    let from_pin = proj(&mut store, block, pin, modes().is, 0);
    assert_eq!(
        verify_node(&store, from_pin),
        vec![VerifyProblem::ProjOutOfRange {
            node: from_pin,
            pred: Opcode::Pin,
            num: 0,
            max: None,
        }]
    );
}

#[test]
fn div_operands_follow_the_result_mode() {
    let Fixture {
        mut store,
        block,
        mem,
        ..
    } = fixture();
    let a = konst(&mut store, block, modes().is, 8);
    let b = konst(&mut store, block, modes().hs, 2);
    let Node::Div(div) = node(&mut store, block, Opcode::Div, modes().t, &[mem, a, b]) else {
        panic!("expected Div");
    };
    div.set_resmode(&mut store, modes().is).unwrap();
    let problems = verify_node(&store, div.node_ref());
    assert_eq!(problems.len(), 1);
    assert!(matches!(
        problems[0],
        VerifyProblem::ResultMode { pos: 2, .. }
    ));
}

#[test]
fn unknown_opcodes_are_reported_not_fatal() {
    let Fixture {
        mut store, graph, ..
    } = fixture();
    let odd = store.new_node(graph, OpTag::from_raw(77), modes().is, None, &[]);
    let problems = verify_graph(&store, graph);
    assert_eq!(
        problems,
        vec![VerifyProblem::UnknownOpcode(DispatchError::UnknownOpcode {
            node: odd,
            tag: OpTag::from_raw(77),
        })]
    );
}

#[test]
fn unset_attributes_are_reported_not_fatal() {
    let Fixture {
        mut store,
        graph,
        block,
        mem,
    } = fixture();
    let a = konst(&mut store, block, modes().is, 8);
    let b = konst(&mut store, block, modes().is, 2);
    let div = node(&mut store, block, Opcode::Div, modes().t, &[mem, a, b]).node_ref();
    assert_eq!(
        verify_node(&store, div),
        vec![VerifyProblem::MissingAttribute {
            node: div,
            opcode: Opcode::Div,
            attr: NodeAttr::ResultMode,
        }]
    );

    let start = store.graph_anchor(graph, GraphAnchor::Start).unwrap();
    let unnumbered = node(&mut store, block, Opcode::Proj, modes().m, &[start]).node_ref();
    assert_eq!(
        verify_node(&store, unnumbered),
        vec![VerifyProblem::MissingAttribute {
            node: unnumbered,
            opcode: Opcode::Proj,
            attr: NodeAttr::ProjNum,
        }]
    );
}
