//! Per-opcode operand accessors, attributes and projection numbers.

use firm_mode::Mode;
use firm_store::{DispatchError, IrStore, NodeAttr, NodeRef, RawValue, TypeRef};
use firm_types::Type;

use crate::node::{operand, push_operand, set_operand};
use crate::{
    Add, And, AsNodeRef, Block, Builtin, BuiltinKind, Cast, Const, Conv, Div, End, Eor,
    HasOperands, Load, Mod, Mul, Mulh, Node, NodeError, Opcode, Or, Pin, Proj, Return, Shl, Shr,
    Shrs, Start, Store, Sub,
};

/// Two-operand arithmetic and logic nodes.
///
/// The result mode equals the left operand's mode. Shifts take an integer
/// shift amount on the right.
pub trait Binop: HasOperands {
    fn left_ref(self, store: &dyn IrStore) -> NodeRef {
        operand(store, self.node_ref(), 0)
    }

    fn right_ref(self, store: &dyn IrStore) -> NodeRef {
        operand(store, self.node_ref(), 1)
    }

    fn left(self, store: &dyn IrStore) -> Result<Node, DispatchError> {
        Node::wrap(store, self.left_ref(store))
    }

    fn right(self, store: &dyn IrStore) -> Result<Node, DispatchError> {
        Node::wrap(store, self.right_ref(store))
    }

    fn set_left(self, store: &mut dyn IrStore, value: impl AsNodeRef) -> Result<(), NodeError> {
        set_operand(store, self.opcode(), self.node_ref(), 0, value.node_ref())
    }

    fn set_right(self, store: &mut dyn IrStore, value: impl AsNodeRef) -> Result<(), NodeError> {
        set_operand(store, self.opcode(), self.node_ref(), 1, value.node_ref())
    }
}

impl Binop for Add {}
impl Binop for Sub {}
impl Binop for Mul {}
impl Binop for Mulh {}
impl Binop for And {}
impl Binop for Or {}
impl Binop for Eor {}
impl Binop for Shl {}
impl Binop for Shr {}
impl Binop for Shrs {}

/// Named fixed operands: `pos => getter, raw getter, setter`.
macro_rules! operands {
    ($($ty:ident { $($pos:literal => $get:ident, $get_ref:ident, $set:ident;)* })*) => { $(
        impl $ty { $(
            pub fn $get_ref(self, store: &dyn IrStore) -> NodeRef {
                operand(store, self.0, $pos)
            }

            pub fn $get(self, store: &dyn IrStore) -> Result<Node, DispatchError> {
                Node::wrap(store, self.$get_ref(store))
            }

            pub fn $set(
                self,
                store: &mut dyn IrStore,
                value: impl AsNodeRef,
            ) -> Result<(), NodeError> {
                set_operand(store, Opcode::$ty, self.0, $pos, value.node_ref())
            }
        )* }
    )* };
}

operands! {
    Proj { 0 => pred, pred_ref, set_pred; }
    Return { 0 => mem, mem_ref, set_mem; }
    Div {
        0 => mem, mem_ref, set_mem;
        1 => left, left_ref, set_left;
        2 => right, right_ref, set_right;
    }
    Mod {
        0 => mem, mem_ref, set_mem;
        1 => left, left_ref, set_left;
        2 => right, right_ref, set_right;
    }
    Conv { 0 => op, op_ref, set_op; }
    Cast { 0 => op, op_ref, set_op; }
    Pin { 0 => op, op_ref, set_op; }
    Load {
        0 => mem, mem_ref, set_mem;
        1 => ptr, ptr_ref, set_ptr;
    }
    Store {
        0 => mem, mem_ref, set_mem;
        1 => ptr, ptr_ref, set_ptr;
        2 => value, value_ref, set_value;
    }
    Builtin { 0 => mem, mem_ref, set_mem; }
}

/// Variadic operands following the fixed ones:
/// `first position => count, raw getter, all, appender`.
macro_rules! variadic {
    ($($ty:ident {
        $first:literal => $count:ident, $get_ref:ident, $all:ident, $push:ident;
    })*) => { $(
        impl $ty {
            pub fn $count(self, store: &dyn IrStore) -> usize {
                store.node_arity(self.0).saturating_sub($first)
            }

            pub fn $get_ref(self, store: &dyn IrStore, index: usize) -> Option<NodeRef> {
                store.node_input(self.0, $first + index)
            }

            pub fn $all(self, store: &dyn IrStore) -> Vec<NodeRef> {
                store.node_inputs(self.0).get($first..).unwrap_or_default().to_vec()
            }

            pub fn $push(
                self,
                store: &mut dyn IrStore,
                value: impl AsNodeRef,
            ) -> Result<(), NodeError> {
                push_operand(store, Opcode::$ty, self.0, value.node_ref())
            }
        }
    )* };
}

variadic! {
    Block { 0 => n_preds, pred_ref, preds, add_pred; }
    End { 0 => n_keepalives, keepalive_ref, keepalives, add_keepalive; }
    Return { 1 => n_results, result_ref, results, add_result; }
    Builtin { 1 => n_params, param_ref, params, add_param; }
}

fn mode_attr(store: &dyn IrStore, node: NodeRef, attr: NodeAttr) -> Mode {
    store
        .node_attr(node, attr)
        .expect_mode(&(node, attr))
        .unwrap_or_else(|| panic!("store corruption: {node:?} has no {attr:?}"))
}

fn int_attr(store: &dyn IrStore, node: NodeRef, attr: NodeAttr) -> i64 {
    store
        .node_attr(node, attr)
        .expect_int(&(node, attr))
        .unwrap_or_else(|| panic!("store corruption: {node:?} has no {attr:?}"))
}

fn type_attr(store: &dyn IrStore, node: NodeRef) -> TypeRef {
    store
        .node_attr(node, NodeAttr::Type)
        .expect_type(&(node, NodeAttr::Type))
        .unwrap_or_else(|| panic!("store corruption: {node:?} has no static type"))
}

fn set_num_mode(
    store: &mut dyn IrStore,
    node: NodeRef,
    attr: NodeAttr,
    mode: Mode,
) -> Result<(), NodeError> {
    if !mode.is_num() {
        return Err(NodeError::InvalidResultMode { node, mode });
    }
    store.set_node_attr(node, attr, RawValue::Mode(mode));
    Ok(())
}

impl Start {
    pub const PN_X_INITIAL_EXEC: u32 = 0;
    pub const PN_M: u32 = 1;
    pub const PN_P_FRAME_BASE: u32 = 2;
    pub const PN_P_TLS: u32 = 3;
    pub const PN_T_ARGS: u32 = 4;
}

impl Const {
    pub fn value(self, store: &dyn IrStore) -> i64 {
        int_attr(store, self.0, NodeAttr::Value)
    }

    pub fn set_value(self, store: &mut dyn IrStore, value: i64) {
        store.set_node_attr(self.0, NodeAttr::Value, RawValue::Int(value));
    }
}

impl Proj {
    /// Which result of the predecessor tuple this projection selects.
    pub fn num(self, store: &dyn IrStore) -> u32 {
        let raw = int_attr(store, self.0, NodeAttr::ProjNum);
        u32::try_from(raw)
            .unwrap_or_else(|_| panic!("store corruption: {:?} has projection {raw}", self.0))
    }

    pub fn set_num(self, store: &mut dyn IrStore, num: u32) {
        store.set_node_attr(self.0, NodeAttr::ProjNum, RawValue::Int(i64::from(num)));
    }
}

impl Div {
    pub const PN_M: u32 = 0;
    pub const PN_X_REGULAR: u32 = 1;
    pub const PN_X_EXCEPT: u32 = 2;
    pub const PN_RES: u32 = 3;

    /// Mode of the quotient.
    pub fn resmode(self, store: &dyn IrStore) -> Mode {
        mode_attr(store, self.0, NodeAttr::ResultMode)
    }

    pub fn set_resmode(self, store: &mut dyn IrStore, mode: Mode) -> Result<(), NodeError> {
        set_num_mode(store, self.0, NodeAttr::ResultMode, mode)
    }

    /// Whether the division is known to leave no remainder.
    pub fn no_remainder(self, store: &dyn IrStore) -> bool {
        store
            .node_attr(self.0, NodeAttr::NoRemainder)
            .expect_flag(&(self.0, NodeAttr::NoRemainder))
            .unwrap_or(false)
    }

    pub fn set_no_remainder(self, store: &mut dyn IrStore, exact: bool) {
        store.set_node_attr(self.0, NodeAttr::NoRemainder, RawValue::Flag(exact));
    }
}

impl Mod {
    pub const PN_M: u32 = 0;
    pub const PN_X_REGULAR: u32 = 1;
    pub const PN_X_EXCEPT: u32 = 2;
    pub const PN_RES: u32 = 3;

    /// Mode of the remainder.
    pub fn resmode(self, store: &dyn IrStore) -> Mode {
        mode_attr(store, self.0, NodeAttr::ResultMode)
    }

    pub fn set_resmode(self, store: &mut dyn IrStore, mode: Mode) -> Result<(), NodeError> {
        set_num_mode(store, self.0, NodeAttr::ResultMode, mode)
    }
}

impl Load {
    pub const PN_M: u32 = 0;
    pub const PN_RES: u32 = 1;
    pub const PN_X_REGULAR: u32 = 2;
    pub const PN_X_EXCEPT: u32 = 3;

    /// Mode of the loaded value.
    pub fn load_mode(self, store: &dyn IrStore) -> Mode {
        mode_attr(store, self.0, NodeAttr::ResultMode)
    }

    pub fn set_load_mode(self, store: &mut dyn IrStore, mode: Mode) -> Result<(), NodeError> {
        if !mode.is_data() {
            return Err(NodeError::InvalidResultMode { node: self.0, mode });
        }
        store.set_node_attr(self.0, NodeAttr::ResultMode, RawValue::Mode(mode));
        Ok(())
    }
}

impl Store {
    pub const PN_M: u32 = 0;
    pub const PN_X_REGULAR: u32 = 1;
    pub const PN_X_EXCEPT: u32 = 2;
}

impl Cast {
    /// Handle of the type the operand is cast to.
    pub fn type_ref(self, store: &dyn IrStore) -> TypeRef {
        type_attr(store, self.0)
    }

    pub fn ty(self, store: &dyn IrStore) -> Result<Type, DispatchError> {
        Type::wrap(store, self.type_ref(store))
    }

    /// Any data type will do; method types are rejected.
    pub fn set_type(self, store: &mut dyn IrStore, ty: TypeRef) -> Result<(), NodeError> {
        if let Type::Method(_) = Type::wrap(store, ty)? {
            return Err(NodeError::WrongTypeKind {
                node: self.0,
                expected: "data",
                ty,
            });
        }
        store.set_node_attr(self.0, NodeAttr::Type, RawValue::Type(ty));
        Ok(())
    }
}

impl Builtin {
    pub const PN_M: u32 = 0;
    pub const PN_RESULT: u32 = 1;

    pub fn kind(self, store: &dyn IrStore) -> BuiltinKind {
        let raw = int_attr(store, self.0, NodeAttr::BuiltinKind);
        BuiltinKind::from_raw(raw)
            .unwrap_or_else(|| panic!("store corruption: {:?} has builtin kind {raw}", self.0))
    }

    pub fn set_kind(self, store: &mut dyn IrStore, kind: BuiltinKind) {
        store.set_node_attr(self.0, NodeAttr::BuiltinKind, RawValue::Int(kind.raw()));
    }

    /// Handle of the builtin's method type.
    pub fn type_ref(self, store: &dyn IrStore) -> TypeRef {
        type_attr(store, self.0)
    }

    pub fn ty(self, store: &dyn IrStore) -> Result<Type, DispatchError> {
        Type::wrap(store, self.type_ref(store))
    }

    pub fn set_type(self, store: &mut dyn IrStore, ty: TypeRef) -> Result<(), NodeError> {
        if !matches!(Type::wrap(store, ty)?, Type::Method(_)) {
            return Err(NodeError::WrongTypeKind {
                node: self.0,
                expected: "method",
                ty,
            });
        }
        store.set_node_attr(self.0, NodeAttr::Type, RawValue::Type(ty));
        Ok(())
    }
}
