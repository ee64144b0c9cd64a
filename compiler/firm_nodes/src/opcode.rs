//! The closed opcode set and its per-opcode tables.

use std::fmt;

use firm_store::OpTag;

use crate::{ModeClass, PinState};

/// Every opcode this crate knows.
///
/// The discriminant is the raw [`OpTag`] the store keeps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Opcode {
    Block = 0,
    Start = 1,
    End = 2,
    Jmp = 3,
    Const = 4,
    Proj = 5,
    Return = 6,
    Add = 7,
    Sub = 8,
    Mul = 9,
    Mulh = 10,
    And = 11,
    Or = 12,
    Eor = 13,
    Shl = 14,
    Shr = 15,
    Shrs = 16,
    Div = 17,
    Mod = 18,
    Conv = 19,
    Cast = 20,
    Pin = 21,
    Load = 22,
    Store = 23,
    Builtin = 24,
}

/// Operand mode classes: fixed positions, then the class of any further
/// (variadic) operands.
struct Signature {
    fixed: &'static [ModeClass],
    rest: Option<ModeClass>,
}

const fn sig(fixed: &'static [ModeClass], rest: Option<ModeClass>) -> Signature {
    Signature { fixed, rest }
}

use ModeClass::{Any, Control, Data, Int, Memory, Reference, Tuple};

const BINOP: Signature = sig(&[Data, Data], None);
const SHIFT: Signature = sig(&[Data, Int], None);
const DIVMOD: Signature = sig(&[Memory, Data, Data], None);

impl Opcode {
    pub const ALL: [Opcode; 25] = [
        Opcode::Block,
        Opcode::Start,
        Opcode::End,
        Opcode::Jmp,
        Opcode::Const,
        Opcode::Proj,
        Opcode::Return,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Mulh,
        Opcode::And,
        Opcode::Or,
        Opcode::Eor,
        Opcode::Shl,
        Opcode::Shr,
        Opcode::Shrs,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Conv,
        Opcode::Cast,
        Opcode::Pin,
        Opcode::Load,
        Opcode::Store,
        Opcode::Builtin,
    ];

    #[inline]
    pub const fn tag(self) -> OpTag {
        OpTag::from_raw(self as u16)
    }

    pub fn from_tag(tag: OpTag) -> Option<Opcode> {
        Self::ALL.get(usize::from(tag.raw())).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Block => "Block",
            Opcode::Start => "Start",
            Opcode::End => "End",
            Opcode::Jmp => "Jmp",
            Opcode::Const => "Const",
            Opcode::Proj => "Proj",
            Opcode::Return => "Return",
            Opcode::Add => "Add",
            Opcode::Sub => "Sub",
            Opcode::Mul => "Mul",
            Opcode::Mulh => "Mulh",
            Opcode::And => "And",
            Opcode::Or => "Or",
            Opcode::Eor => "Eor",
            Opcode::Shl => "Shl",
            Opcode::Shr => "Shr",
            Opcode::Shrs => "Shrs",
            Opcode::Div => "Div",
            Opcode::Mod => "Mod",
            Opcode::Conv => "Conv",
            Opcode::Cast => "Cast",
            Opcode::Pin => "Pin",
            Opcode::Load => "Load",
            Opcode::Store => "Store",
            Opcode::Builtin => "Builtin",
        }
    }

    /// Scheduling freedom a fresh node of this opcode has.
    pub const fn default_pin_state(self) -> PinState {
        match self {
            Opcode::Block
            | Opcode::Start
            | Opcode::End
            | Opcode::Jmp
            | Opcode::Return
            | Opcode::Pin => PinState::Pinned,
            Opcode::Div | Opcode::Mod | Opcode::Load | Opcode::Store => PinState::ExcPinned,
            Opcode::Builtin => PinState::MemPinned,
            Opcode::Const
            | Opcode::Proj
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Mulh
            | Opcode::And
            | Opcode::Or
            | Opcode::Eor
            | Opcode::Shl
            | Opcode::Shr
            | Opcode::Shrs
            | Opcode::Conv
            | Opcode::Cast => PinState::Floats,
        }
    }

    /// Whether `set_pin_state` may change the pin state of such a node.
    #[inline]
    pub const fn has_adjustable_pin_state(self) -> bool {
        matches!(
            self.default_pin_state(),
            PinState::ExcPinned | PinState::MemPinned
        )
    }

    /// Number of results of tuple-producing opcodes; `None` for the rest.
    pub const fn pn_max(self) -> Option<u32> {
        match self {
            Opcode::Start => Some(5),
            Opcode::Div | Opcode::Mod | Opcode::Load => Some(4),
            Opcode::Store => Some(3),
            Opcode::Builtin => Some(2),
            _ => None,
        }
    }

    /// Binary arithmetic and logic opcodes (left, right; result mode equals
    /// operand mode).
    pub const fn is_binop(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Mulh
                | Opcode::And
                | Opcode::Or
                | Opcode::Eor
                | Opcode::Shl
                | Opcode::Shr
                | Opcode::Shrs
        )
    }

    const fn signature(self) -> Signature {
        match self {
            Opcode::Block => sig(&[], Some(Control)),
            Opcode::End => sig(&[], Some(Any)),
            Opcode::Start | Opcode::Jmp | Opcode::Const => sig(&[], None),
            Opcode::Proj => sig(&[Tuple], None),
            Opcode::Return => sig(&[Memory], Some(Data)),
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Mulh
            | Opcode::And
            | Opcode::Or
            | Opcode::Eor => BINOP,
            Opcode::Shl | Opcode::Shr | Opcode::Shrs => SHIFT,
            Opcode::Div | Opcode::Mod => DIVMOD,
            Opcode::Conv | Opcode::Cast => sig(&[Data], None),
            Opcode::Pin => sig(&[Any], None),
            Opcode::Load => sig(&[Memory, Reference], None),
            Opcode::Store => sig(&[Memory, Reference, Data], None),
            Opcode::Builtin => sig(&[Memory], Some(Data)),
        }
    }

    /// Number of operands every node of this opcode has.
    pub const fn fixed_arity(self) -> usize {
        self.signature().fixed.len()
    }

    /// Whether further operands may follow the fixed ones.
    pub const fn is_variadic(self) -> bool {
        self.signature().rest.is_some()
    }

    /// Mode class operand `pos` must have, or `None` if there is no such
    /// operand position.
    pub fn operand_class(self, pos: usize) -> Option<ModeClass> {
        let sig = self.signature();
        sig.fixed.get(pos).copied().or(sig.rest)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
