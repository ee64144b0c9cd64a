//! Pin states.

use std::fmt;

/// How freely a node may be scheduled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PinState {
    /// Placed anywhere its operands dominate.
    Floats = 0,
    /// Stays in its block.
    Pinned = 1,
    /// Pinned only while it may raise an exception.
    ExcPinned = 2,
    /// Pinned only while it touches memory.
    MemPinned = 3,
}

impl PinState {
    pub const fn from_raw(raw: i64) -> Option<PinState> {
        match raw {
            0 => Some(PinState::Floats),
            1 => Some(PinState::Pinned),
            2 => Some(PinState::ExcPinned),
            3 => Some(PinState::MemPinned),
            _ => None,
        }
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self as i64
    }

    pub const fn name(self) -> &'static str {
        match self {
            PinState::Floats => "floats",
            PinState::Pinned => "pinned",
            PinState::ExcPinned => "exc_pinned",
            PinState::MemPinned => "mem_pinned",
        }
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
