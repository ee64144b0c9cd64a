//! Builtin operation kinds.

use std::fmt;

/// Operation performed by a `Builtin` node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BuiltinKind {
    Trap = 0,
    Debugbreak = 1,
    ReturnAddress = 2,
    FrameAddress = 3,
    Prefetch = 4,
    /// Index of the lowest set bit plus one, zero for zero.
    Ffs = 5,
    Clz = 6,
    Ctz = 7,
    Popcount = 8,
    Parity = 9,
    Bswap = 10,
    Inport = 11,
    Outport = 12,
    InnerTrampoline = 13,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 14] = [
        BuiltinKind::Trap,
        BuiltinKind::Debugbreak,
        BuiltinKind::ReturnAddress,
        BuiltinKind::FrameAddress,
        BuiltinKind::Prefetch,
        BuiltinKind::Ffs,
        BuiltinKind::Clz,
        BuiltinKind::Ctz,
        BuiltinKind::Popcount,
        BuiltinKind::Parity,
        BuiltinKind::Bswap,
        BuiltinKind::Inport,
        BuiltinKind::Outport,
        BuiltinKind::InnerTrampoline,
    ];

    pub fn from_raw(raw: i64) -> Option<BuiltinKind> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self as i64
    }

    pub const fn name(self) -> &'static str {
        match self {
            BuiltinKind::Trap => "trap",
            BuiltinKind::Debugbreak => "debugbreak",
            BuiltinKind::ReturnAddress => "return_address",
            BuiltinKind::FrameAddress => "frame_address",
            BuiltinKind::Prefetch => "prefetch",
            BuiltinKind::Ffs => "ffs",
            BuiltinKind::Clz => "clz",
            BuiltinKind::Ctz => "ctz",
            BuiltinKind::Popcount => "popcount",
            BuiltinKind::Parity => "parity",
            BuiltinKind::Bswap => "bswap",
            BuiltinKind::Inport => "inport",
            BuiltinKind::Outport => "outport",
            BuiltinKind::InnerTrampoline => "inner_trampoline",
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_match_table_positions() {
        for (i, kind) in BuiltinKind::ALL.iter().enumerate() {
            assert_eq!(BuiltinKind::from_raw(i as i64), Some(*kind));
            assert_eq!(kind.raw(), i as i64);
        }
        assert_eq!(BuiltinKind::from_raw(14), None);
        assert_eq!(BuiltinKind::from_raw(-1), None);
    }
}
