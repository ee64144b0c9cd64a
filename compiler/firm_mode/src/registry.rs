//! Process-wide mode interning.
//!
//! The registry is created on first use and lives for the rest of the
//! process. Lookups and insertions share one lock region, so concurrent
//! requests for the same descriptor can never produce two modes.

use std::sync::OnceLock;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::mode::ModeData;
use crate::{Mode, ModeDescriptor, ModeError, ModeSort, SortClass};

/// Interning key.
///
/// Data and boolean modes are identified by their descriptor alone. Modes
/// without a representation (`X` and `BB`, or `T`, `ANY` and `BAD`) share a
/// descriptor, so their name takes part in the key. Only the predefined
/// modes of those sorts exist; no new ones can be interned.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ModeKey {
    desc: ModeDescriptor,
    name: Option<Box<str>>,
}

impl ModeKey {
    fn new(name: &str, desc: ModeDescriptor) -> Self {
        let name = if desc.sort.class().contains(SortClass::DATAB) {
            None
        } else {
            Some(name.into())
        };
        ModeKey { desc, name }
    }
}

#[derive(Default)]
struct Table {
    map: FxHashMap<ModeKey, &'static ModeData>,
    order: Vec<Mode>,
}

impl Table {
    /// Return the existing mode for `key`, or leak a new entry for it.
    fn intern(&mut self, name: &str, desc: ModeDescriptor) -> Mode {
        let key = ModeKey::new(name, desc);
        if let Some(&data) = self.map.get(&key) {
            tracing::trace!(mode = %data.name, "mode interning hit");
            return Mode::from_data(data);
        }

        let data: &'static ModeData = Box::leak(Box::new(ModeData {
            name: name.into(),
            desc,
        }));
        self.map.insert(key, data);
        let mode = Mode::from_data(data);
        self.order.push(mode);
        tracing::debug!(mode = name, bits = desc.bit_size, sort = %desc.sort, "interned new mode");
        mode
    }
}

/// Modes every compilation needs, interned when the registry is created.
#[derive(Copy, Clone, Debug)]
pub struct Predefined {
    /// 32-bit IEEE float.
    pub f: Mode,
    /// 64-bit IEEE float.
    pub d: Mode,
    /// 80-bit extended float.
    pub e: Mode,
    pub bs: Mode,
    pub bu: Mode,
    pub hs: Mode,
    pub hu: Mode,
    pub is: Mode,
    pub iu: Mode,
    pub ls: Mode,
    pub lu: Mode,
    pub lls: Mode,
    pub llu: Mode,
    /// 64-bit reference.
    pub p: Mode,
    /// Internal boolean.
    pub b: Mode,
    /// Control flow.
    pub x: Mode,
    /// Basic block.
    pub bb: Mode,
    /// Memory state.
    pub m: Mode,
    /// Tuple.
    pub t: Mode,
    pub any: Mode,
    pub bad: Mode,
}

impl Predefined {
    fn intern_all(table: &mut Table) -> Self {
        let mut int = |name: &str, bits: u32, signed: bool| {
            table.intern(name, ModeDescriptor::int(bits, signed))
        };
        let bs = int("Bs", 8, true);
        let bu = int("Bu", 8, false);
        let hs = int("Hs", 16, true);
        let hu = int("Hu", 16, false);
        let is = int("Is", 32, true);
        let iu = int("Iu", 32, false);
        let ls = int("Ls", 64, true);
        let lu = int("Lu", 64, false);
        let lls = int("LLs", 128, true);
        let llu = int("LLu", 128, false);

        Predefined {
            f: table.intern("F", ModeDescriptor::float(32)),
            d: table.intern("D", ModeDescriptor::float(64)),
            e: table.intern("E", ModeDescriptor::float(80)),
            bs,
            bu,
            hs,
            hu,
            is,
            iu,
            ls,
            lu,
            lls,
            llu,
            p: table.intern("P", ModeDescriptor::reference(64)),
            b: table.intern("b", ModeDescriptor::internal_boolean()),
            x: table.intern("X", ModeDescriptor::special(ModeSort::ControlFlow)),
            bb: table.intern("BB", ModeDescriptor::special(ModeSort::ControlFlow)),
            m: table.intern("M", ModeDescriptor::special(ModeSort::Memory)),
            t: table.intern("T", ModeDescriptor::special(ModeSort::Auxiliary)),
            any: table.intern("ANY", ModeDescriptor::special(ModeSort::Auxiliary)),
            bad: table.intern("BAD", ModeDescriptor::special(ModeSort::Auxiliary)),
        }
    }
}

static REGISTRY: OnceLock<ModeRegistry> = OnceLock::new();

/// The process-wide mode table.
pub struct ModeRegistry {
    table: Mutex<Table>,
    predefined: Predefined,
}

impl ModeRegistry {
    /// The registry, created (with all predefined modes) on first call.
    pub fn global() -> &'static ModeRegistry {
        REGISTRY.get_or_init(ModeRegistry::new)
    }

    fn new() -> Self {
        let mut table = Table::default();
        let predefined = Predefined::intern_all(&mut table);
        tracing::debug!(modes = table.order.len(), "mode registry initialised");
        ModeRegistry {
            table: Mutex::new(table),
            predefined,
        }
    }

    /// Return the mode for `desc`, interning it under `name` if it is new.
    ///
    /// For data and boolean modes the descriptor alone decides identity and
    /// `name` is only used when the mode is created. The descriptor is
    /// validated before the table is touched.
    ///
    /// Modes without a representation are never created here: a request for
    /// one resolves to the predefined mode of that name, or fails with
    /// [`ModeError::UnknownSpecialMode`].
    pub fn get_or_create(&self, name: &str, desc: ModeDescriptor) -> Result<Mode, ModeError> {
        desc.validate()?;
        let mut table = self.table.lock();
        if desc.sort.class().contains(SortClass::DATAB) {
            return Ok(table.intern(name, desc));
        }
        table
            .map
            .get(&ModeKey::new(name, desc))
            .copied()
            .map(Mode::from_data)
            .ok_or_else(|| ModeError::UnknownSpecialMode {
                name: name.into(),
                sort: desc.sort,
            })
    }

    /// Look up an already interned data or boolean mode by descriptor.
    pub fn find(&self, desc: &ModeDescriptor) -> Option<Mode> {
        if !desc.sort.class().contains(SortClass::DATAB) {
            return None;
        }
        let key = ModeKey {
            desc: *desc,
            name: None,
        };
        self.table.lock().map.get(&key).copied().map(Mode::from_data)
    }

    #[inline]
    pub fn predefined(&self) -> &Predefined {
        &self.predefined
    }

    pub fn len(&self) -> usize {
        self.table.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every interned mode, in creation order.
    pub fn all(&self) -> Vec<Mode> {
        self.table.lock().order.clone()
    }
}

/// Shorthand for `ModeRegistry::global().predefined()`.
#[inline]
pub fn modes() -> &'static Predefined {
    ModeRegistry::global().predefined()
}
