//! The IR store boundary.
//!
//! The typed layers (`firm_types`, `firm_nodes`) never own IR memory. They
//! hold `Copy` handles and go through [`IrStore`] for every read and write:
//!
//! - handle identity (`TypeRef`, `NodeRef`, `EntityRef`, `GraphRef`)
//! - one kind tag per handle ([`TypeTag`], [`OpTag`])
//! - raw fields addressed by `(handle, attribute)` as [`RawValue`]s
//! - ordered lists (parameters, members, bounds, node inputs)
//!
//! [`MemoryStore`] is the arena-backed implementation used by tests and by
//! tools that do not link a native graph engine. All stores are created under
//! a [`Session`], obtained from [`init`].

/// Compile-time assertion that a type has a specific size.
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod attr;
mod error;
mod handle;
mod memory;
mod session;
mod store;
mod tag;
mod target;
mod value;

pub use attr::{EntityAttr, GraphAnchor, NodeAttr, TypeAttr, TypeList};
pub use error::{DispatchError, StoreError};
pub use handle::{EntityRef, GraphRef, NodeRef, TypeRef};
pub use memory::MemoryStore;
pub use session::{init, live_sessions, on_teardown, Session};
pub use store::IrStore;
pub use tag::{OpTag, TypeTag};
pub use target::{TargetConfig, POINTER_BITS_ENV};
pub use value::RawValue;

static_assert_size!(TypeRef, 4);
static_assert_size!(NodeRef, 4);
static_assert_size!(Option<NodeRef>, 8);
static_assert_size!(TypeTag, 1);
static_assert_size!(OpTag, 2);
