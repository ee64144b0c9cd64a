//! Typed core of the Firm compiler IR.
//!
//! This crate re-exports the layers a pass author works with:
//!
//! - [`mode`]: interned machine value descriptors ([`Mode`], [`modes`])
//! - [`store`]: the handle-based [`IrStore`] boundary and [`MemoryStore`]
//! - [`types`]: types, entities and the two-phase layout engine
//! - [`nodes`]: typed node wrappers, visitor dispatch, walking, verification
//!
//! ```
//! use firm::{init, modes, HasLayout, MemoryStore, PrimitiveType, StructType, TargetConfig};
//!
//! let session = init();
//! let mut store = MemoryStore::new(&session, TargetConfig::default())?;
//! let int = PrimitiveType::new(&mut store, modes().is)?;
//! int.finish_layout(&mut store)?;
//! let point = StructType::new(&mut store);
//! point.add_member(&mut store, "x", int.type_ref())?;
//! point.add_member(&mut store, "y", int.type_ref())?;
//! point.finish_layout(&mut store)?;
//! assert_eq!(point.size_bytes(&store)?, 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Once;

pub use firm_mode as mode;
pub use firm_nodes as nodes;
pub use firm_store as store;
pub use firm_types as types;

pub use firm_mode::{modes, Mode, ModeDescriptor, ModeError, ModeRegistry, ModeSort};
pub use firm_nodes::{
    init_graph, procedure_end, verify_graph, walk_graph, HasOperands, Node, NodeError,
    NodeVisitor, Opcode, VerifyProblem,
};
pub use firm_store::{
    init, DispatchError, IrStore, MemoryStore, NodeRef, Session, StoreError, TargetConfig,
    TypeRef,
};
pub use firm_types::{
    finish_layout_all, ArrayType, ClassType, Entity, HasLayout, LayoutError, LayoutState,
    MethodType, PointerType, PrimitiveType, StructType, Type,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; later calls are no-ops. Enable with
/// e.g. `RUST_LOG=firm_types=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_some() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            tracing::debug!("tracing initialised");
        }
    });
}
