//! Process-wide initialisation and teardown.
//!
//! Every store is created under a [`Session`]. Sessions are reference
//! counted: the first [`init`] populates the mode registry, and dropping the
//! last session runs the hooks registered with [`on_teardown`]. Modes are
//! never destroyed, so a later `init` finds the registry already populated.

use std::sync::atomic::{AtomicUsize, Ordering};

use firm_mode::ModeRegistry;
use parking_lot::Mutex;

type Hook = Box<dyn FnOnce() + Send>;

static LIVE: AtomicUsize = AtomicUsize::new(0);
static TEARDOWN: Mutex<Vec<Hook>> = Mutex::new(Vec::new());

/// Proof that the IR library is initialised.
#[derive(Debug)]
pub struct Session {
    _private: (),
}

/// Initialise the IR library, or join the already running session.
pub fn init() -> Session {
    if LIVE.fetch_add(1, Ordering::AcqRel) == 0 {
        let registry = ModeRegistry::global();
        tracing::debug!(modes = registry.len(), "firm session initialised");
    }
    Session { _private: () }
}

/// Number of sessions currently alive.
pub fn live_sessions() -> usize {
    LIVE.load(Ordering::Acquire)
}

/// Run `hook` once, when the last live session is dropped.
///
/// Hooks run in registration order and are discarded afterwards; a later
/// session starts with none. A hook must not call `on_teardown` itself.
pub fn on_teardown(hook: impl FnOnce() + Send + 'static) {
    TEARDOWN.lock().push(Box::new(hook));
}

fn teardown() {
    // Held while the hooks run, so a concurrent teardown waits for them.
    let mut hooks = TEARDOWN.lock();
    tracing::debug!(hooks = hooks.len(), "firm session torn down");
    for hook in hooks.drain(..) {
        hook();
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        LIVE.fetch_add(1, Ordering::AcqRel);
        Session { _private: () }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if LIVE.fetch_sub(1, Ordering::AcqRel) == 1 {
            teardown();
        }
    }
}
