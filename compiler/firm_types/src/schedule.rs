//! Automatic layout ordering.
//!
//! `finish_layout` on a single type only checks that its dependencies are
//! already fixed. [`finish_layout_all`] instead walks the containment graph
//! from a set of roots and finishes every reachable undefined type after the
//! types it contains.

use firm_store::{IrStore, TypeRef};
use rustc_hash::FxHashSet;

use crate::layout::{state_of, LayoutState};
use crate::{HasLayout, LayoutError, Type};

struct Scheduler {
    /// Types on the current DFS path. Meeting one again means the type
    /// contains itself without indirection.
    visiting: FxHashSet<TypeRef>,
    done: FxHashSet<TypeRef>,
    finished: Vec<TypeRef>,
}

impl Scheduler {
    fn visit(&mut self, store: &mut dyn IrStore, ty: TypeRef) -> Result<(), LayoutError> {
        if self.done.contains(&ty) || state_of(store, ty) == LayoutState::LayoutFixed {
            return Ok(());
        }
        if !self.visiting.insert(ty) {
            return Err(LayoutError::ContainmentCycle { ty });
        }

        let wrapped = Type::wrap(store, ty)?;
        for dep in wrapped.contained(store) {
            self.visit(store, dep)?;
        }
        wrapped.finish_layout(store)?;

        self.visiting.remove(&ty);
        self.done.insert(ty);
        self.finished.push(ty);
        Ok(())
    }
}

/// Finish the layout of `roots` and of every undefined type they contain,
/// dependencies first.
///
/// Pointers and methods do not contain their referents, so recursive types
/// through pointers are fine. A type reachable from itself through array
/// elements, members or supertypes is a [`LayoutError::ContainmentCycle`].
/// Types that are already fixed are skipped. Returns the newly finished
/// types in the order they were finished.
///
/// On error, types finished before the failure stay finished.
#[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
pub fn finish_layout_all(
    store: &mut dyn IrStore,
    roots: &[TypeRef],
) -> Result<Vec<TypeRef>, LayoutError> {
    let mut scheduler = Scheduler {
        visiting: FxHashSet::default(),
        done: FxHashSet::default(),
        finished: Vec::new(),
    };
    for &root in roots {
        scheduler.visit(store, root)?;
    }
    tracing::debug!(finished = scheduler.finished.len(), "layout schedule complete");
    Ok(scheduler.finished)
}

#[cfg(test)]
mod tests;
