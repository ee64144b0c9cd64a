//! Types, entities and the layout engine.
//!
//! Every type goes through two layout states:
//!
//! 1. **Undefined**: created, mutable, size and alignment unreadable.
//! 2. **Layout fixed**: [`HasLayout::finish_layout`] computed size and
//!    alignment; the type is frozen.
//!
//! An aggregate may only be finished after everything it structurally
//! contains (array elements, member types, class supertypes) is finished.
//! Callers either respect that order themselves or let
//! [`finish_layout_all`] derive it from the containment graph.
//!
//! Wrappers (`ArrayType`, `StructType`, ...) are `Copy` handles; all state
//! lives in the [`IrStore`](firm_store::IrStore). [`Type::wrap`] recovers the
//! variant of a raw [`TypeRef`](firm_store::TypeRef) handed out by the store.

mod array;
mod class;
mod compound;
mod entity;
mod error;
mod layout;
mod method;
mod opaque;
mod pointer;
mod primitive;
mod schedule;
mod structure;
mod ty;

#[cfg(test)]
mod test_helpers;

pub use array::{ArrayBound, ArrayType};
pub use class::ClassType;
pub use entity::Entity;
pub use error::LayoutError;
pub use layout::{HasLayout, LayoutState};
pub use method::{MethodProperties, MethodType};
pub use opaque::OpaqueType;
pub use pointer::PointerType;
pub use primitive::PrimitiveType;
pub use schedule::finish_layout_all;
pub use structure::StructType;
pub use ty::Type;
