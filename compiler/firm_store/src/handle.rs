//! Opaque handles into an IR store.

/// Defines `Copy` index handles.
///
/// Each generated type wraps a `u32` arena index and has:
/// - `new()`, `index()` and `raw()`
/// - identity `Eq`/`Hash` on the index
/// - `Debug` as `TypeName(index)`
macro_rules! define_handle {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Position in the owning store's arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

define_handle!(
    /// A type in the store.
    TypeRef,
    /// A node in some procedure graph.
    NodeRef,
    /// A named, located binding of a type.
    EntityRef,
    /// A procedure graph.
    GraphRef,
);
