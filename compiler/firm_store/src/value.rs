//! Untyped field values.

use firm_mode::Mode;

use crate::{EntityRef, GraphRef, NodeRef, TypeRef};

/// The content of one raw store field.
///
/// Typed accessors know which shape a field must have. Finding another shape
/// means the store is corrupt, which is why the `expect_*` helpers panic
/// instead of returning an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RawValue {
    /// Field never written.
    #[default]
    Absent,
    Int(i64),
    Flag(bool),
    Mode(Mode),
    Type(TypeRef),
    Node(NodeRef),
    Entity(EntityRef),
    Graph(GraphRef),
}

macro_rules! raw_accessors {
    ($($variant:ident => $as:ident, $expect:ident: $ty:ty;)*) => { $(
        #[inline]
        pub fn $as(self) -> Option<$ty> {
            match self {
                RawValue::$variant(v) => Some(v),
                _ => None,
            }
        }

        /// Like the `as_*` accessor, treating `Absent` as `None` and any other
        /// shape as store corruption.
        #[track_caller]
        pub fn $expect(self, field: &dyn ::std::fmt::Debug) -> Option<$ty> {
            match self {
                RawValue::$variant(v) => Some(v),
                RawValue::Absent => None,
                other => panic!(
                    "store corruption: field {field:?} holds {} where {} was expected",
                    other.shape(),
                    stringify!($variant),
                ),
            }
        }
    )* };
}

impl RawValue {
    raw_accessors! {
        Int => as_int, expect_int: i64;
        Flag => as_flag, expect_flag: bool;
        Mode => as_mode, expect_mode: Mode;
        Type => as_type, expect_type: TypeRef;
        Node => as_node, expect_node: NodeRef;
        Entity => as_entity, expect_entity: EntityRef;
        Graph => as_graph, expect_graph: GraphRef;
    }

    #[inline]
    pub fn is_absent(self) -> bool {
        matches!(self, RawValue::Absent)
    }

    /// Name of the variant, for diagnostics.
    pub fn shape(self) -> &'static str {
        match self {
            RawValue::Absent => "Absent",
            RawValue::Int(_) => "Int",
            RawValue::Flag(_) => "Flag",
            RawValue::Mode(_) => "Mode",
            RawValue::Type(_) => "Type",
            RawValue::Node(_) => "Node",
            RawValue::Entity(_) => "Entity",
            RawValue::Graph(_) => "Graph",
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Flag(v)
    }
}

impl From<Mode> for RawValue {
    fn from(v: Mode) -> Self {
        RawValue::Mode(v)
    }
}

impl From<TypeRef> for RawValue {
    fn from(v: TypeRef) -> Self {
        RawValue::Type(v)
    }
}

impl From<NodeRef> for RawValue {
    fn from(v: NodeRef) -> Self {
        RawValue::Node(v)
    }
}

impl From<EntityRef> for RawValue {
    fn from(v: EntityRef) -> Self {
        RawValue::Entity(v)
    }
}

impl From<GraphRef> for RawValue {
    fn from(v: GraphRef) -> Self {
        RawValue::Graph(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_only_their_shape() {
        let v = RawValue::from(TypeRef::new(2));
        assert_eq!(v.as_type(), Some(TypeRef::new(2)));
        assert_eq!(v.as_node(), None);
        assert_eq!(RawValue::from(None::<i64>), RawValue::Absent);
    }

    #[test]
    fn expect_treats_absent_as_none() {
        assert_eq!(RawValue::Absent.expect_int(&"size"), None);
        assert_eq!(RawValue::Int(4).expect_int(&"size"), Some(4));
    }

    #[test]
    #[should_panic(expected = "store corruption")]
    fn expect_panics_on_wrong_shape() {
        let _ = RawValue::Flag(true).expect_int(&"size");
    }
}
