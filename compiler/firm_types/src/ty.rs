//! The closed set of type variants and the dispatch from raw handles.

use firm_mode::Mode;
use firm_store::{DispatchError, IrStore, TypeRef, TypeTag};

use crate::{
    ArrayType, ClassType, HasLayout, LayoutError, MethodType, OpaqueType, PointerType,
    PrimitiveType, StructType,
};

/// A type handle with its variant resolved.
///
/// Produced once, by [`Type::wrap`], where a raw handle enters from the
/// store. Wrapping the same handle twice yields equal values that read the
/// same store state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveType),
    Pointer(PointerType),
    Method(MethodType),
    Array(ArrayType),
    Struct(StructType),
    Class(ClassType),
    /// Unions and compound kinds unknown to this crate.
    Opaque(OpaqueType),
}

impl Type {
    /// Resolve the variant of `ty` from its kind tag.
    ///
    /// Unions become [`Type::Opaque`] silently. Any other tag in the compound
    /// range also becomes `Opaque`, with a warning. Every remaining tag is a
    /// [`DispatchError`].
    pub fn wrap(store: &dyn IrStore, ty: TypeRef) -> Result<Type, DispatchError> {
        let tag = store.type_tag(ty);
        let wrapped = match tag {
            TypeTag::PRIMITIVE => Type::Primitive(PrimitiveType::from_ref(ty)),
            TypeTag::METHOD => Type::Method(MethodType::from_ref(ty)),
            TypeTag::ARRAY => Type::Array(ArrayType::from_ref(ty)),
            TypeTag::CLASS => Type::Class(ClassType::from_ref(ty)),
            TypeTag::POINTER => Type::Pointer(PointerType::from_ref(ty)),
            TypeTag::STRUCT => Type::Struct(StructType::from_ref(ty)),
            TypeTag::UNION => Type::Opaque(OpaqueType::from_ref(ty)),
            tag if tag.is_compound() => {
                tracing::warn!(?ty, %tag, "unknown compound type kind, treating as opaque");
                Type::Opaque(OpaqueType::from_ref(ty))
            }
            tag => return Err(DispatchError::UnknownTypeKind { ty, tag }),
        };
        Ok(wrapped)
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            Type::Primitive(_) => "primitive",
            Type::Pointer(_) => "pointer",
            Type::Method(_) => "method",
            Type::Array(_) => "array",
            Type::Struct(_) => "struct",
            Type::Class(_) => "class",
            Type::Opaque(_) => "opaque",
        }
    }

    /// Struct, class and opaque compounds own member entities.
    pub fn is_compound(self) -> bool {
        matches!(self, Type::Struct(_) | Type::Class(_) | Type::Opaque(_))
    }

    pub fn as_primitive(self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_pointer(self) -> Option<PointerType> {
        match self {
            Type::Pointer(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_method(self) -> Option<MethodType> {
        match self {
            Type::Method(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(self) -> Option<ArrayType> {
        match self {
            Type::Array(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_struct(self) -> Option<StructType> {
        match self {
            Type::Struct(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_class(self) -> Option<ClassType> {
        match self {
            Type::Class(t) => Some(t),
            _ => None,
        }
    }

    /// Types whose layout depends on other types being laid out first.
    pub(crate) fn contained(self, store: &dyn IrStore) -> Vec<TypeRef> {
        match self {
            Type::Array(a) => vec![a.element_type(store)],
            Type::Struct(s) => s.members(store).iter().map(|m| m.type_ref(store)).collect(),
            Type::Class(c) => c
                .members(store)
                .iter()
                .map(|m| m.type_ref(store))
                .chain(c.supertypes(store).into_iter().map(HasLayout::type_ref))
                .collect(),
            Type::Opaque(o) => o.members(store).iter().map(|m| m.type_ref(store)).collect(),
            Type::Primitive(_) | Type::Pointer(_) | Type::Method(_) => Vec::new(),
        }
    }
}

macro_rules! each_variant {
    ($self:expr, $t:ident => $body:expr) => {
        match $self {
            Type::Primitive($t) => $body,
            Type::Pointer($t) => $body,
            Type::Method($t) => $body,
            Type::Array($t) => $body,
            Type::Struct($t) => $body,
            Type::Class($t) => $body,
            Type::Opaque($t) => $body,
        }
    };
}

impl HasLayout for Type {
    fn type_ref(self) -> TypeRef {
        each_variant!(self, t => t.type_ref())
    }

    fn finish_layout(self, store: &mut dyn IrStore) -> Result<(), LayoutError> {
        each_variant!(self, t => t.finish_layout(store))
    }

    fn mode(self, store: &dyn IrStore) -> Option<Mode> {
        each_variant!(self, t => t.mode(store))
    }
}
