//! Target type descriptors
//!
//! A [`TargetType`] tells the engine what a value should coerce or
//! construct into: a builtin scalar, the map type, an enum resolved by
//! variant name, or a registry-named type. The `primitive` flag marks
//! strict-non-null targets, which refuse absent paths and null handler
//! resolutions.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Enum descriptor: type name plus variant-by-name lookup.
///
/// Replaces name-based enum reflection with an explicit lookup function;
/// an unknown variant name resolves to `None`.
#[derive(Clone, Copy)]
pub struct EnumSpec {
    pub type_name: &'static str,
    pub from_name: fn(&str) -> Option<Rc<dyn Any>>,
}

impl PartialEq for EnumSpec {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl fmt::Debug for EnumSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumSpec")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The kind half of a target type; also the unit of constructor matching.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    String,
    Integer,
    Double,
    Boolean,
    Map,
    /// Enum coerced from a variant-name string
    Enum(EnumSpec),
    /// Type registered by name in the session registry
    Named(String),
}

impl TypeKind {
    pub fn named(name: impl Into<String>) -> Self {
        TypeKind::Named(name.into())
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::String => f.write_str("string"),
            TypeKind::Integer => f.write_str("int"),
            TypeKind::Double => f.write_str("double"),
            TypeKind::Boolean => f.write_str("bool"),
            TypeKind::Map => f.write_str("map"),
            TypeKind::Enum(spec) => f.write_str(spec.type_name),
            TypeKind::Named(name) => f.write_str(name),
        }
    }
}

/// Caller- or slot-declared type for a value under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetType {
    pub kind: TypeKind,
    /// Strict non-null: absent paths and null resolutions are hard errors.
    pub primitive: bool,
}

impl TargetType {
    pub fn of(kind: TypeKind) -> Self {
        Self {
            kind,
            primitive: false,
        }
    }

    /// Strict-non-null target, the moral equivalent of an unboxed
    /// primitive.
    pub fn primitive(kind: TypeKind) -> Self {
        Self {
            kind,
            primitive: true,
        }
    }

    pub fn string() -> Self {
        Self::of(TypeKind::String)
    }

    pub fn int() -> Self {
        Self::of(TypeKind::Integer)
    }

    pub fn double() -> Self {
        Self::of(TypeKind::Double)
    }

    pub fn boolean() -> Self {
        Self::of(TypeKind::Boolean)
    }

    pub fn map() -> Self {
        Self::of(TypeKind::Map)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::of(TypeKind::named(name))
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
