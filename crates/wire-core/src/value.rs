//! Runtime values produced by construction and coercion
//!
//! Maps and constructed objects are `Rc`-shared so reference-cached
//! values keep their identity across resolutions; everything else is a
//! plain owned scalar.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::target::TypeKind;

/// Materialized map: ordered, with non-string keys allowed.
pub type ValueMap = IndexMap<MapKey, Value>;

/// A runtime value produced by the construction engine.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent optional
    Null,
    Str(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    Map(Rc<ValueMap>),
    Object(ObjectRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short lowercase kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    /// The constructor-matching kind of this value, `None` for null.
    pub fn type_kind(&self) -> Option<TypeKind> {
        match self {
            Value::Null => None,
            Value::Str(_) => Some(TypeKind::String),
            Value::Int(_) => Some(TypeKind::Integer),
            Value::Double(_) => Some(TypeKind::Double),
            Value::Bool(_) => Some(TypeKind::Boolean),
            Value::Map(_) => Some(TypeKind::Map),
            Value::Object(obj) => Some(TypeKind::Named(obj.type_name().to_string())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Extract a string; null maps to `None`, any other kind is an error.
    ///
    /// The `try_into_*` family is the intended surface for
    /// [`Wired::assign`](crate::Wired::assign) implementations.
    pub fn try_into_string(self) -> Result<Option<String>> {
        match self {
            Value::Null => Ok(None),
            Value::Str(s) => Ok(Some(s)),
            other => Err(kind_error("string", &other)),
        }
    }

    pub fn try_into_int(self) -> Result<Option<i64>> {
        match self {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(i)),
            other => Err(kind_error("int", &other)),
        }
    }

    pub fn try_into_double(self) -> Result<Option<f64>> {
        match self {
            Value::Null => Ok(None),
            Value::Double(d) => Ok(Some(d)),
            other => Err(kind_error("double", &other)),
        }
    }

    pub fn try_into_bool(self) -> Result<Option<bool>> {
        match self {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(b)),
            other => Err(kind_error("bool", &other)),
        }
    }

    pub fn try_into_map(self) -> Result<Option<Rc<ValueMap>>> {
        match self {
            Value::Null => Ok(None),
            Value::Map(map) => Ok(Some(map)),
            other => Err(kind_error("map", &other)),
        }
    }

    pub fn try_into_object(self) -> Result<Option<ObjectRef>> {
        match self {
            Value::Null => Ok(None),
            Value::Object(obj) => Ok(Some(obj)),
            other => Err(kind_error("object", &other)),
        }
    }
}

fn kind_error(expected: &str, found: &Value) -> Error {
    Error::ValueKind {
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    }
}

/// A constructed instance with its registered type name.
///
/// Cloning shares the instance; [`ObjectRef::ptr_eq`] observes the
/// sharing guarantee of the reference cache.
#[derive(Clone)]
pub struct ObjectRef {
    type_name: String,
    inner: Rc<dyn Any>,
}

impl ObjectRef {
    pub fn new<T: Any>(type_name: impl Into<String>, value: T) -> Self {
        Self {
            type_name: type_name.into(),
            inner: Rc::new(value),
        }
    }

    pub(crate) fn from_parts(type_name: String, inner: Rc<dyn Any>) -> Self {
        Self { type_name, inner }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Pointer identity of the shared instance.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Hashable subset of [`Value`] usable as a map key.
///
/// Doubles hash by bit pattern; objects compare and hash by pointer
/// identity. Maps and null cannot be keys.
#[derive(Debug, Clone)]
pub struct MapKey(Value);

impl MapKey {
    /// Wrap a value, rejecting kinds that cannot be hashed.
    pub fn try_from_value(value: Value) -> Result<MapKey> {
        match value {
            Value::Null | Value::Map(_) => Err(Error::ValueKind {
                expected: "hashable map key".to_string(),
                found: value.kind_name().to_string(),
            }),
            other => Ok(MapKey(other)),
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        MapKey(Value::Str(key.to_owned()))
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        MapKey(Value::Str(key))
    }
}

impl From<i64> for MapKey {
    fn from(key: i64) -> Self {
        MapKey(Value::Int(key))
    }
}

impl From<bool> for MapKey {
    fn from(key: bool) -> Self {
        MapKey(Value::Bool(key))
    }
}

impl From<f64> for MapKey {
    fn from(key: f64) -> Self {
        MapKey(Value::Double(key))
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Value::Str(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Value::Int(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            Value::Bool(b) => {
                2u8.hash(state);
                b.hash(state);
            }
            Value::Double(d) => {
                3u8.hash(state);
                d.to_bits().hash(state);
            }
            Value::Object(obj) => {
                4u8.hash(state);
                obj.addr().hash(state);
            }
            // rejected by construction
            Value::Null | Value::Map(_) => 5u8.hash(state),
        }
    }
}
