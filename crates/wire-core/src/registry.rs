//! Session type registry
//!
//! `~type` names resolve through an explicit name → type map rather than
//! ambient reflection. Each entry carries the positional constructors the
//! engine may match against coerced argument kinds; matching is exact on
//! arity and kinds.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::target::{TargetType, TypeKind};
use crate::value::Value;
use crate::wired::Wired;

/// Output of a constructor: a finished value, or a bean that may still
/// receive field wiring before it is sealed.
pub enum Constructed {
    Value(Value),
    Bean(Box<dyn Wired>),
}

type BuildFn = Box<dyn Fn(Vec<Value>) -> Result<Constructed>>;

/// One positional constructor of a registered type.
pub struct Constructor {
    params: Vec<TypeKind>,
    build: BuildFn,
}

impl Constructor {
    pub(crate) fn construct(&self, args: Vec<Value>) -> Result<Constructed> {
        (self.build)(args)
    }
}

/// A registered runtime type.
pub struct TypeEntry {
    name: String,
    kind: TypeKind,
    constructors: Vec<Constructor>,
}

impl TypeEntry {
    /// Entry for a user type, addressed as `TypeKind::Named(name)`.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: TypeKind::Named(name.clone()),
            name,
            constructors: Vec::new(),
        }
    }

    /// Entry for a bean type with a zero-argument constructor.
    pub fn bean<T>(name: impl Into<String>) -> Self
    where
        T: Wired + Default + 'static,
    {
        Self::named(name).with_constructor(vec![], |_| Ok(Constructed::Bean(Box::new(T::default()))))
    }

    fn builtin(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            constructors: Vec::new(),
        }
    }

    /// Add a positional constructor.
    pub fn with_constructor(
        mut self,
        params: Vec<TypeKind>,
        build: impl Fn(Vec<Value>) -> Result<Constructed> + 'static,
    ) -> Self {
        self.constructors.push(Constructor {
            params,
            build: Box::new(build),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn find(&self, args: &[TypeKind]) -> Option<&Constructor> {
        self.constructors.iter().find(|c| c.params.as_slice() == args)
    }
}

/// Session-scoped map from type name to entry.
///
/// The builtins `string`, `int`, `bool`, `double` and `map` are always
/// registered. Each scalar builtin has its identity constructor (`double`
/// also widens an integer argument); `map` has no constructors and is
/// materialized by the engine's map routes instead.
pub struct TypeRegistry {
    entries: HashMap<String, TypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.register(
            TypeEntry::builtin("string", TypeKind::String)
                .with_constructor(vec![TypeKind::String], identity),
        );
        registry.register(
            TypeEntry::builtin("int", TypeKind::Integer)
                .with_constructor(vec![TypeKind::Integer], identity),
        );
        registry.register(
            TypeEntry::builtin("bool", TypeKind::Boolean)
                .with_constructor(vec![TypeKind::Boolean], identity),
        );
        registry.register(
            TypeEntry::builtin("double", TypeKind::Double)
                .with_constructor(vec![TypeKind::Double], identity)
                .with_constructor(vec![TypeKind::Integer], |mut args| match args.remove(0) {
                    Value::Int(i) => Ok(Constructed::Value(Value::Double(i as f64))),
                    other => Err(Error::ValueKind {
                        expected: "int".to_string(),
                        found: other.kind_name().to_string(),
                    }),
                }),
        );
        registry.register(TypeEntry::builtin("map", TypeKind::Map));
        registry
    }

    /// Register an entry, replacing any previous entry with the same name.
    pub fn register(&mut self, entry: TypeEntry) {
        self.entries.insert(entry.name().to_string(), entry);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve a `~type` name to the target type it denotes.
    pub fn resolve(&self, name: &str) -> Result<TargetType> {
        self.entries
            .get(name)
            .map(|entry| TargetType::of(entry.kind.clone()))
            .ok_or_else(|| Error::UnknownType {
                name: name.to_string(),
            })
    }

    /// Entry backing a target kind, for constructor matching.
    pub(crate) fn entry(&self, kind: &TypeKind) -> Result<&TypeEntry> {
        let name = match kind {
            TypeKind::String => "string",
            TypeKind::Integer => "int",
            TypeKind::Boolean => "bool",
            TypeKind::Double => "double",
            TypeKind::Map => "map",
            TypeKind::Named(name) => name.as_str(),
            TypeKind::Enum(spec) => {
                return Err(Error::ValueKind {
                    expected: "constructible type".to_string(),
                    found: spec.type_name.to_string(),
                });
            }
        };
        self.entries.get(name).ok_or_else(|| Error::UnknownType {
            name: name.to_string(),
        })
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn identity(mut args: Vec<Value>) -> Result<Constructed> {
    Ok(Constructed::Value(args.remove(0)))
}
