//! Bean fixtures shared across the workspace test suites
//!
//! Each fixture implements [`Wired`] by hand the way a generated
//! capability impl would look, and [`test_registry`] registers them all.

use std::any::Any;
use std::rc::Rc;

use wire_core::{
    BoxError, Constructed, EnumSpec, Error, ObjectRef, Result, Slot, TargetType, TypeEntry,
    TypeKind, TypeRegistry, Value, ValueMap, Wired,
};

fn unknown_slot(type_name: &str, slot: &str) -> Error {
    Error::Assign {
        type_name: type_name.to_string(),
        slot: slot.to_string(),
        detail: "no such slot".to_string(),
    }
}

fn require<T>(value: Option<T>, type_name: &str, slot: &str) -> Result<T> {
    value.ok_or_else(|| Error::Assign {
        type_name: type_name.to_string(),
        slot: slot.to_string(),
        detail: "null value for primitive slot".to_string(),
    })
}

/// Bean with a single optional string slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleBean {
    pub value: Option<String>,
}

impl SimpleBean {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl Wired for SimpleBean {
    fn type_name(&self) -> &'static str {
        "test.SimpleBean"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![Slot::new("value", TargetType::string())]
    }

    fn assign(&mut self, slot: &str, value: Value) -> Result<()> {
        match slot {
            "value" => {
                self.value = value.try_into_string()?;
                Ok(())
            }
            other => Err(unknown_slot(self.type_name(), other)),
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Bean mixing boxed and primitive scalar slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestBean {
    pub obj_boolean: Option<bool>,
    pub prim_boolean: bool,
    pub prim_integer: i64,
    pub prim_double: f64,
}

impl Wired for TestBean {
    fn type_name(&self) -> &'static str {
        "test.TestBean"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![
            Slot::new("obj_boolean", TargetType::boolean()),
            Slot::new("prim_boolean", TargetType::primitive(TypeKind::Boolean)),
            Slot::new("prim_integer", TargetType::primitive(TypeKind::Integer)),
            Slot::new("prim_double", TargetType::primitive(TypeKind::Double)),
        ]
    }

    fn assign(&mut self, slot: &str, value: Value) -> Result<()> {
        match slot {
            "obj_boolean" => self.obj_boolean = value.try_into_bool()?,
            "prim_boolean" => {
                self.prim_boolean = require(value.try_into_bool()?, self.type_name(), slot)?;
            }
            "prim_integer" => {
                self.prim_integer = require(value.try_into_int()?, self.type_name(), slot)?;
            }
            "prim_double" => {
                self.prim_double = require(value.try_into_double()?, self.type_name(), slot)?;
            }
            other => return Err(unknown_slot(self.type_name(), other)),
        }
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Bean holding a materialized map.
#[derive(Debug, Clone, Default)]
pub struct BeanWithMap {
    pub map: Option<Rc<ValueMap>>,
}

impl Wired for BeanWithMap {
    fn type_name(&self) -> &'static str {
        "test.BeanWithMap"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![Slot::new("map", TargetType::map())]
    }

    fn assign(&mut self, slot: &str, value: Value) -> Result<()> {
        match slot {
            "map" => {
                self.map = value.try_into_map()?;
                Ok(())
            }
            other => Err(unknown_slot(self.type_name(), other)),
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Enum fixture resolved by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Foo,
    Bar,
}

impl Flavor {
    pub const SPEC: EnumSpec = EnumSpec {
        type_name: "test.Flavor",
        from_name: Flavor::from_name,
    };

    fn from_name(name: &str) -> Option<Rc<dyn Any>> {
        let flavor = match name {
            "foo" => Flavor::Foo,
            "bar" => Flavor::Bar,
            _ => return None,
        };
        Some(Rc::new(flavor))
    }
}

/// Bean with an enum slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumBean {
    pub value: Option<Flavor>,
}

impl Wired for EnumBean {
    fn type_name(&self) -> &'static str {
        "test.EnumBean"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![Slot::new("value", TargetType::of(TypeKind::Enum(Flavor::SPEC)))]
    }

    fn assign(&mut self, slot: &str, value: Value) -> Result<()> {
        match slot {
            "value" => {
                self.value = match value.try_into_object()? {
                    Some(obj) => Some(require(
                        obj.downcast_ref::<Flavor>().copied(),
                        self.type_name(),
                        slot,
                    )?),
                    None => None,
                };
                Ok(())
            }
            other => Err(unknown_slot(self.type_name(), other)),
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Leaf bean with no slots of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildBean {}

impl Wired for ChildBean {
    fn type_name(&self) -> &'static str {
        "test.ChildBean"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![]
    }

    fn assign(&mut self, slot: &str, _value: Value) -> Result<()> {
        Err(unknown_slot(self.type_name(), slot))
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Bean whose slot is another constructed bean.
#[derive(Debug, Clone, Default)]
pub struct ParentBean {
    pub obj: Option<ObjectRef>,
}

impl Wired for ParentBean {
    fn type_name(&self) -> &'static str {
        "test.ParentBean"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![Slot::new("obj", TargetType::named("test.ChildBean"))]
    }

    fn assign(&mut self, slot: &str, value: Value) -> Result<()> {
        match slot {
            "obj" => {
                self.obj = value.try_into_object()?;
                Ok(())
            }
            other => Err(unknown_slot(self.type_name(), other)),
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Client-shaped fixture exercising defaults, wiring and the post-build
/// hook together.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeClient {
    pub secret_key: Option<String>,
    pub access_key: Option<String>,
    pub api_version: String,
    pub url: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_port: i64,
    pub initialized: bool,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            secret_key: None,
            access_key: None,
            api_version: "v1".to_string(),
            url: None,
            proxy_host: None,
            proxy_port: 8080,
            initialized: false,
        }
    }
}

impl Wired for FakeClient {
    fn type_name(&self) -> &'static str {
        "test.FakeClient"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![
            Slot::new("secret_key", TargetType::string()),
            Slot::new("access_key", TargetType::string()),
            Slot::new("api_version", TargetType::string()),
            Slot::new("url", TargetType::string()),
            Slot::new("proxy_host", TargetType::string()),
            Slot::new("proxy_port", TargetType::primitive(TypeKind::Integer)),
        ]
    }

    fn assign(&mut self, slot: &str, value: Value) -> Result<()> {
        match slot {
            "secret_key" => self.secret_key = value.try_into_string()?,
            "access_key" => self.access_key = value.try_into_string()?,
            "api_version" => {
                if let Some(version) = value.try_into_string()? {
                    self.api_version = version;
                }
            }
            "url" => self.url = value.try_into_string()?,
            "proxy_host" => self.proxy_host = value.try_into_string()?,
            "proxy_port" => {
                self.proxy_port = require(value.try_into_int()?, self.type_name(), slot)?;
            }
            other => return Err(unknown_slot(self.type_name(), other)),
        }
        Ok(())
    }

    fn post_build(&mut self) -> std::result::Result<(), BoxError> {
        self.initialized = true;
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Bean whose hook always fails, for lifecycle error propagation tests.
#[derive(Debug, Clone, Default)]
pub struct FailingHookBean;

impl Wired for FailingHookBean {
    fn type_name(&self) -> &'static str {
        "test.FailingHookBean"
    }

    fn slots(&self) -> Vec<Slot> {
        vec![]
    }

    fn assign(&mut self, slot: &str, _value: Value) -> Result<()> {
        Err(unknown_slot(self.type_name(), slot))
    }

    fn post_build(&mut self) -> std::result::Result<(), BoxError> {
        Err("intentional hook failure".into())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Registry with every fixture bean registered.
pub fn test_registry() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types.register(
        TypeEntry::bean::<SimpleBean>("test.SimpleBean").with_constructor(
            vec![TypeKind::String],
            |mut args| {
                let value = args.remove(0).try_into_string()?;
                Ok(Constructed::Bean(Box::new(SimpleBean { value })))
            },
        ),
    );
    types.register(TypeEntry::bean::<TestBean>("test.TestBean"));
    types.register(TypeEntry::bean::<BeanWithMap>("test.BeanWithMap"));
    types.register(TypeEntry::bean::<EnumBean>("test.EnumBean"));
    types.register(TypeEntry::bean::<ChildBean>("test.ChildBean"));
    types.register(TypeEntry::bean::<ParentBean>("test.ParentBean"));
    types.register(TypeEntry::bean::<FakeClient>("test.FakeClient"));
    types.register(TypeEntry::bean::<FailingHookBean>("test.FailingHookBean"));
    types
}
