//! The construction engine
//!
//! A [`Configurator`] session interprets configuration nodes into runtime
//! values: constructor-argument construction, bean construction with slot
//! wiring, map materialization, and symbolic references memoized per
//! session. All mutable state is owned by the session value, so two
//! sessions never interfere; a session is single-threaded by design.

use std::collections::HashMap;
use std::rc::Rc;

use wire_tree::{Entries, Node, Number};

use crate::error::{Error, Result};
use crate::handler::{ReferenceHandler, split_reference};
use crate::registry::{Constructed, TypeEntry, TypeRegistry};
use crate::target::{TargetType, TypeKind};
use crate::value::{MapKey, ObjectRef, Value, ValueMap};
use crate::wired::Wired;

/// Marker key selecting the reference route.
pub const REF_KEY: &str = "~ref";
/// Marker key holding positional constructor arguments.
pub const CONSTRUCTOR_KEY: &str = "~constructor";
/// Marker key naming the runtime type, overriding the caller's.
pub const TYPE_KEY: &str = "~type";

/// Namespace served by the session reference cache.
pub const VAR_NAMESPACE: &str = "var";

/// One construction session: root tree, reference cache, handler registry
/// and type registry.
///
/// The reference cache is not safe for concurrent use; concurrent
/// sessions must each own an independent `Configurator`.
pub struct Configurator {
    root: Rc<Node>,
    types: TypeRegistry,
    references: HashMap<String, Value>,
    handlers: HashMap<String, Box<dyn ReferenceHandler>>,
}

impl Configurator {
    /// Session with an empty root tree.
    pub fn new(types: TypeRegistry) -> Self {
        Self::with_root(Node::empty(), types)
    }

    /// Session over a root configuration tree.
    pub fn with_root(root: Node, types: TypeRegistry) -> Self {
        Self {
            root: Rc::new(root),
            types,
            references: HashMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// The session root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Register a handler for a reference namespace. Handlers may be
    /// added at any time before the first resolution that needs them.
    pub fn add_handler(
        &mut self,
        namespace: impl Into<String>,
        handler: impl ReferenceHandler + 'static,
    ) {
        self.handlers.insert(namespace.into(), Box::new(handler));
    }

    /// Register a type entry in the session registry.
    pub fn register_type(&mut self, entry: TypeEntry) {
        self.types.register(entry);
    }

    /// Ask every registered handler to release its caches.
    pub fn clean(&mut self) {
        for handler in self.handlers.values_mut() {
            handler.clean();
        }
    }

    /// Construct from the session root node.
    pub fn construct_root(&mut self, target: Option<&TargetType>) -> Result<Value> {
        let root = Rc::clone(&self.root);
        self.construct(&root, target)
    }

    /// Construct a value from an object node.
    ///
    /// A `~ref` marker short-circuits to reference resolution. A
    /// `~constructor` marker selects the constructor route with its
    /// elements as positional arguments. A `~type` marker always wins
    /// over `target`; with neither, the node cannot be constructed.
    /// Constructor-route instances never receive slot wiring — their
    /// state is fixed by the arguments — while bean-route instances
    /// always do.
    pub fn construct(&mut self, node: &Node, target: Option<&TargetType>) -> Result<Value> {
        let Some(entries) = node.as_object() else {
            return Err(Error::ValueKind {
                expected: "object".to_string(),
                found: node.kind_name().to_string(),
            });
        };

        if entries.contains_key(REF_KEY) {
            return self.resolve_reference(node, entries, target);
        }

        let (arg_nodes, constructor_route): (&[Node], bool) = match entries.get(CONSTRUCTOR_KEY) {
            Some(Node::List(items)) => (items.as_slice(), true),
            Some(other) => {
                return Err(Error::ValueKind {
                    expected: "list".to_string(),
                    found: other.kind_name().to_string(),
                });
            }
            None => (&[], false),
        };

        let effective = self.effective_type(entries, target)?;

        let mut args = Vec::with_capacity(arg_nodes.len());
        let mut arg_kinds = Vec::with_capacity(arg_nodes.len());
        for (index, arg_node) in arg_nodes.iter().enumerate() {
            let value = self.infer(arg_node).map_err(|e| Error::ConstructorArg {
                index,
                source: Box::new(e),
            })?;
            // infer never yields null, so the kind is always present
            let Some(kind) = value.type_kind() else {
                return Err(Error::ConstructorArg {
                    index,
                    source: Box::new(Error::ValueKind {
                        expected: "value".to_string(),
                        found: "null".to_string(),
                    }),
                });
            };
            arg_kinds.push(kind);
            args.push(value);
        }

        if !constructor_route && effective.kind == TypeKind::Map {
            return self.map_from_entries(entries);
        }

        tracing::trace!(
            kind = %effective.kind,
            route = if constructor_route { "constructor" } else { "bean" },
            "constructing"
        );
        let constructed = {
            let entry = self.types.entry(&effective.kind)?;
            let Some(constructor) = entry.find(&arg_kinds) else {
                return Err(Error::NoMatchingConstructor {
                    args: arg_kinds
                        .iter()
                        .map(|kind| kind.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                    target: effective.kind.to_string(),
                });
            };
            constructor.construct(args)?
        };

        match constructed {
            Constructed::Value(value) => Ok(value),
            Constructed::Bean(mut bean) => {
                if !constructor_route {
                    self.wire_dyn(node, bean.as_mut())?;
                }
                Ok(seal(bean))
            }
        }
    }

    /// Coerce a node whose type is not otherwise constrained.
    ///
    /// Objects recurse into [`construct`](Self::construct) with no caller
    /// type, so the route is driven entirely by in-node markers; scalars
    /// unwrap as-is. A list has no meaning here.
    pub fn infer(&mut self, node: &Node) -> Result<Value> {
        match node {
            Node::Object(_) => self.construct(node, None),
            Node::Str(s) => Ok(Value::Str(s.clone())),
            Node::Num(Number::Int(i)) => Ok(Value::Int(*i)),
            Node::Num(Number::Float(f)) => Ok(Value::Double(*f)),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::List(_) => Err(Error::ValueKind {
                expected: "object or scalar".to_string(),
                found: "list".to_string(),
            }),
        }
    }

    /// Fetch and coerce the value at `path` in `scope`.
    ///
    /// An absent path yields [`Value::Null`] unless the target is a
    /// strict-non-null primitive. Object nodes construct, list nodes
    /// materialize a map when the target is the map kind, and scalar
    /// leaves coerce to the target's kind.
    pub fn get_object(
        &mut self,
        scope: &Node,
        path: &str,
        target: Option<&TargetType>,
    ) -> Result<Value> {
        let Some(node) = scope.lookup(path) else {
            if target.is_some_and(TargetType::is_primitive) {
                return Err(Error::MissingPath {
                    path: path.to_string(),
                });
            }
            return Ok(Value::Null);
        };

        let Some(target) = target else {
            return self.infer(node);
        };

        match node {
            Node::Object(_) => self.construct(node, Some(target)),
            Node::List(items) => self.construct_from_list(items, target),
            _ => coerce_leaf(scope, path, target),
        }
    }

    /// Materialize a list into the requested collection type.
    ///
    /// Only the map kind is supported: the list must hold alternating key
    /// and value entries. This is the one route that admits non-string
    /// map keys. An odd-length list fails before any entry is consumed;
    /// duplicate keys overwrite earlier values in iteration order.
    pub fn construct_from_list(&mut self, items: &[Node], target: &TargetType) -> Result<Value> {
        if target.kind != TypeKind::Map {
            return Err(Error::ValueKind {
                expected: target.kind.to_string(),
                found: "list".to_string(),
            });
        }
        if items.len() % 2 != 0 {
            return Err(Error::OddPairList { len: items.len() });
        }
        let mut map = ValueMap::new();
        for (pair_index, pair) in items.chunks_exact(2).enumerate() {
            let key = self.infer(&pair[0]).map_err(|e| Error::PairListElement {
                index: pair_index * 2,
                source: Box::new(e),
            })?;
            let value = self.infer(&pair[1]).map_err(|e| Error::PairListElement {
                index: pair_index * 2 + 1,
                source: Box::new(e),
            })?;
            map.insert(MapKey::try_from_value(key)?, value);
        }
        Ok(Value::Map(Rc::new(map)))
    }

    /// Wire a bean from a scope and return it for chaining.
    pub fn wire<W: Wired>(&mut self, scope: &Node, mut instance: W) -> Result<W> {
        self.wire_dyn(scope, &mut instance)?;
        Ok(instance)
    }

    /// Wire a bean from the session root.
    pub fn wire_root<W: Wired>(&mut self, mut instance: W) -> Result<W> {
        let root = Rc::clone(&self.root);
        self.wire_dyn(&root, &mut instance)?;
        Ok(instance)
    }

    /// Wire a type-erased bean in place.
    ///
    /// Slots whose names are absent from the scope keep their defaults;
    /// a structurally empty scope skips injection entirely. The
    /// post-build hook runs in every case, exactly once. The first slot
    /// that fails to resolve aborts wiring.
    pub fn wire_dyn(&mut self, scope: &Node, instance: &mut dyn Wired) -> Result<()> {
        if !scope.is_object() {
            return Err(Error::ValueKind {
                expected: "object".to_string(),
                found: scope.kind_name().to_string(),
            });
        }
        if scope.is_empty_object() {
            tracing::warn!(
                type_name = instance.type_name(),
                "scope passed to wire was empty"
            );
        } else {
            for slot in instance.slots() {
                if !scope.has_path(slot.name) {
                    continue;
                }
                let value = self.get_object(scope, slot.name, Some(&slot.ty))?;
                tracing::trace!(slot = slot.name, value = ?value, "wiring slot");
                instance.assign(slot.name, value)?;
            }
        }
        instance.post_build().map_err(|e| Error::LifecycleHook {
            type_name: instance.type_name().to_string(),
            source: e,
        })
    }

    /// Resolve a `~ref` node.
    ///
    /// `var` references memoize in the session cache, so the same key
    /// yields the same value identity for the session's lifetime. Any
    /// other namespace dispatches to its registered handler; handler
    /// namespaces are not cached here.
    fn resolve_reference(
        &mut self,
        node: &Node,
        entries: &Entries,
        target: Option<&TargetType>,
    ) -> Result<Value> {
        let key = node.get_str(REF_KEY)?;
        let (namespace, remainder) = split_reference(&key)?;

        let effective = if entries.contains_key(TYPE_KEY) {
            Some(self.type_from_marker(entries)?)
        } else {
            target.cloned()
        };

        if namespace == VAR_NAMESPACE {
            if let Some(cached) = self.references.get(&key) {
                tracing::trace!(key = %key, "reference cache hit");
                return Ok(cached.clone());
            }
            let root = Rc::clone(&self.root);
            let value = self.get_object(&root, &key, effective.as_ref())?;
            self.references.insert(key, value.clone());
            Ok(value)
        } else {
            let namespace = namespace.to_string();
            let handler = self
                .handlers
                .get_mut(&namespace)
                .ok_or_else(|| Error::UnknownNamespace {
                    namespace: namespace.clone(),
                })?;
            let value = handler.resolve(&key, remainder, node, effective.as_ref())?;
            if let Some(effective) = effective {
                if effective.is_primitive() && value.is_null() {
                    return Err(Error::NullPrimitive {
                        key,
                        namespace,
                        target: effective.kind.to_string(),
                    });
                }
            }
            Ok(value)
        }
    }

    /// Object-keyed map materialization; marker keys are not entries.
    fn map_from_entries(&mut self, entries: &Entries) -> Result<Value> {
        let mut map = ValueMap::new();
        for (key, node) in entries {
            if key.starts_with('~') {
                continue;
            }
            let value = self.infer(node).map_err(|e| Error::MapEntry {
                key: key.clone(),
                source: Box::new(e),
            })?;
            map.insert(MapKey::from(key.as_str()), value);
        }
        Ok(Value::Map(Rc::new(map)))
    }

    /// `~type` always wins; otherwise the caller's; with neither the
    /// node cannot be constructed.
    fn effective_type(&self, entries: &Entries, target: Option<&TargetType>) -> Result<TargetType> {
        if entries.contains_key(TYPE_KEY) {
            self.type_from_marker(entries)
        } else if let Some(target) = target {
            Ok(target.clone())
        } else {
            Err(Error::MissingPath {
                path: TYPE_KEY.to_string(),
            })
        }
    }

    fn type_from_marker(&self, entries: &Entries) -> Result<TargetType> {
        match entries.get(TYPE_KEY) {
            Some(Node::Str(name)) => self.types.resolve(name),
            Some(other) => Err(Error::ValueKind {
                expected: "string".to_string(),
                found: other.kind_name().to_string(),
            }),
            None => Err(Error::MissingPath {
                path: TYPE_KEY.to_string(),
            }),
        }
    }
}

/// Coerce a scalar leaf to the target kind: identity string,
/// enum-by-name, integer, boolean or double. Anything else cannot live
/// on a leaf.
fn coerce_leaf(scope: &Node, path: &str, target: &TargetType) -> Result<Value> {
    match &target.kind {
        TypeKind::String => Ok(Value::Str(scope.get_str(path)?)),
        TypeKind::Integer => Ok(Value::Int(scope.get_int(path)?)),
        TypeKind::Boolean => Ok(Value::Bool(scope.get_bool(path)?)),
        TypeKind::Double => Ok(Value::Double(scope.get_double(path)?)),
        TypeKind::Enum(spec) => {
            let name = scope.get_str(path)?;
            let variant = (spec.from_name)(&name).ok_or_else(|| Error::UnknownEnumVariant {
                name: name.clone(),
                target: spec.type_name.to_string(),
            })?;
            Ok(Value::Object(ObjectRef::from_parts(
                spec.type_name.to_string(),
                variant,
            )))
        }
        TypeKind::Map | TypeKind::Named(_) => Err(Error::ValueKind {
            expected: target.kind.to_string(),
            found: "scalar leaf".to_string(),
        }),
    }
}

fn seal(bean: Box<dyn Wired>) -> Value {
    let type_name = bean.type_name().to_string();
    Value::Object(ObjectRef::from_parts(type_name, Rc::from(bean.into_any())))
}
