//! Construction engine for config-wire
//!
//! `wire-core` interprets configuration trees into live runtime values:
//!
//! - **Construction**: the `~constructor` argument route, the bean route
//!   with slot wiring, map materialization, and dynamic `~type` dispatch
//!   through an explicit type registry
//! - **References**: `~ref` keys resolved through the per-session
//!   memoized `var` namespace or pluggable namespace handlers
//! - **Wiring**: field injection and the post-build lifecycle through the
//!   [`Wired`] capability trait
//!
//! All mutable state is session-scoped: a [`Configurator`] owns its root
//! tree, reference cache, handler registry and type registry, so two
//! sessions never interfere.
//!
//! # Example
//!
//! ```
//! use wire_core::{Configurator, TargetType, TypeRegistry};
//! use wire_tree::Node;
//!
//! let root = Node::from_json_str(r#"{"greeting": "hello"}"#).unwrap();
//! let mut session = Configurator::with_root(root.clone(), TypeRegistry::new());
//! let value = session
//!     .get_object(&root, "greeting", Some(&TargetType::string()))
//!     .unwrap();
//! assert_eq!(value.as_str(), Some("hello"));
//! ```

pub mod configurator;
pub mod error;
pub mod handler;
pub mod registry;
pub mod target;
pub mod value;
pub mod wired;

pub use configurator::{CONSTRUCTOR_KEY, Configurator, REF_KEY, TYPE_KEY, VAR_NAMESPACE};
pub use error::{BoxError, Error, Result};
pub use handler::ReferenceHandler;
pub use registry::{Constructed, Constructor, TypeEntry, TypeRegistry};
pub use target::{EnumSpec, TargetType, TypeKind};
pub use value::{MapKey, ObjectRef, Value, ValueMap};
pub use wired::{Slot, Wired};
