//! Configuration tree for config-wire
//!
//! This crate provides the tree the construction engine consumes:
//!
//! - **Node model**: ordered objects, lists, and scalar leaves with the
//!   integral/decimal distinction preserved
//! - **Access**: dotted-path lookup, typed leaf accessors, entry iteration
//!   in source order
//! - **Loading**: JSON and TOML parsing via serde, file loading by
//!   extension
//! - **Layering**: environment sections merged over shared defaults
//!
//! Trees are immutable once built; the engine never mutates them.
//!
//! # Example
//!
//! ```
//! use wire_tree::Node;
//!
//! let tree = Node::from_json_str(r#"{"server": {"port": 8080}}"#).unwrap();
//! assert_eq!(tree.get_int("server.port").unwrap(), 8080);
//! ```

pub mod error;
pub mod layers;
pub mod node;

mod de;

pub use error::{Error, Result};
pub use node::{Entries, Node, Number};
