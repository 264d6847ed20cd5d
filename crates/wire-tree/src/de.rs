//! Serde integration and file loading
//!
//! [`Node`] deserializes from any self-describing format; JSON and TOML
//! are wired up directly. Null is rejected at parse time — the tree has
//! no null kind, so the engine never has to handle one.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::{self, MapAccess, SeqAccess, Visitor};

use crate::{Entries, Error, Node, Number, Result};

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value (object, list, string, number or boolean)")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Node, E> {
        Ok(Node::Num(Number::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Node, E> {
        i64::try_from(v)
            .map(|i| Node::Num(Number::Int(i)))
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Node, E> {
        Ok(Node::Num(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Node, E> {
        Ok(Node::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Node, E> {
        Ok(Node::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Node, E> {
        Err(E::custom("null configuration values are not supported"))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Node, E> {
        Err(E::custom("null configuration values are not supported"))
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Entries::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, node)) = map.next_entry::<String, Node>()? {
            entries.insert(key, node);
        }
        Ok(Node::Object(entries))
    }
}

impl Node {
    /// Parse a tree from JSON text.
    pub fn from_json_str(text: &str) -> Result<Node> {
        Ok(serde_json::from_str(text)?)
    }

    /// Convert an in-memory JSON value, as produced by `serde_json::json!`.
    pub fn from_json(value: serde_json::Value) -> Result<Node> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a tree from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Node> {
        Ok(toml::from_str(text)?)
    }

    /// Load a tree from a `.json` or `.toml` file, dispatching on
    /// extension.
    pub fn load(path: &Path) -> Result<Node> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
