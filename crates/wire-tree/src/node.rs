//! Configuration tree model
//!
//! A [`Node`] is one immutable value in a hierarchical configuration tree:
//! an object (ordered key → node mapping), a list, or a scalar leaf. The
//! construction engine reads trees through dotted-path lookup and typed
//! leaf accessors and never mutates them.

use indexmap::IndexMap;

use crate::{Error, Result};

/// Ordered object entries, preserving source order.
pub type Entries = IndexMap<String, Node>;

/// A numeric leaf, keeping the integral/decimal lexical distinction of the
/// source document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// One value in a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered mapping of key to child node
    Object(Entries),
    /// Ordered sequence of nodes
    List(Vec<Node>),
    Str(String),
    Num(Number),
    Bool(bool),
}

impl Node {
    /// Empty object node.
    pub fn empty() -> Self {
        Node::Object(Entries::new())
    }

    /// Short lowercase name of this node's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::List(_) => "list",
            Node::Str(_) => "string",
            Node::Num(Number::Int(_)) => "int",
            Node::Num(Number::Float(_)) => "double",
            Node::Bool(_) => "bool",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// True for an object node with no entries.
    pub fn is_empty_object(&self) -> bool {
        matches!(self, Node::Object(entries) if entries.is_empty())
    }

    /// Object entries, or `None` for non-object nodes.
    pub fn as_object(&self) -> Option<&Entries> {
        match self {
            Node::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// (key, node) pairs in source order; empty for non-object nodes.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.as_object()
            .into_iter()
            .flatten()
            .map(|(key, node)| (key.as_str(), node))
    }

    /// Walk a dotted path (`a.b.c`) through nested objects.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether a dotted path resolves to any node.
    pub fn has_path(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    fn fetch(&self, path: &str) -> Result<&Node> {
        self.lookup(path).ok_or_else(|| Error::Missing {
            path: path.to_string(),
        })
    }

    /// String at `path`. Scalar leaves render leniently: numbers and
    /// booleans convert to their canonical textual form.
    pub fn get_str(&self, path: &str) -> Result<String> {
        match self.fetch(path)? {
            Node::Str(s) => Ok(s.clone()),
            Node::Num(Number::Int(i)) => Ok(i.to_string()),
            Node::Num(Number::Float(f)) => Ok(f.to_string()),
            Node::Bool(b) => Ok(b.to_string()),
            other => Err(wrong_kind(path, "string", other)),
        }
    }

    /// Integer at `path`. Integral floats and numeric strings convert.
    pub fn get_int(&self, path: &str) -> Result<i64> {
        match self.fetch(path)? {
            Node::Num(Number::Int(i)) => Ok(*i),
            Node::Num(Number::Float(f)) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
            Node::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| wrong_kind(path, "int", &Node::Str(s.clone()))),
            other => Err(wrong_kind(path, "int", other)),
        }
    }

    /// Boolean at `path`. The strings `"true"` and `"false"` convert.
    pub fn get_bool(&self, path: &str) -> Result<bool> {
        match self.fetch(path)? {
            Node::Bool(b) => Ok(*b),
            Node::Str(s) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(wrong_kind(path, "bool", &Node::Str(s.clone()))),
            },
            other => Err(wrong_kind(path, "bool", other)),
        }
    }

    /// Double at `path`. Integers widen and numeric strings convert.
    pub fn get_double(&self, path: &str) -> Result<f64> {
        match self.fetch(path)? {
            Node::Num(Number::Float(f)) => Ok(*f),
            Node::Num(Number::Int(i)) => Ok(*i as f64),
            Node::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| wrong_kind(path, "double", &Node::Str(s.clone()))),
            other => Err(wrong_kind(path, "double", other)),
        }
    }

    /// Object sub-tree at `path`.
    pub fn get_object_node(&self, path: &str) -> Result<&Node> {
        let node = self.fetch(path)?;
        if node.is_object() {
            Ok(node)
        } else {
            Err(wrong_kind(path, "object", node))
        }
    }

    /// List at `path`.
    pub fn get_list(&self, path: &str) -> Result<&[Node]> {
        let node = self.fetch(path)?;
        node.as_list().ok_or_else(|| wrong_kind(path, "list", node))
    }

    /// Deep merge: `overlay` wins on conflicts; when both sides are
    /// objects the entries merge key-wise.
    pub fn merged(&self, overlay: &Node) -> Node {
        match (self, overlay) {
            (Node::Object(base), Node::Object(over)) => {
                let mut merged = base.clone();
                for (key, over_node) in over {
                    let node = match merged.get(key) {
                        Some(existing) => existing.merged(over_node),
                        None => over_node.clone(),
                    };
                    merged.insert(key.clone(), node);
                }
                Node::Object(merged)
            }
            _ => overlay.clone(),
        }
    }
}

fn wrong_kind(path: &str, expected: &'static str, node: &Node) -> Error {
    Error::WrongKind {
        path: path.to_string(),
        expected,
        found: node.kind_name(),
    }
}
