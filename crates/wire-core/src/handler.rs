//! Reference handlers and key parsing
//!
//! A reference key is a dotted path whose first segment names the
//! namespace; `var` is served by the session cache, anything else
//! dispatches to a handler registered for that namespace.

use wire_tree::Node;

use crate::error::{Error, Result};
use crate::target::TargetType;
use crate::value::Value;

/// Pluggable resolver for one reference namespace.
pub trait ReferenceHandler {
    /// Dereference a key.
    ///
    /// * `original_key` — the full reference key as written
    /// * `remainder` — the key with the namespace segment removed
    /// * `scope` — the object node the `~ref` marker appeared in
    /// * `target` — declared type at the requesting site, when known
    ///
    /// May return [`Value::Null`] only when `target` is not a
    /// strict-non-null primitive.
    fn resolve(
        &mut self,
        original_key: &str,
        remainder: &str,
        scope: &Node,
        target: Option<&TargetType>,
    ) -> Result<Value>;

    /// Release handler-owned caches; called once per session teardown.
    fn clean(&mut self);
}

/// Split a reference key into (namespace, remainder).
pub(crate) fn split_reference(key: &str) -> Result<(&str, &str)> {
    match key.split_once('.') {
        Some((namespace, remainder)) if !namespace.is_empty() && !remainder.is_empty() => {
            Ok((namespace, remainder))
        }
        _ => Err(Error::ReferenceSyntax {
            key: key.to_string(),
        }),
    }
}
