//! Wiring capability for bean-route types
//!
//! Bean-constructible types expose their injectable members through
//! [`Wired`] instead of ambient reflection: slot descriptors, an
//! assignment entry point that bypasses normal field privacy, and a
//! single optional post-build hook.

use std::any::Any;

use crate::error::{BoxError, Result};
use crate::target::TargetType;
use crate::value::Value;

/// One injectable member: its config name and declared type.
#[derive(Debug, Clone)]
pub struct Slot {
    pub name: &'static str,
    pub ty: TargetType,
}

impl Slot {
    pub fn new(name: &'static str, ty: TargetType) -> Self {
        Self { name, ty }
    }
}

/// Capability interface for bean-route construction.
///
/// Implementations list every injectable member of the concrete type; a
/// type that embeds another type's members re-lists them, so wiring
/// always sees the whole flattened set.
pub trait Wired: Any {
    /// Registered type name, also used when this instance becomes a
    /// constructor argument.
    fn type_name(&self) -> &'static str;

    /// Injectable members in declaration order.
    fn slots(&self) -> Vec<Slot>;

    /// Assign a resolved value into a slot.
    fn assign(&mut self, slot: &str, value: Value) -> Result<()>;

    /// Post-build hook, invoked exactly once after injection.
    fn post_build(&mut self) -> std::result::Result<(), BoxError> {
        Ok(())
    }

    /// Seal the instance for sharing once wiring is complete.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}
