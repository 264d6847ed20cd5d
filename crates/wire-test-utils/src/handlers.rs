//! Reference-handler doubles

use std::cell::RefCell;
use std::rc::Rc;

use wire_core::{ReferenceHandler, Result, TargetType, Value};
use wire_tree::Node;

/// Arguments captured from one `resolve` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveCall {
    pub original_key: String,
    pub remainder: String,
    /// Display form of the target kind, when one was passed.
    pub target: Option<String>,
}

/// Handler double that records every call and replies with a fixed value.
///
/// The call log and clean counter stay readable through the shared
/// handles after the handler itself moves into a session.
pub struct RecordingHandler {
    reply: Value,
    calls: Rc<RefCell<Vec<ResolveCall>>>,
    cleaned: Rc<RefCell<usize>>,
}

impl RecordingHandler {
    pub fn replying(reply: Value) -> Self {
        Self {
            reply,
            calls: Rc::new(RefCell::new(Vec::new())),
            cleaned: Rc::new(RefCell::new(0)),
        }
    }

    /// Shared view of the recorded calls.
    pub fn calls(&self) -> Rc<RefCell<Vec<ResolveCall>>> {
        Rc::clone(&self.calls)
    }

    /// Shared view of how many times `clean` ran.
    pub fn clean_count(&self) -> Rc<RefCell<usize>> {
        Rc::clone(&self.cleaned)
    }
}

impl ReferenceHandler for RecordingHandler {
    fn resolve(
        &mut self,
        original_key: &str,
        remainder: &str,
        _scope: &Node,
        target: Option<&TargetType>,
    ) -> Result<Value> {
        self.calls.borrow_mut().push(ResolveCall {
            original_key: original_key.to_string(),
            remainder: remainder.to_string(),
            target: target.map(|t| t.kind.to_string()),
        });
        Ok(self.reply.clone())
    }

    fn clean(&mut self) {
        *self.cleaned.borrow_mut() += 1;
    }
}
