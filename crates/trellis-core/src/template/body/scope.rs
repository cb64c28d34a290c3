//! Name-binding environment a body executes against

use serde_json::Value;

use super::helpers::{resolve_key, split_head};
use crate::error::Result;

/// Everything a body can reach while it runs: bound names, callable
/// operations and the section sink.
pub trait Scope {
    /// Value bound to a dotted name, if any
    fn lookup(&self, key: &str) -> Option<Value>;

    /// Call an operation or helper by name with evaluated arguments
    fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Value>;

    /// Hand a rendered section block over; returns the text to emit in place
    fn declare_section(&mut self, key: &str, content: String) -> Result<String>;
}

/// Scope of an `{{each}}` body: the loop variable shadows outer names
pub(crate) struct LoopScope<'s> {
    parent: &'s mut dyn Scope,
    var: &'s str,
    item: Value,
}

impl<'s> LoopScope<'s> {
    pub fn new(parent: &'s mut dyn Scope, var: &'s str, item: Value) -> Self {
        Self { parent, var, item }
    }
}

impl Scope for LoopScope<'_> {
    fn lookup(&self, key: &str) -> Option<Value> {
        match split_head(key) {
            (head, None) if head == self.var => Some(self.item.clone()),
            (head, Some(rest)) if head == self.var => resolve_key(&self.item, rest).cloned(),
            _ => self.parent.lookup(key),
        }
    }

    fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        self.parent.invoke(name, args)
    }

    fn declare_section(&mut self, key: &str, content: String) -> Result<String> {
        self.parent.declare_section(key, content)
    }
}
