//! Shared test helpers for body interpreter tests

use std::collections::HashMap;
use std::path::Path;

use serde_json::{json, Value};

use crate::error::{Result, TrellisError};
use crate::template::body::helpers::{display_value, resolve_key};
use crate::template::body::{BodyInterpreter, Scope};

/// Scope over a JSON object that records every call it receives
pub(super) struct MapScope {
    pub data: Value,
    pub calls: Vec<(String, Vec<Value>)>,
    pub sections: HashMap<String, String>,
}

impl MapScope {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            calls: Vec::new(),
            sections: HashMap::new(),
        }
    }
}

impl Scope for MapScope {
    fn lookup(&self, key: &str) -> Option<Value> {
        resolve_key(&self.data, key).cloned()
    }

    fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        self.calls.push((name.to_string(), args.clone()));
        match name {
            "upper" => Ok(Value::String(
                display_value(args.first().unwrap_or(&Value::Null)).to_uppercase(),
            )),
            "list" => Ok(Value::Array(args)),
            "nothing" => Ok(Value::Null),
            "fail" => Err(TrellisError::helper(name, "boom")),
            "slow" => {
                std::thread::sleep(std::time::Duration::from_millis(30));
                Ok(Value::String("slow!".to_string()))
            }
            other => Ok(Value::String(format!("{}!", other))),
        }
    }

    fn declare_section(&mut self, key: &str, content: String) -> Result<String> {
        Ok(self
            .sections
            .entry(key.to_string())
            .or_insert(content)
            .clone())
    }
}

/// Scalar data used across most tests
pub(super) fn simple_data() -> Value {
    json!({
        "title": "My Title",
        "count": 42,
        "price": 9.99,
        "enabled": true,
        "missing": null,
    })
}

/// Nested data with arrays of objects
pub(super) fn nested_data() -> Value {
    json!({
        "paper": {
            "title": "Research Paper",
            "authors": [
                {"name": "John Doe", "tags": ["a", "b"]},
                {"name": "Jane Smith", "tags": []},
            ],
        },
    })
}

/// Run a body against a fresh scope over `data`
pub(super) fn run(body: &str, data: Value) -> Result<String> {
    let mut scope = MapScope::new(data);
    BodyInterpreter::new(Path::new("test.tpl")).execute(body, &mut scope)
}
