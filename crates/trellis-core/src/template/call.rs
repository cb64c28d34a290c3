//! Built-in operations reachable from a body by name

use serde_json::Value;

use super::body::helpers::display_value;
use super::executor::{Context, Supply, Template};
use crate::error::{Result, TrellisError};

/// Operations a body can call by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Filter,
    Layout,
    LastBuffer,
    Supply,
    Insert,
    InsertIf,
    Get,
    Data,
}

impl Operation {
    /// Look up a body-level name. `lastBuffer`, `buffer` and `insertif` are
    /// accepted spellings as well.
    pub fn from_name(name: &str) -> Option<Self> {
        let operation = match name {
            "filter" => Operation::Filter,
            "layout" => Operation::Layout,
            "last_buffer" | "lastBuffer" | "buffer" => Operation::LastBuffer,
            "supply" => Operation::Supply,
            "insert" => Operation::Insert,
            "insert_if" | "insertif" => Operation::InsertIf,
            "get" => Operation::Get,
            "data" => Operation::Data,
            _ => return None,
        };
        Some(operation)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Filter => "filter",
            Operation::Layout => "layout",
            Operation::LastBuffer => "last_buffer",
            Operation::Supply => "supply",
            Operation::Insert => "insert",
            Operation::InsertIf => "insert_if",
            Operation::Get => "get",
            Operation::Data => "data",
        }
    }
}

impl Template<'_> {
    /// Run a built-in operation with arguments evaluated by a body
    pub(crate) fn apply(&mut self, operation: Operation, args: Vec<Value>) -> Result<Value> {
        let mut args = Arguments::new(operation, args);

        match operation {
            Operation::Filter => {
                let pipeline = args.string(0)?;
                let value = args.take(1);
                let stages = args.stage_args(2)?;
                self.filter(&pipeline, value, &stages)
            }
            Operation::Layout => {
                self.layout(&args.string(0)?)?;
                Ok(Value::Null)
            }
            Operation::LastBuffer => Ok(Value::String(self.last_buffer().to_string())),
            Operation::Supply => {
                let key = args.string(0)?;
                let default = match args.take(1) {
                    Value::Null => Supply::Empty,
                    other => Supply::Text(display_value(&other)),
                };
                Ok(Value::String(self.supply(&key, default)))
            }
            Operation::Insert => {
                let name = args.string(0)?;
                let context = args.context(1)?;
                self.insert(&name, &context).map(Value::String)
            }
            Operation::InsertIf => {
                let name = args.string(0)?;
                let context = args.context(1)?;
                self.insert_if(&name, &context).map(Value::String)
            }
            Operation::Get => {
                let key = args.string(0)?;
                let default = args.take(1);
                Ok(self.get(&key).cloned().unwrap_or(default))
            }
            Operation::Data => Ok(Value::Object(self.data().clone())),
        }
    }
}

/// Positional argument access with per-operation error messages
struct Arguments {
    operation: Operation,
    values: Vec<Value>,
}

impl Arguments {
    fn new(operation: Operation, values: Vec<Value>) -> Self {
        Self { operation, values }
    }

    fn invalid(&self, reason: String) -> TrellisError {
        TrellisError::invalid_call(self.operation.name(), reason)
    }

    /// Take argument `index`, null when absent
    fn take(&mut self, index: usize) -> Value {
        self.values
            .get_mut(index)
            .map(Value::take)
            .unwrap_or(Value::Null)
    }

    fn string(&mut self, index: usize) -> Result<String> {
        match self.take(index) {
            Value::String(s) => Ok(s),
            Value::Null => Err(self.invalid(format!("argument {} is required", index + 1))),
            other => Err(self.invalid(format!(
                "argument {} must be a string, got {}",
                index + 1,
                other
            ))),
        }
    }

    /// An object argument; absent or null means an empty context
    fn context(&mut self, index: usize) -> Result<Context> {
        match self.take(index) {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Context::new()),
            other => Err(self.invalid(format!(
                "argument {} must be an object, got {}",
                index + 1,
                other
            ))),
        }
    }

    /// Per-stage filter arguments; a non-array stage entry is a single argument
    fn stage_args(&mut self, index: usize) -> Result<Vec<Vec<Value>>> {
        match self.take(index) {
            Value::Null => Ok(Vec::new()),
            Value::Array(stages) => Ok(stages
                .into_iter()
                .map(|stage| match stage {
                    Value::Array(args) => args,
                    Value::Null => Vec::new(),
                    single => vec![single],
                })
                .collect()),
            other => Err(self.invalid(format!(
                "argument {} must be an array of argument lists, got {}",
                index + 1,
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_both_spellings() {
        assert_eq!(Operation::from_name("insert_if"), Some(Operation::InsertIf));
        assert_eq!(Operation::from_name("insertif"), Some(Operation::InsertIf));
        assert_eq!(Operation::from_name("lastBuffer"), Some(Operation::LastBuffer));
        assert_eq!(Operation::from_name("buffer"), Some(Operation::LastBuffer));
        assert_eq!(Operation::from_name("v"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for op in [
            Operation::Filter,
            Operation::Layout,
            Operation::LastBuffer,
            Operation::Supply,
            Operation::Insert,
            Operation::InsertIf,
            Operation::Get,
            Operation::Data,
        ] {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
    }

    #[test]
    fn test_stage_args_wrap_scalars() {
        let mut args = Arguments::new(
            Operation::Filter,
            vec![
                Value::Null,
                Value::Null,
                serde_json::json!([["a"], "b", null]),
            ],
        );
        assert_eq!(
            args.stage_args(2).unwrap(),
            vec![
                vec![serde_json::json!("a")],
                vec![serde_json::json!("b")],
                vec![],
            ]
        );
    }

    #[test]
    fn test_missing_string_is_invalid_call() {
        let mut args = Arguments::new(Operation::Layout, vec![]);
        let err = args.string(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "INVALID_CALL: layout: argument 1 is required"
        );
    }
}
