//! Helper and filter dispatch

mod filters;

use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, TrellisError};
use crate::template::body::helpers::display_value;

/// Executes named helpers and single filter stages
pub trait CommandDispatcher {
    /// Run a helper with positional arguments
    fn run(&self, name: &str, args: &[Value]) -> Result<Value>;

    /// Run one filter stage; `Value::Null` means the stage declined
    fn filter(&self, name: &str, value: &Value, args: &[Value]) -> Result<Value>;
}

pub type HelperFn = Box<dyn Fn(&[Value]) -> Result<Value>>;
pub type FilterFn = Box<dyn Fn(&Value, &[Value]) -> Result<Value>>;

/// Registry-backed dispatcher
pub struct Commands {
    helpers: HashMap<String, HelperFn>,
    filters: HashMap<String, FilterFn>,
    strict: bool,
}

impl Commands {
    /// Empty registry. In strict mode unknown names are errors; otherwise
    /// unknown helpers yield null and unknown filters decline.
    pub fn new(strict: bool) -> Self {
        Self {
            helpers: HashMap::new(),
            filters: HashMap::new(),
            strict,
        }
    }

    /// Registry preloaded with the built-in helpers and filters
    pub fn with_builtins(strict: bool) -> Self {
        let mut commands = Self::new(strict);
        commands
            .register_helper("e", |args| {
                let text = display_value(args.first().unwrap_or(&Value::Null));
                Ok(Value::String(
                    html_escape::encode_safe(&text).into_owned(),
                ))
            })
            .register_helper("raw", |args| {
                Ok(Value::String(display_value(
                    args.first().unwrap_or(&Value::Null),
                )))
            });
        filters::register_builtins(&mut commands);
        commands
    }

    pub fn register_helper<F>(&mut self, name: &str, helper: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        self.helpers.insert(name.to_string(), Box::new(helper));
        self
    }

    pub fn register_filter<F>(&mut self, name: &str, filter: F) -> &mut Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        self.filters.insert(name.to_string(), Box::new(filter));
        self
    }

    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self::with_builtins(true)
    }
}

impl CommandDispatcher for Commands {
    fn run(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.helpers.get(name) {
            Some(helper) => helper(args),
            None if self.strict => Err(TrellisError::HelperNotFound(name.to_string())),
            None => {
                tracing::debug!("unknown helper '{}' rendered as null", name);
                Ok(Value::Null)
            }
        }
    }

    fn filter(&self, name: &str, value: &Value, args: &[Value]) -> Result<Value> {
        match self.filters.get(name) {
            Some(filter) => filter(value, args),
            None if self.strict => Err(TrellisError::FilterNotFound(name.to_string())),
            None => {
                tracing::debug!("unknown filter '{}' declined", name);
                Ok(Value::Null)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registered_helper_receives_arguments() {
        let mut commands = Commands::new(true);
        commands.register_helper("sum", |args| {
            Ok(json!(args.iter().filter_map(Value::as_i64).sum::<i64>()))
        });

        assert_eq!(commands.run("sum", &[json!(1), json!(2)]).unwrap(), json!(3));
    }

    #[test]
    fn test_strict_unknown_names_fail() {
        let commands = Commands::new(true);
        assert!(matches!(
            commands.run("nope", &[]),
            Err(TrellisError::HelperNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            commands.filter("nope", &json!("x"), &[]),
            Err(TrellisError::FilterNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_lenient_unknown_names_are_null() {
        let commands = Commands::new(false);
        assert_eq!(commands.run("nope", &[]).unwrap(), Value::Null);
        assert_eq!(commands.filter("nope", &json!("x"), &[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_helper_errors_propagate() {
        let mut commands = Commands::new(true);
        commands.register_helper("broken", |_| Err(TrellisError::helper("broken", "nope")));
        let err = commands.run("broken", &[]).unwrap_err();
        assert_eq!(err.to_string(), "HELPER_FAILED: broken: nope");
    }

    #[test]
    fn test_builtin_escape_helper() {
        let commands = Commands::with_builtins(true);
        let escaped = commands.run("e", &[json!("<b>\"x\"</b>")]).unwrap();
        let escaped = escaped.as_str().unwrap();
        assert!(escaped.starts_with("&lt;b&gt;"));
        assert!(!escaped.contains('<') && !escaped.contains('"'));
        assert_eq!(commands.run("raw", &[json!("<b>")]).unwrap(), json!("<b>"));
        assert_eq!(commands.run("e", &[]).unwrap(), json!(""));
    }
}
