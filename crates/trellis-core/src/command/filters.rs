//! Built-in filters

use serde_json::Value;

use super::Commands;
use crate::template::body::helpers::display_value;

pub(super) fn register_builtins(commands: &mut Commands) {
    commands
        .register_filter("upper", |value, _| Ok(map_text(value, |s| s.to_uppercase())))
        .register_filter("lower", |value, _| Ok(map_text(value, |s| s.to_lowercase())))
        .register_filter("trim", |value, _| Ok(map_text(value, |s| s.trim().to_string())))
        .register_filter("escape", |value, _| {
            Ok(map_text(value, |s| html_escape::encode_safe(s).into_owned()))
        })
        .register_filter("first", |value, _| Ok(first(value)))
        .register_filter("last", |value, _| Ok(last(value)))
        .register_filter("join", |value, args| Ok(join(value, args)))
        .register_filter("default", |value, args| Ok(default(value, args)));
}

/// Apply a text transform; null input declines
fn map_text(value: &Value, transform: impl Fn(&str) -> String) -> Value {
    match value {
        Value::Null => Value::Null,
        other => Value::String(transform(&display_value(other))),
    }
}

fn first(value: &Value) -> Value {
    match value {
        Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
        Value::String(s) => s
            .chars()
            .next()
            .map(|c| Value::String(c.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn last(value: &Value) -> Value {
    match value {
        Value::Array(items) => items.last().cloned().unwrap_or(Value::Null),
        Value::String(s) => s
            .chars()
            .next_back()
            .map(|c| Value::String(c.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn join(value: &Value, args: &[Value]) -> Value {
    let Value::Array(items) = value else {
        return Value::Null;
    };
    let separator = args.first().map(display_value).unwrap_or_default();
    Value::String(
        items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(&separator),
    )
}

/// Replace null or empty text with the first argument
fn default(value: &Value, args: &[Value]) -> Value {
    let is_blank = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    match args.first() {
        Some(fallback) if is_blank => fallback.clone(),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use crate::command::{CommandDispatcher, Commands};
    use serde_json::{json, Value};

    fn apply(name: &str, value: Value, args: &[Value]) -> Value {
        Commands::with_builtins(true)
            .filter(name, &value, args)
            .unwrap()
    }

    #[test]
    fn test_case_and_trim() {
        assert_eq!(apply("upper", json!("abc"), &[]), json!("ABC"));
        assert_eq!(apply("lower", json!("ABC"), &[]), json!("abc"));
        assert_eq!(apply("trim", json!("  x  "), &[]), json!("x"));
        assert_eq!(apply("upper", json!(12), &[]), json!("12"));
    }

    #[test]
    fn test_null_declines() {
        assert_eq!(apply("upper", Value::Null, &[]), Value::Null);
        assert_eq!(apply("first", json!([]), &[]), Value::Null);
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(apply("first", json!([1, 2, 3]), &[]), json!(1));
        assert_eq!(apply("last", json!([1, 2, 3]), &[]), json!(3));
        assert_eq!(apply("first", json!("Lorem"), &[]), json!("L"));
        assert_eq!(apply("last", json!("Lorem"), &[]), json!("m"));
    }

    #[test]
    fn test_join() {
        assert_eq!(
            apply("join", json!(["a", 1, true]), &[json!(", ")]),
            json!("a, 1, true")
        );
        assert_eq!(apply("join", json!(["a", "b"]), &[]), json!("ab"));
        assert_eq!(apply("join", json!("not a list"), &[]), Value::Null);
    }

    #[test]
    fn test_default_only_replaces_blank() {
        assert_eq!(apply("default", json!(""), &[json!("n/a")]), json!("n/a"));
        assert_eq!(apply("default", json!("set"), &[json!("n/a")]), Value::Null);
        assert_eq!(apply("default", json!(""), &[]), Value::Null);
    }

    #[test]
    fn test_escape() {
        assert_eq!(apply("escape", json!("a & b"), &[]), json!("a &amp; b"));
    }
}
