//! Value helpers for body interpretation

use serde_json::Value;

use crate::template::error::TemplateError;

/// Resolve a dotted key below `data`; numeric segments index arrays
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = data;

    for part in key.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Split `head.rest` into its first segment and the remainder
pub(crate) fn split_head(key: &str) -> (&str, Option<&str>) {
    match key.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (key, None),
    }
}

/// Text of a value as it appears in a buffer
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(TemplateError::ListOutsideLoop {
            expr: key.to_string(),
        }),
        Value::Object(_) => Err(TemplateError::ObjectInOutput {
            expr: key.to_string(),
        }),
    }
}

/// Lenient stringification used by helpers and filters: containers become JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested_and_indexed() {
        let data = json!({"paper": {"authors": [{"name": "Ada"}, {"name": "Alan"}]}});
        assert_eq!(
            resolve_key(&data, "paper.authors.1.name"),
            Some(&json!("Alan"))
        );
        assert_eq!(resolve_key(&data, "paper.authors.7"), None);
        assert_eq!(resolve_key(&data, "paper.missing"), None);
        assert_eq!(resolve_key(&data, "paper.authors.x"), None);
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify_value(&json!(42), "n").unwrap(), "42");
        assert_eq!(stringify_value(&json!(9.5), "n").unwrap(), "9.5");
        assert_eq!(stringify_value(&json!(false), "b").unwrap(), "false");
        assert_eq!(stringify_value(&Value::Null, "x").unwrap(), "");
    }

    #[test]
    fn test_stringify_containers_fail() {
        assert_eq!(
            stringify_value(&json!([1]), "list"),
            Err(TemplateError::ListOutsideLoop { expr: "list".into() })
        );
        assert_eq!(
            stringify_value(&json!({"a": 1}), "obj"),
            Err(TemplateError::ObjectInOutput { expr: "obj".into() })
        );
    }

    #[test]
    fn test_display_value_is_lenient() {
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&Value::Null), "");
    }
}
