use super::call::Operation;

/// Alternate call prefix for template operations
///
/// With `Alias::new("T")` a body may write `T.insert("nav")` or
/// `T.v("x")` and get exactly what `insert("nav")` or `v("x")` would give.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    prefix: String,
}

impl Alias {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strip the prefix from a call name.
    ///
    /// `prefix.name` resolves to `name` for any call. A bare `prefixname`
    /// only resolves when `name` is a built-in operation, so helpers that
    /// merely start with the prefix keep their own name.
    pub fn resolve<'n>(&self, name: &'n str) -> &'n str {
        let Some(rest) = name.strip_prefix(self.prefix.as_str()) else {
            return name;
        };
        match rest.strip_prefix('.') {
            Some(dotted) if !dotted.is_empty() => dotted,
            Some(_) => name,
            None if Operation::from_name(rest).is_some() => rest,
            None => name,
        }
    }
}
