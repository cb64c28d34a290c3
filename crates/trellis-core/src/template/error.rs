//! Errors raised while a body runs

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A name that is bound nowhere in scope
    UndefinedName { name: String, line: usize },

    /// Tag, block or expression that cannot be parsed
    Syntax { message: String, line: usize },

    /// An expression produced a list where text was expected
    ListOutsideLoop { expr: String },

    /// An expression produced an object where text was expected
    ObjectInOutput { expr: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedName { name, line } => {
                write!(f, "line {}: '{}' is not defined", line, name)
            }
            TemplateError::Syntax { message, line } => {
                write!(f, "line {}: {}", line, message)
            }
            TemplateError::ListOutsideLoop { expr } => write!(
                f,
                "'{}' is a list; iterate it with {{{{each {} |item|}}}}",
                expr, expr
            ),
            TemplateError::ObjectInOutput { expr } => write!(
                f,
                "'{}' is an object; output one of its fields instead",
                expr
            ),
        }
    }
}

impl std::error::Error for TemplateError {}
