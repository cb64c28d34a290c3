use std::path::PathBuf;
use thiserror::Error;

use crate::template::error::TemplateError;

#[derive(Error, Debug)]
pub enum TrellisError {
    // Resolution errors
    #[error("INVALID_ARGUMENT: layout '{0}' does not resolve to a template file")]
    InvalidArgument(String),

    #[error("TEMPLATE_NOT_FOUND: template '{0}' not found")]
    TemplateNotFound(String),

    #[error("RECURSION_LIMIT: render nesting exceeded {max_depth} levels at '{path}'")]
    RecursionLimit { path: PathBuf, max_depth: usize },

    // Command errors
    #[error("HELPER_NOT_FOUND: helper '{0}' is not registered")]
    HelperNotFound(String),

    #[error("FILTER_NOT_FOUND: filter '{0}' is not registered")]
    FilterNotFound(String),

    #[error("HELPER_FAILED: {name}: {reason}")]
    Helper { name: String, reason: String },

    #[error("INVALID_CALL: {operation}: {reason}")]
    InvalidCall { operation: String, reason: String },

    // Body errors
    #[error("TEMPLATE_ERROR: {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl TrellisError {
    /// Build an [`TrellisError::InvalidCall`] for a built-in operation
    pub(crate) fn invalid_call(operation: &str, reason: impl Into<String>) -> Self {
        TrellisError::InvalidCall {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Build a [`TrellisError::Helper`] from inside a helper or filter closure
    pub fn helper(name: &str, reason: impl Into<String>) -> Self {
        TrellisError::Helper {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for TrellisError {
    fn from(err: toml::de::Error) -> Self {
        TrellisError::ConfigParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrellisError>;
