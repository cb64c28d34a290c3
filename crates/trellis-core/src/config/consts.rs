//! Defaults shared by the configuration model and the engine

/// File name looked up by the CLI when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "trellis.toml";

/// Extensions tried, in order, when a template name carries none of them
pub const DEFAULT_EXTENSIONS: &[&str] = &["tpl", "inc"];

/// Maximum nesting of layout and partial renders
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Separator between stages of a filter pipeline
pub const FILTER_DELIMITER: char = '|';
