//! Test utilities for trellis
//!
//! This crate provides shared testing utilities used across the trellis workspace.

mod fixtures;
mod mock;

pub use fixtures::TemplateFixture;
pub use mock::{MockEngine, RecordedEvent, RecordingCommands};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test files land in one gitignored location that is easy to clean up
/// manually if a test is killed before the directory drops.
///
/// # Panics
///
/// Panics if the current directory is unknown or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use trellis_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("page.tpl"), "{{ title }}").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Build a render context from a `serde_json::json!` object literal
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn context(value: serde_json::Value) -> trellis_core::Context {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("context must be a JSON object, got {}", other),
    }
}
