//! Template folders on disk for engine tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use trellis_core::{EngineConfig, FileEngine};

use crate::temp_dir_in_workspace;

/// A temporary template folder
///
/// # Examples
///
/// ```rust
/// use trellis_testkit::TemplateFixture;
///
/// let fixture = TemplateFixture::new()
///     .with_file("page.tpl", "{{ title }}")
///     .with_file("partials/nav.tpl", "<nav></nav>");
/// assert!(fixture.path().join("partials/nav.tpl").is_file());
/// ```
pub struct TemplateFixture {
    dir: TempDir,
}

impl TemplateFixture {
    pub fn new() -> Self {
        Self {
            dir: temp_dir_in_workspace(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write a file (creating parent folders) and return its absolute path
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture folder");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Engine settings that search only this folder
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            folders: vec![self.dir.path().to_path_buf()],
            ..EngineConfig::default()
        }
    }

    pub fn engine(&self) -> FileEngine {
        FileEngine::new(&self.config())
    }
}

impl Default for TemplateFixture {
    fn default() -> Self {
        Self::new()
    }
}
