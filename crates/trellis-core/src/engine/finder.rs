//! Logical template name → file path

use std::path::{Component, Path, PathBuf};

/// Resolves names against ordered folders and extensions
#[derive(Debug, Clone, Default)]
pub struct Finder {
    folders: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl Finder {
    pub fn new(folders: Vec<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            folders,
            extensions,
        }
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn add_folder(&mut self, folder: impl Into<PathBuf>) {
        self.folders.push(folder.into());
    }

    /// First existing file for `name`.
    ///
    /// Absolute names must point at an existing file. Relative names are
    /// tried in every folder, in order; names carrying a known extension are
    /// taken as-is, others get each extension appended in turn. Names that
    /// climb out of a folder never resolve.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let candidate = Path::new(name);
        if name.is_empty() {
            return None;
        }
        if candidate.is_absolute() {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }
        if candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            tracing::debug!("template name '{}' escapes the template folders", name);
            return None;
        }

        let file_names = self.file_names(name);
        self.folders.iter().find_map(|folder| {
            file_names
                .iter()
                .map(|file_name| folder.join(file_name))
                .find(|path| path.is_file())
        })
    }

    fn file_names(&self, name: &str) -> Vec<String> {
        let has_known_extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext));

        if has_known_extension || self.extensions.is_empty() {
            vec![name.to_string()]
        } else {
            self.extensions
                .iter()
                .map(|ext| format!("{}.{}", name, ext))
                .collect()
        }
    }
}
