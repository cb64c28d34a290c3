use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::consts::{DEFAULT_EXTENSIONS, DEFAULT_MAX_DEPTH};
use crate::error::{Result, TrellisError};

/// trellis.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Template folders, searched in order
    #[serde(default)]
    pub folders: Vec<PathBuf>,
    /// Extensions appended to names that carry none of them
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Call prefix templates may use instead of the bare operation names
    #[serde(default)]
    pub alias: Option<String>,
    /// Unknown helpers and filters are errors when true
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            extensions: default_extensions(),
            alias: None,
            strict: default_strict(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_strict() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Load a config file; relative template folders are anchored at the
    /// directory containing the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrellisError::ConfigParseError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&content)?;

        if let Some(base) = path.parent() {
            config.engine.folders = config
                .engine
                .folders
                .into_iter()
                .map(|folder| {
                    if folder.is_absolute() {
                        folder
                    } else {
                        base.join(folder)
                    }
                })
                .collect();
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.engine.max_depth == 0 {
            return Err(TrellisError::ConfigParseError(
                "engine.max_depth must be at least 1".to_string(),
            ));
        }
        if self.engine.extensions.iter().any(|ext| ext.is_empty()) {
            return Err(TrellisError::ConfigParseError(
                "engine.extensions must not contain empty entries".to_string(),
            ));
        }
        if matches!(self.engine.alias.as_deref(), Some("")) {
            return Err(TrellisError::ConfigParseError(
                "engine.alias must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.engine.folders.is_empty());
        assert_eq!(config.engine.extensions, vec!["tpl", "inc"]);
        assert!(config.engine.alias.is_none());
        assert!(config.engine.strict);
        assert_eq!(config.engine.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_full_engine_section() {
        let config = Config::from_toml(
            r#"
            [engine]
            folders = ["views", "/srv/shared"]
            extensions = ["html"]
            alias = "T"
            strict = false
            max_depth = 8
            "#,
        )
        .unwrap();

        assert_eq!(
            config.engine.folders,
            vec![PathBuf::from("views"), PathBuf::from("/srv/shared")]
        );
        assert_eq!(config.engine.extensions, vec!["html"]);
        assert_eq!(config.engine.alias.as_deref(), Some("T"));
        assert!(!config.engine.strict);
        assert_eq!(config.engine.max_depth, 8);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = Config::from_toml("[engine]\nmax_depth = 0").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG_PARSE_ERROR"));
    }

    #[test]
    fn test_empty_alias_rejected() {
        assert!(Config::from_toml("[engine]\nalias = \"\"").is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::from_toml("[engine\nstrict = ").unwrap_err();
        assert!(matches!(err, TrellisError::ConfigParseError(_)));
    }

    #[test]
    fn test_from_file_anchors_relative_folders() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("trellis.toml");
        std::fs::write(&path, "[engine]\nfolders = [\"views\"]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.engine.folders, vec![temp.path().join("views")]);
    }
}
