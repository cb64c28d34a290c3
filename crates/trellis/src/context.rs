//! Engine settings shared by every command

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use trellis_core::config::consts::CONFIG_FILE_NAME;
use trellis_core::{Config, EngineConfig, FileEngine};

/// Resolved engine settings for one invocation
pub struct Context {
    pub engine: EngineConfig,
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Context {
    /// Load settings from `--config`, else `./trellis.toml` when present,
    /// else defaults. `--dir` folders are searched first; with no folders at
    /// all the current directory is used.
    pub fn new(config: Option<PathBuf>, dirs: Vec<PathBuf>, verbose: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;
        let config_path = config
            .map(|path| current_dir.join(path))
            .or_else(|| Some(current_dir.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()));

        let mut engine = match &config_path {
            Some(path) => {
                Config::from_file(path)
                    .map_err(|e| anyhow!("Failed to load {}: {}", path.display(), e))?
                    .engine
            }
            None => EngineConfig::default(),
        };

        let mut folders: Vec<PathBuf> = dirs.into_iter().map(|dir| current_dir.join(dir)).collect();
        folders.append(&mut engine.folders);
        if folders.is_empty() {
            folders.push(current_dir);
        }
        engine.folders = folders;

        tracing::debug!("template folders: {:?}", engine.folders);

        Ok(Self {
            engine,
            config_path,
            verbose,
        })
    }

    pub fn file_engine(&self) -> FileEngine {
        FileEngine::new(&self.engine)
    }
}
