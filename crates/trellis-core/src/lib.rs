// Core modules
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod section;
pub mod template;

// Re-export commonly used types
pub use command::{CommandDispatcher, Commands};
pub use config::{Config, EngineConfig};
pub use engine::{Engine, Events, FileEngine, Finder};
pub use error::{Result, TrellisError};
pub use section::{Section, SectionStore, Sections};
pub use template::{Alias, Context, Supply, Template, TemplateEvent};
