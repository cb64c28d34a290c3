//! Template engine: name resolution, event fan-out and nested renders

mod events;
mod finder;

pub use events::{Events, Listener};
pub use finder::Finder;

use std::cell::Cell;
use std::path::{Path, PathBuf};

use crate::command::{CommandDispatcher, Commands};
use crate::config::EngineConfig;
use crate::error::{Result, TrellisError};
use crate::section::{SectionStore, Sections};
use crate::template::{Alias, Context, Template, TemplateEvent};

/// What an executor needs from the engine that drives it
pub trait Engine {
    /// Resolve a logical template name to a file
    fn find(&self, name: &str) -> Option<PathBuf>;

    /// Fully render a named template under `context`
    fn render(&self, name: &str, context: &Context) -> Result<String>;

    /// Render a resolved layout wrapping a child's body output.
    ///
    /// Engines that can hand `child_buffer` to the layout's executor should,
    /// so the layout body reads it back through `last_buffer`.
    fn render_layout(&self, path: &Path, context: &Context, child_buffer: &str) -> Result<String> {
        let _ = child_buffer;
        self.render(&path.to_string_lossy(), context)
    }

    /// Notify listeners; must not alter the event or fail
    fn fire(&self, event: &TemplateEvent<'_>);
}

/// File-backed engine
///
/// Owns the section store for its render chains. Sections are cleared when
/// an outermost render starts, so nothing declared during one render leaks
/// into the next.
pub struct FileEngine {
    finder: Finder,
    sections: Sections,
    commands: Box<dyn CommandDispatcher>,
    events: Events,
    alias: Option<Alias>,
    max_depth: usize,
    depth: Cell<usize>,
}

impl FileEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            finder: Finder::new(config.folders.clone(), config.extensions.clone()),
            sections: Sections::new(),
            commands: Box::new(Commands::with_builtins(config.strict)),
            events: Events::new(),
            alias: config.alias.as_deref().map(Alias::new),
            max_depth: config.max_depth,
            depth: Cell::new(0),
        }
    }

    /// Replace the command dispatcher
    pub fn with_commands(mut self, commands: impl CommandDispatcher + 'static) -> Self {
        self.commands = Box::new(commands);
        self
    }

    pub fn finder(&self) -> &Finder {
        &self.finder
    }

    pub fn finder_mut(&mut self) -> &mut Finder {
        &mut self.finder
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Render a template file by path, bypassing name resolution
    pub fn render_file(&self, path: &Path, context: &Context) -> Result<String> {
        self.execute(path, context, None)
    }

    fn execute(&self, path: &Path, context: &Context, child_buffer: Option<&str>) -> Result<String> {
        let _guard = DepthGuard::enter(&self.depth, self.max_depth, path)?;
        if self.depth.get() == 1 {
            self.sections.clear();
        }

        let mut template = Template::new(path, &self.sections, self, &*self.commands);
        if let Some(alias) = &self.alias {
            template.alias(alias.clone());
        }
        if let Some(buffer) = child_buffer {
            template.inherit_buffer(buffer);
        }
        template.render(context.clone())
    }
}

impl Engine for FileEngine {
    fn find(&self, name: &str) -> Option<PathBuf> {
        self.finder.find(name)
    }

    fn render(&self, name: &str, context: &Context) -> Result<String> {
        let path = self
            .find(name)
            .ok_or_else(|| TrellisError::TemplateNotFound(name.to_string()))?;
        self.execute(&path, context, None)
    }

    fn render_layout(&self, path: &Path, context: &Context, child_buffer: &str) -> Result<String> {
        self.execute(path, context, Some(child_buffer))
    }

    fn fire(&self, event: &TemplateEvent<'_>) {
        self.events.fire(event);
    }
}

/// Tracks render nesting; the level is released on drop, error paths included
struct DepthGuard<'d> {
    depth: &'d Cell<usize>,
}

impl<'d> DepthGuard<'d> {
    fn enter(depth: &'d Cell<usize>, max_depth: usize, path: &Path) -> Result<Self> {
        let next = depth.get() + 1;
        if next > max_depth {
            return Err(TrellisError::RecursionLimit {
                path: path.to_path_buf(),
                max_depth,
            });
        }
        depth.set(next);
        Ok(Self { depth })
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
