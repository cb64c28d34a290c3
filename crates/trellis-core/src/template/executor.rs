//! The render pass over one template file

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::alias::Alias;
use super::body::helpers::{resolve_key, split_head};
use super::body::{BodyInterpreter, Scope};
use super::call::Operation;
use super::event::TemplateEvent;
use crate::command::CommandDispatcher;
use crate::config::consts::FILTER_DELIMITER;
use crate::engine::Engine;
use crate::error::{Result, TrellisError};
use crate::section::{Section, SectionStore};

/// Variables a body executes under
pub type Context = Map<String, Value>;

/// Fallback for [`Template::supply`] when the section is missing
pub enum Supply<'f> {
    /// Empty string
    Empty,
    /// This text, as-is
    Text(String),
    /// Called with the section key and the asking template
    With(&'f dyn Fn(&str, &Template<'_>) -> String),
}

impl From<&str> for Supply<'_> {
    fn from(text: &str) -> Self {
        Supply::Text(text.to_string())
    }
}

/// Executor for one render pass over one body file
///
/// A template is built fresh for each file rendered, by the engine or by a
/// caller. `buffer` and `layout` belong to the pass that is running: every
/// [`Template::render`] overwrites the buffer and consumes the layout.
pub struct Template<'a> {
    path: PathBuf,
    sections: &'a dyn SectionStore,
    engine: &'a dyn Engine,
    command: &'a dyn CommandDispatcher,
    context: Context,
    buffer: String,
    layout: Option<PathBuf>,
    alias: Option<Alias>,
}

impl<'a> Template<'a> {
    pub fn new(
        path: impl Into<PathBuf>,
        sections: &'a dyn SectionStore,
        engine: &'a dyn Engine,
        command: &'a dyn CommandDispatcher,
    ) -> Self {
        Self {
            path: path.into(),
            sections,
            engine,
            command,
            context: Context::new(),
            buffer: String::new(),
            layout: None,
            alias: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Context bound by the last `render`
    pub fn data(&self) -> &Context {
        &self.context
    }

    /// Layout declared for the pending render, if any
    pub fn layout_path(&self) -> Option<&Path> {
        self.layout.as_deref()
    }

    /// Answer to call names carrying `alias`'s prefix as well
    pub fn alias(&mut self, alias: Alias) {
        self.alias = Some(alias);
    }

    /// Seed the buffer with a child's output before rendering as its layout
    pub fn inherit_buffer(&mut self, buffer: impl Into<String>) {
        self.buffer = buffer.into();
    }

    /// Dotted lookup in the bound context
    pub fn get(&self, key: &str) -> Option<&Value> {
        match split_head(key) {
            (head, None) => self.context.get(head),
            (head, Some(rest)) => resolve_key(self.context.get(head)?, rest),
        }
    }

    /// Run a helper through the command dispatcher
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.command.run(name, args)
    }

    /// Apply a `|`-separated filter pipeline left to right.
    ///
    /// Stage `i` receives `args_per_stage[i]` (or no arguments). A stage that
    /// returns null declines and the value passes through unchanged.
    pub fn filter(&self, pipeline: &str, value: Value, args_per_stage: &[Vec<Value>]) -> Result<Value> {
        pipeline
            .split(FILTER_DELIMITER)
            .map(str::trim)
            .enumerate()
            .filter(|(_, stage)| !stage.is_empty())
            .try_fold(value, |current, (i, stage)| {
                let args = args_per_stage.get(i).map(Vec::as_slice).unwrap_or(&[]);
                let filtered = self.command.filter(stage, &current, args)?;
                tracing::trace!("filter stage '{}' declined: {}", stage, filtered.is_null());
                Ok(if filtered.is_null() { current } else { filtered })
            })
    }

    /// Render the body under `context`, then its layout chain if one was declared
    pub fn render(&mut self, context: Context) -> Result<String> {
        let engine = self.engine;
        self.context = context;

        tracing::debug!("rendering {}", self.path.display());
        engine.fire(&TemplateEvent::PreRender { template: &*self });

        self.buffer = match self.collect() {
            Ok(buffer) => buffer,
            Err(err) => {
                self.layout = None;
                return Err(err);
            }
        };

        let output = match self.layout.take() {
            Some(layout) => {
                engine.fire(&TemplateEvent::Layout {
                    path: &layout,
                    template: &*self,
                });
                tracing::debug!(
                    "rendering layout {} for {}",
                    layout.display(),
                    self.path.display()
                );
                let rendered = engine.render_layout(&layout, &self.context, &self.buffer)?;
                engine.fire(&TemplateEvent::RenderLayout {
                    path: &layout,
                    template: &*self,
                });
                rendered
            }
            None => self.buffer.clone(),
        };

        engine.fire(&TemplateEvent::Rendered { template: &*self });
        Ok(output)
    }

    /// Declare the layout this render wraps itself in
    pub fn layout(&mut self, name: &str) -> Result<()> {
        let path = self
            .engine
            .find(name)
            .ok_or_else(|| TrellisError::InvalidArgument(name.to_string()))?;
        self.layout = Some(path);
        Ok(())
    }

    /// Raw body output of the last render, before any layout
    pub fn last_buffer(&self) -> &str {
        &self.buffer
    }

    /// Content of section `key`, or the fallback
    pub fn supply(&self, key: &str, default: Supply<'_>) -> String {
        if self.sections.has(key) {
            if let Some(section) = self.sections.get(key) {
                return section.content().to_string();
            }
        }

        match default {
            Supply::Empty => String::new(),
            Supply::Text(text) => text,
            Supply::With(callback) => callback(key, self),
        }
    }

    /// Render a partial through the engine, between prepartial and afterpartial
    pub fn insert(&self, name: &str, context: &Context) -> Result<String> {
        self.engine.fire(&TemplateEvent::PrePartial {
            name,
            context,
            template: self,
        });
        let rendered = self.engine.render(name, context)?;
        self.engine
            .fire(&TemplateEvent::AfterPartial { template: self });
        Ok(rendered)
    }

    /// Like [`Template::insert`], but a name that does not resolve renders
    /// as empty without any event or render attempt
    pub fn insert_if(&self, name: &str, context: &Context) -> Result<String> {
        if self.engine.find(name).is_none() {
            tracing::debug!("optional partial '{}' not found", name);
            return Ok(String::new());
        }
        self.insert(name, context)
    }

    /// Call an operation by the name a body uses for it.
    ///
    /// Alias-prefixed names are stripped first; names that are not built-in
    /// operations go to the command dispatcher as helpers.
    pub fn dispatch(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        let name = match &self.alias {
            Some(alias) => alias.resolve(name),
            None => name,
        };

        match Operation::from_name(name) {
            Some(operation) => self.apply(operation, args),
            None => self.call(name, &args),
        }
    }

    fn collect(&mut self) -> Result<String> {
        let source = std::fs::read_to_string(&self.path)?;
        let path = self.path.clone();
        BodyInterpreter::new(&path).execute(&source, self)
    }
}

impl Scope for Template<'_> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        self.dispatch(name, args)
    }

    fn declare_section(&mut self, key: &str, content: String) -> Result<String> {
        if let Some(existing) = self.sections.get(key) {
            return Ok(existing.content().to_string());
        }
        self.sections.put(Section::new(key, content.as_str()));
        Ok(content)
    }
}
