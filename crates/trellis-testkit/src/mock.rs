//! Recording collaborators for executor tests
//!
//! [`MockEngine`] and [`RecordingCommands`] stand in for the engine and the
//! command dispatcher. Both record every interaction so tests can assert on
//! what an executor asked for, and in which order.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use trellis_core::{
    CommandDispatcher, Commands, Context, Engine, Result, Sections, Template, TemplateEvent,
    TrellisError,
};

/// One fired event, detached from the executor that fired it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub name: &'static str,
    /// Path of the executor that fired the event
    pub template: PathBuf,
    pub layout: Option<PathBuf>,
    /// Partial name and context carried by `prepartial`
    pub partial: Option<(String, Context)>,
}

/// Engine double with scripted lookups and renders
///
/// `find` answers from registered names only. `render` answers from
/// registered outputs and fails with `TemplateNotFound` otherwise. Layouts
/// are executed for real, from disk, with a fresh executor bound back to
/// this engine.
#[derive(Default)]
pub struct MockEngine {
    paths: HashMap<String, PathBuf>,
    outputs: HashMap<String, String>,
    layout_sections: Sections,
    layout_commands: Commands,
    finds: RefCell<Vec<String>>,
    renders: RefCell<Vec<(String, Context)>>,
    events: RefCell<Vec<RecordedEvent>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find(name)` return `path`
    pub fn with_template(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(name.to_string(), path.into());
        self
    }

    /// Make `render(name, ..)` return `output`
    pub fn with_output(mut self, name: &str, output: &str) -> Self {
        self.outputs.insert(name.to_string(), output.to_string());
        self
    }

    pub fn finds(&self) -> Vec<String> {
        self.finds.borrow().clone()
    }

    pub fn renders(&self) -> Vec<(String, Context)> {
        self.renders.borrow().clone()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(|event| event.name).collect()
    }
}

impl Engine for MockEngine {
    fn find(&self, name: &str) -> Option<PathBuf> {
        self.finds.borrow_mut().push(name.to_string());
        self.paths.get(name).cloned()
    }

    fn render(&self, name: &str, context: &Context) -> Result<String> {
        self.renders
            .borrow_mut()
            .push((name.to_string(), context.clone()));
        self.outputs
            .get(name)
            .cloned()
            .ok_or_else(|| TrellisError::TemplateNotFound(name.to_string()))
    }

    fn render_layout(&self, path: &Path, context: &Context, child_buffer: &str) -> Result<String> {
        let mut layout = Template::new(path, &self.layout_sections, self, &self.layout_commands);
        layout.inherit_buffer(child_buffer);
        layout.render(context.clone())
    }

    fn fire(&self, event: &TemplateEvent<'_>) {
        let partial = match event {
            TemplateEvent::PrePartial { name, context, .. } => {
                Some((name.to_string(), (*context).clone()))
            }
            _ => None,
        };
        self.events.borrow_mut().push(RecordedEvent {
            name: event.name(),
            template: event.template().path().to_path_buf(),
            layout: event.layout_path().map(Path::to_path_buf),
            partial,
        });
    }
}

/// Command dispatcher double
///
/// Helpers return queued values in order, then null. Filter stages return
/// queued values in order, then decline.
#[derive(Default)]
pub struct RecordingCommands {
    helper_returns: RefCell<VecDeque<Value>>,
    filter_returns: RefCell<VecDeque<Value>>,
    runs: RefCell<Vec<(String, Vec<Value>)>>,
    filters: RefCell<Vec<(String, Value, Vec<Value>)>>,
}

impl RecordingCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(self, values: impl IntoIterator<Item = Value>) -> Self {
        self.helper_returns.borrow_mut().extend(values);
        self
    }

    pub fn filtering_to(self, values: impl IntoIterator<Item = Value>) -> Self {
        self.filter_returns.borrow_mut().extend(values);
        self
    }

    /// Helper calls as (name, args)
    pub fn runs(&self) -> Vec<(String, Vec<Value>)> {
        self.runs.borrow().clone()
    }

    /// Filter stages as (name, input, args)
    pub fn filters(&self) -> Vec<(String, Value, Vec<Value>)> {
        self.filters.borrow().clone()
    }
}

impl CommandDispatcher for RecordingCommands {
    fn run(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.runs
            .borrow_mut()
            .push((name.to_string(), args.to_vec()));
        Ok(self
            .helper_returns
            .borrow_mut()
            .pop_front()
            .unwrap_or(Value::Null))
    }

    fn filter(&self, name: &str, value: &Value, args: &[Value]) -> Result<Value> {
        self.filters
            .borrow_mut()
            .push((name.to_string(), value.clone(), args.to_vec()));
        Ok(self
            .filter_returns
            .borrow_mut()
            .pop_front()
            .unwrap_or(Value::Null))
    }
}
