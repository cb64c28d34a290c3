//! Ordered fan-out of template lifecycle events

use crate::template::TemplateEvent;

pub type Listener = Box<dyn Fn(&TemplateEvent<'_>)>;

/// Listener registry. Listeners run synchronously, in registration order,
/// and only observe the event.
#[derive(Default)]
pub struct Events {
    listeners: Vec<(Option<String>, Listener)>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one event name
    pub fn on<F>(&mut self, event: &str, listener: F) -> &mut Self
    where
        F: Fn(&TemplateEvent<'_>) + 'static,
    {
        self.listeners
            .push((Some(event.to_string()), Box::new(listener)));
        self
    }

    /// Listen to every event
    pub fn on_any<F>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(&TemplateEvent<'_>) + 'static,
    {
        self.listeners.push((None, Box::new(listener)));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn fire(&self, event: &TemplateEvent<'_>) {
        tracing::trace!("{:?}", event);
        for (filter, listener) in &self.listeners {
            if filter.as_deref().map_or(true, |name| name == event.name()) {
                listener(event);
            }
        }
    }
}
