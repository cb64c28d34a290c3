//! Named content blocks shared along one render chain

use std::cell::RefCell;
use std::collections::HashMap;

/// A finalized section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: String,
    content: String,
}

impl Section {
    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Storage for finalized sections, keyed by name
///
/// Receivers are shared because the store is reached from every executor
/// of a render chain at once; implementations use interior mutability.
pub trait SectionStore {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<Section>;

    /// Store a section, replacing any previous one with the same key
    fn put(&self, section: Section);

    fn clear(&self);
}

/// Single-threaded in-memory store
#[derive(Debug, Default)]
pub struct Sections {
    entries: RefCell<HashMap<String, Section>>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SectionStore for Sections {
    fn has(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Section> {
        self.entries.borrow().get(key).cloned()
    }

    fn put(&self, section: Section) {
        self.entries
            .borrow_mut()
            .insert(section.key.clone(), section);
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let sections = Sections::new();
        assert!(!sections.has("head"));

        sections.put(Section::new("head", "<title>x</title>"));
        assert!(sections.has("head"));
        assert_eq!(
            sections.get("head").unwrap().content(),
            "<title>x</title>"
        );
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_put_replaces() {
        let sections = Sections::new();
        sections.put(Section::new("a", "one"));
        sections.put(Section::new("a", "two"));
        assert_eq!(sections.get("a").unwrap().content(), "two");
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_clear() {
        let sections = Sections::new();
        sections.put(Section::new("a", "one"));
        sections.clear();
        assert!(sections.is_empty());
        assert!(sections.get("a").is_none());
    }
}
