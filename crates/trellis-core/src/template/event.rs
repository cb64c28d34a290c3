//! Lifecycle notifications emitted by an executor

use std::path::Path;

use super::executor::{Context, Template};

/// Event names, in the order a render with a layout emits them
pub mod names {
    pub const PRERENDER: &str = "f.template.prerender";
    pub const LAYOUT: &str = "f.template.layout";
    pub const RENDERLAYOUT: &str = "f.template.renderlayout";
    pub const RENDERED: &str = "f.template.rendered";
    pub const PREPARTIAL: &str = "f.template.prepartial";
    pub const AFTERPARTIAL: &str = "f.template.afterpartial";
}

/// One notification; the payload mirrors the event's documented argument list
#[derive(Clone, Copy)]
pub enum TemplateEvent<'e> {
    PreRender {
        template: &'e Template<'e>,
    },
    Layout {
        path: &'e Path,
        template: &'e Template<'e>,
    },
    RenderLayout {
        path: &'e Path,
        template: &'e Template<'e>,
    },
    Rendered {
        template: &'e Template<'e>,
    },
    PrePartial {
        name: &'e str,
        context: &'e Context,
        template: &'e Template<'e>,
    },
    AfterPartial {
        template: &'e Template<'e>,
    },
}

impl<'e> TemplateEvent<'e> {
    pub fn name(&self) -> &'static str {
        match self {
            TemplateEvent::PreRender { .. } => names::PRERENDER,
            TemplateEvent::Layout { .. } => names::LAYOUT,
            TemplateEvent::RenderLayout { .. } => names::RENDERLAYOUT,
            TemplateEvent::Rendered { .. } => names::RENDERED,
            TemplateEvent::PrePartial { .. } => names::PREPARTIAL,
            TemplateEvent::AfterPartial { .. } => names::AFTERPARTIAL,
        }
    }

    /// The executor that emitted the event
    pub fn template(&self) -> &'e Template<'e> {
        match *self {
            TemplateEvent::PreRender { template }
            | TemplateEvent::Layout { template, .. }
            | TemplateEvent::RenderLayout { template, .. }
            | TemplateEvent::Rendered { template }
            | TemplateEvent::PrePartial { template, .. }
            | TemplateEvent::AfterPartial { template } => template,
        }
    }

    /// Layout path carried by `layout` and `renderlayout`
    pub fn layout_path(&self) -> Option<&'e Path> {
        match *self {
            TemplateEvent::Layout { path, .. } | TemplateEvent::RenderLayout { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for TemplateEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct(self.name());
        if let Some(path) = self.layout_path() {
            out.field("layout", &path);
        }
        if let TemplateEvent::PrePartial { name, context, .. } = self {
            out.field("name", name).field("context", context);
        }
        out.field("template", &self.template().path()).finish()
    }
}
