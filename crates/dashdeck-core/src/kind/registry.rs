//! Type-tag to renderer dispatch.

use crate::model::Widget;
use std::collections::HashMap;

/// Something that can turn a widget into renderer output `O`.
pub trait WidgetRenderer<O> {
    fn render(&self, widget: &Widget) -> O;
}

impl<O, F> WidgetRenderer<O> for F
where
    F: Fn(&Widget) -> O,
{
    fn render(&self, widget: &Widget) -> O {
        self(widget)
    }
}

/// Maps type tags to renderers, falling back to a generic renderer for
/// tags nobody registered.
pub struct RendererRegistry<O> {
    map: HashMap<String, Box<dyn WidgetRenderer<O>>>,
    fallback: Box<dyn WidgetRenderer<O>>,
}

impl<O> RendererRegistry<O> {
    /// Create a registry with only the fallback renderer.
    pub fn new(fallback: impl WidgetRenderer<O> + 'static) -> Self {
        Self {
            map: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Register (or replace) the renderer for a type tag.
    pub fn register(&mut self, tag: &str, renderer: impl WidgetRenderer<O> + 'static) {
        if self.map.insert(tag.to_string(), Box::new(renderer)).is_some() {
            log::debug!("renderer for widget type '{tag}' replaced");
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.map.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.map.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// The renderer that handles `tag`.
    pub fn renderer_for(&self, tag: &str) -> &dyn WidgetRenderer<O> {
        self.map
            .get(tag)
            .map(|r| &**r)
            .unwrap_or(&*self.fallback)
    }

    /// Render a widget with the renderer registered for its type tag.
    pub fn render(&self, widget: &Widget) -> O {
        self.renderer_for(&widget.widget_type).render(widget)
    }
}
