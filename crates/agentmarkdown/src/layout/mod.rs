//! Builds a box tree from parsed HTML.
//!
//! Every element is handed to the [`LayoutPlugin`] registered for its tag
//! name. Elements without a plugin fall back to a generic generator chosen by
//! their default [`CssDisplay`]. Text nodes are white-space normalized and
//! become inline boxes; decoded markup characters are escaped again outside
//! `<pre>`.

mod blockquote;
mod context;
mod defaults;
mod display;
mod image;
mod plugin;

use indexmap::IndexMap;

use agentmarkdown_core::{normalize_whitespace, BoxType, CssBox, WhitespaceHandling};

use crate::entities::escape_html_text;
use crate::node::{HtmlNode, NodeType};
use crate::{Error, Result};

pub use blockquote::{insert_blockquote_prefixes, BlockquoteGenerator};
pub use context::{LayoutContext, ListType, StateStack};
pub use defaults::default_plugins;
pub use display::{element_display, CssDisplay};
pub use image::{ImageGenerator, ImageReference};
pub use plugin::{BoxTransform, GeneratorError, GeneratorResult, LayoutGenerator, LayoutPlugin};

/// Debug note of the root box.
pub const BODY_NOTE: &str = "body";

/// Debug note of boxes created for text nodes.
pub const TEXT_NOTE: &str = "textNode";

type FallbackGenerator = fn(&mut LayoutContext, &LayoutEngine, &HtmlNode) -> GeneratorResult;

/// Maps element names to plugins and drives generator dispatch.
pub struct LayoutEngine {
    plugins: IndexMap<String, LayoutPlugin>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LayoutEngine {
    /// Create an engine with the built-in plugins, then `plugins` on top.
    ///
    /// A plugin for an element that already has one replaces it.
    pub fn new(plugins: impl IntoIterator<Item = LayoutPlugin>) -> Self {
        let mut engine = Self {
            plugins: IndexMap::new(),
        };
        for plugin in default_plugins().into_iter().chain(plugins) {
            engine.register(plugin);
        }
        engine
    }

    /// Register a plugin, replacing any plugin for the same element.
    pub fn register(&mut self, plugin: LayoutPlugin) {
        self.plugins
            .insert(plugin.element_name().to_string(), plugin);
    }

    /// The plugin for a lowercase element name, if any.
    pub fn plugin(&self, element_name: &str) -> Option<&LayoutPlugin> {
        self.plugins.get(element_name)
    }

    /// Lay out a document with a fresh default context.
    pub fn layout(&self, nodes: &[HtmlNode]) -> Result<CssBox> {
        self.layout_document(&mut LayoutContext::default(), nodes)
    }

    /// Lay out top-level nodes under a block root box.
    pub fn layout_document(&self, context: &mut LayoutContext, nodes: &[HtmlNode]) -> Result<CssBox> {
        let children = self.layout_children(context, nodes)?;
        Ok(CssBox::new(BoxType::Block, "", children, BODY_NOTE))
    }

    /// Lay out a list of sibling nodes, dropping those that produce no box.
    pub fn layout_children(
        &self,
        context: &mut LayoutContext,
        nodes: &[HtmlNode],
    ) -> Result<Vec<CssBox>> {
        let mut boxes = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(b) = self.layout_node(context, node)? {
                boxes.push(b);
            }
        }
        Ok(boxes)
    }

    /// Lay out a single node.
    pub fn layout_node(&self, context: &mut LayoutContext, node: &HtmlNode) -> Result<Option<CssBox>> {
        match node.node_type {
            NodeType::Text => {
                let data = node.data.as_deref().unwrap_or_default();
                let handling = context.whitespace_handling();
                let mut text = normalize_whitespace(data, handling);
                if text.is_empty() {
                    return Ok(None);
                }
                if context.entities_decoded() && handling != WhitespaceHandling::Pre {
                    text = escape_html_text(&text);
                }
                Ok(Some(CssBox::new(BoxType::Inline, text, Vec::new(), TEXT_NOTE)))
            }
            NodeType::Element => self.layout_element(context, node),
            other => {
                log::debug!("skipping {other:?} node");
                Ok(None)
            }
        }
    }

    fn layout_element(&self, context: &mut LayoutContext, element: &HtmlNode) -> Result<Option<CssBox>> {
        let tag = element.tag_name();
        let layout_error = |generator: &str, source: GeneratorError| Error::Layout {
            element: tag.to_string(),
            generator: generator.to_string(),
            source,
        };

        if let Some(plugin) = self.plugins.get(tag) {
            log::trace!("<{tag}> -> {}", plugin.generator_name());
            return plugin
                .layout(context, self, element)
                .map_err(|source| layout_error(plugin.generator_name(), source));
        }

        let (generator_name, generator): (&str, FallbackGenerator) = match element_display(tag) {
            CssDisplay::Block => ("genericBlock", defaults::generic_block),
            CssDisplay::Inline => ("genericInline", defaults::generic_inline),
            CssDisplay::ListItem => ("listItem", defaults::list_item),
            CssDisplay::None => ("noOp", defaults::no_op),
        };
        log::trace!("<{tag}> -> {generator_name}");
        generator(context, self, element).map_err(|source| layout_error(generator_name, source))
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}
