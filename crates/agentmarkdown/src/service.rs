//! The conversion facade.

use agentmarkdown_core::CssBox;

use crate::layout::{ImageReference, LayoutContext, LayoutEngine, LayoutPlugin};
use crate::node::{HtmlNode, HtmlParser};
use crate::options::LayoutOptions;
use crate::Result;

/// Input of [`render`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// The HTML to convert.
    pub html: String,
    /// Plugins that add or replace element generators.
    pub layout_plugins: Vec<LayoutPlugin>,
    /// Syntax choices for the built-in generators.
    pub layout_options: LayoutOptions,
}

/// The result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub markdown: String,
    /// Every image in the document, in document order.
    pub images: Vec<ImageReference>,
}

/// Converts HTML to Markdown.
///
/// Holds the parser, the plugin table and the options. Every call to
/// [`AgentMarkdown::render`] gets its own layout state, so one service can
/// be reused for any number of conversions.
pub struct AgentMarkdown {
    options: LayoutOptions,
    engine: LayoutEngine,
    parser: Box<dyn HtmlParser>,
}

impl AgentMarkdown {
    /// Create a service with the built-in generators and default options
    pub fn new() -> Self {
        Self::with_options(LayoutOptions::default())
    }

    /// Create a service with custom options
    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            engine: LayoutEngine::default(),
            parser: default_parser(),
        }
    }

    /// Replace the HTML parser.
    pub fn with_parser(mut self, parser: impl HtmlParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Add a plugin, replacing any generator for the same element
    pub fn add_plugin(&mut self, plugin: LayoutPlugin) -> &mut Self {
        self.engine.register(plugin);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut LayoutOptions {
        &mut self.options
    }

    /// Convert an HTML string to Markdown.
    pub fn render(&self, html: &str) -> Result<RenderOutput> {
        let nodes = self.parser.parse(html)?;
        self.convert(&nodes, self.parser.decodes_entities())
    }

    /// Convert already parsed nodes to Markdown.
    ///
    /// Text in `nodes` is taken as written in HTML source, with character
    /// references not yet decoded.
    pub fn render_nodes(&self, nodes: &[HtmlNode]) -> Result<RenderOutput> {
        self.convert(nodes, false)
    }

    fn convert(&self, nodes: &[HtmlNode], entities_decoded: bool) -> Result<RenderOutput> {
        let mut context =
            LayoutContext::new(self.options.clone()).with_entities_decoded(entities_decoded);
        let root = self.layout(&mut context, nodes)?;
        let markdown = post_process(&agentmarkdown_core::render(&root));
        Ok(RenderOutput {
            markdown,
            images: context.into_images(),
        })
    }

    /// Build the box tree for `nodes` without rendering it.
    pub fn layout(&self, context: &mut LayoutContext, nodes: &[HtmlNode]) -> Result<CssBox> {
        let root = self.engine.layout_document(context, nodes)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("box tree:\n{}", root.trace_tree());
        }
        Ok(root)
    }
}

impl Default for AgentMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AgentMarkdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentMarkdown")
            .field("options", &self.options)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Render `options.html` to Markdown.
///
/// # Example
///
/// ```rust
/// use agentmarkdown::{render, RenderOptions};
///
/// let output = render(RenderOptions {
///     html: "<h1>Title</h1><p>Some <b>bold</b> text</p>".to_string(),
///     ..RenderOptions::default()
/// })
/// .unwrap();
/// assert_eq!(output.markdown, "# Title #\n\nSome **bold** text");
/// ```
pub fn render(options: RenderOptions) -> Result<RenderOutput> {
    let mut service = AgentMarkdown::with_options(options.layout_options);
    for plugin in options.layout_plugins {
        service.add_plugin(plugin);
    }
    service.render(&options.html)
}

/// Render `html` with default options and return only the Markdown.
#[deprecated(note = "use `render` instead")]
pub fn produce(html: &str) -> Result<String> {
    AgentMarkdown::new().render(html).map(|output| output.markdown)
}

// Margins at the very start or end of the document have nothing to separate.
fn post_process(output: &str) -> String {
    output.trim_matches('\n').to_string()
}

#[cfg(feature = "html")]
fn default_parser() -> Box<dyn HtmlParser> {
    Box::new(crate::html::ScraperParser)
}

#[cfg(not(feature = "html"))]
fn default_parser() -> Box<dyn HtmlParser> {
    Box::new(MissingParser)
}

#[cfg(not(feature = "html"))]
struct MissingParser;

#[cfg(not(feature = "html"))]
impl HtmlParser for MissingParser {
    fn parse(&self, _html: &str) -> Result<Vec<HtmlNode>> {
        Err(crate::Error::Parse(
            "no HTML parser available; enable the `html` feature or call `with_parser`".to_string(),
        ))
    }
}
