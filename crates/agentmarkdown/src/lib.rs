//! # agentmarkdown
//!
//! Convert HTML to Markdown by laying it out the way a browser would.
//!
//! Instead of mapping tags straight to Markdown text, the HTML tree is first
//! turned into a tree of CSS boxes (block and inline boxes with vertical
//! margins, following the CSS 2.2 visual formatting model). The box tree is
//! then rendered to text, so line breaks and blank lines come from the same
//! rules a browser uses to place content.
//!
//! ## Example
//!
//! ```rust
//! use agentmarkdown::AgentMarkdown;
//!
//! let service = AgentMarkdown::new();
//! let output = service
//!     .render("<h1>Hello</h1><ul><li>one</li><li>two</li></ul>")
//!     .unwrap();
//! assert_eq!(output.markdown, "# Hello #\n\n* one\n* two");
//! ```
//!
//! ## Custom elements
//!
//! A [`LayoutPlugin`] adds a generator for an element, or replaces the
//! built-in one:
//!
//! ```rust
//! use agentmarkdown::{AgentMarkdown, BoxType, CssBox, HtmlNode, LayoutContext, LayoutEngine, LayoutPlugin};
//!
//! let mut service = AgentMarkdown::new();
//! service.add_plugin(LayoutPlugin::new(
//!     "kbd",
//!     |context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode| {
//!         let mut children = engine.layout_children(context, &element.children)?;
//!         children.insert(0, CssBox::inline("<kbd>"));
//!         children.push(CssBox::inline("</kbd>"));
//!         Ok(Some(CssBox::new(BoxType::Inline, "", children, "kbd")))
//!     },
//! ));
//! let output = service.render("Press <kbd>Enter</kbd>").unwrap();
//! assert_eq!(output.markdown, "Press <kbd>Enter</kbd>");
//! ```

pub mod entities;
#[cfg(feature = "html")]
pub mod html;
pub mod layout;
pub mod node;
mod options;
mod service;

pub use agentmarkdown_core::{BoxType, CssBox, WhitespaceHandling};
#[cfg(feature = "html")]
pub use html::{parse_html, ScraperParser};
pub use layout::{
    GeneratorError, GeneratorResult, ImageReference, LayoutContext, LayoutEngine,
    LayoutGenerator, LayoutPlugin, ListType,
};
pub use node::{HtmlNode, HtmlParser, NodeType};
pub use options::LayoutOptions;
#[allow(deprecated)]
pub use service::{produce, render, AgentMarkdown, RenderOptions, RenderOutput};

/// Error type for agentmarkdown operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("layout generator `{generator}` failed for <{element}>: {source}")]
    Layout {
        element: String,
        generator: String,
        #[source]
        source: GeneratorError,
    },

    #[error("Generator error: {0}")]
    Generator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
