//! agentmarkdown-core - CSS box tree and Markdown rendering
//!
//! This crate holds the parts of the conversion pipeline that know nothing
//! about HTML: the box tree modeled on the CSS 2.2 visual formatting model,
//! the `white-space` processing rules, and the renderer that serializes a box
//! tree into Markdown text. It is used by the `agentmarkdown` crate, which
//! builds the box tree from HTML.
//!
//! # Architecture
//!
//! ```text
//! HTML tree ──layout──▶ ┌──────────┐
//!                       │ Box tree │ ──render──▶ Markdown String
//!                       └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use agentmarkdown_core::{render, BoxType, CssBox};
//!
//! let mut heading = CssBox::new(BoxType::Block, "", Vec::new(), "h1");
//! heading.add_child(CssBox::inline("# "));
//! heading.add_child(CssBox::inline("Hello World"));
//! heading.add_child(CssBox::inline(" #"));
//!
//! let mut body = CssBox::new(BoxType::Block, "", Vec::new(), "body");
//! body.add_child(heading);
//!
//! assert_eq!(render(&body), "# Hello World #");
//! ```

mod css_box;
mod render;
mod whitespace;

pub use css_box::{BoxType, ChildBox, ChildRun, CssBox, ANONYMOUS_NOTE, BLOCKQUOTE_NOTE};
pub use render::render;
pub use whitespace::{normalize_whitespace, WhitespaceHandling};
