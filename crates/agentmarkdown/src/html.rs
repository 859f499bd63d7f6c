//! HTML parsing support.
//!
//! Parses HTML strings with scraper (html5ever) and converts the result to
//! the [`HtmlNode`] structure the layout engine consumes.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{HtmlNode, HtmlParser, NodeType};
use crate::Result;

/// The default [`HtmlParser`], backed by html5ever through scraper.
///
/// Input that starts with a doctype or an `<html>` tag is parsed as a full
/// document and yields the `<html>` element. Anything else is parsed as a
/// body fragment and yields the fragment's top-level nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

impl HtmlParser for ScraperParser {
    fn parse(&self, html: &str) -> Result<Vec<HtmlNode>> {
        if is_document(html) {
            let document = Html::parse_document(html);
            return Ok(vec![scraper_to_node(document.root_element())]);
        }
        let fragment = Html::parse_fragment(html);
        Ok(scraper_to_node(fragment.root_element()).children)
    }

    fn decodes_entities(&self) -> bool {
        true
    }
}

/// Parse an HTML string into a list of top-level nodes.
///
/// # Example
///
/// ```rust
/// use agentmarkdown::parse_html;
///
/// let nodes = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
/// assert_eq!(nodes[0].tag_name(), "h1");
/// ```
pub fn parse_html(html: &str) -> Result<Vec<HtmlNode>> {
    ScraperParser.parse(html)
}

fn is_document(html: &str) -> bool {
    let head: String = html
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Convert a scraper ElementRef to our node structure
fn scraper_to_node(element: ElementRef) -> HtmlNode {
    let tag = element.value().name();
    let mut node = match tag {
        "script" => HtmlNode::raw_element(NodeType::Script, tag),
        "style" => HtmlNode::raw_element(NodeType::Style, tag),
        _ => HtmlNode::element(tag),
    };
    for (name, value) in element.value().attrs() {
        node.set_attr(name, value);
    }

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(HtmlNode::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            ScraperNode::Comment(comment) => {
                node.add_child(HtmlNode::comment(&comment.comment));
            }
            ScraperNode::ProcessingInstruction(instruction) => {
                let mut directive = HtmlNode::comment(&instruction.data);
                directive.node_type = NodeType::Directive;
                node.add_child(directive);
            }
            _ => {}
        }
    }

    node
}
