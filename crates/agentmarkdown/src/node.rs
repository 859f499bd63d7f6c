//! Parsed HTML node structure.
//!
//! The layout engine only ever sees this structure. Any parser (html5ever,
//! a streaming tokenizer, a hand-built tree in a test) can convert its output
//! to `HtmlNode` and implement [`HtmlParser`] to plug into the pipeline.

use indexmap::IndexMap;

use crate::Result;

/// The kind of a parsed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// A tag such as `<p>` or `<a>`.
    Element,
    /// Character data.
    Text,
    /// `<!-- ... -->`
    Comment,
    /// `<![CDATA[ ... ]]>`
    CData,
    /// A processing instruction or other `<! ... >` / `<? ... ?>` directive.
    Directive,
    /// A `<script>` element. Never laid out.
    Script,
    /// A `<style>` element. Never laid out.
    Style,
    /// `<!DOCTYPE ...>`
    Doctype,
}

/// A node in a parsed HTML tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlNode {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// Lowercase tag name for elements, scripts and styles; empty otherwise.
    pub name: String,

    /// Text of text, comment and CDATA nodes.
    pub data: Option<String>,

    /// Attributes in source order, keyed by lowercase name.
    pub attributes: IndexMap<String, String>,

    /// Child nodes.
    pub children: Vec<HtmlNode>,
}

impl HtmlNode {
    fn with_type(node_type: NodeType, name: &str, data: Option<String>) -> Self {
        Self {
            node_type,
            name: name.to_lowercase(),
            data,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::with_type(NodeType::Element, tag_name, None)
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_type(NodeType::Text, "", Some(content.to_string()))
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self::with_type(NodeType::Comment, "", Some(content.to_string()))
    }

    /// Create a script or style node; its text goes in a child text node.
    pub fn raw_element(node_type: NodeType, tag_name: &str) -> Self {
        Self::with_type(node_type, tag_name, None)
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &HtmlNode> {
        self.children.iter().filter(|n| n.is_element())
    }

    pub fn add_child(&mut self, child: HtmlNode) {
        self.children.push(child);
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.data.clone().unwrap_or_default(),
            _ => self.children.iter().map(HtmlNode::text_content).collect(),
        }
    }
}

/// Turns an HTML string into a list of top-level nodes.
pub trait HtmlParser: Send + Sync {
    fn parse(&self, html: &str) -> Result<Vec<HtmlNode>>;

    /// Whether text in the parsed tree has its character references already
    /// decoded. Parsers that keep text as written in the source return `false`.
    fn decodes_entities(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = HtmlNode::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_create_text() {
        let node = HtmlNode::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes_are_case_insensitive() {
        let node = HtmlNode::element_with_attrs(
            "a",
            vec![("HREF", "https://example.com"), ("title", "Example")],
        );
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("Title"), Some("Example"));
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_attributes_keep_source_order() {
        let node = HtmlNode::element_with_attrs("img", vec![("src", "a.png"), ("alt", "A")]);
        let names: Vec<&str> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["src", "alt"]);
    }

    #[test]
    fn test_children() {
        let mut parent = HtmlNode::element("div");
        parent.add_child(HtmlNode::text("Hello"));
        parent.add_child(HtmlNode::element("span"));
        parent.add_child(HtmlNode::comment("note"));

        assert_eq!(parent.children.len(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let mut div = HtmlNode::element("div");
        div.add_child(HtmlNode::text("Hello "));
        let mut span = HtmlNode::element("span");
        span.add_child(HtmlNode::text("World"));
        div.add_child(span);

        assert_eq!(div.text_content(), "Hello World");
    }
}
