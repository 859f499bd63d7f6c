//! Default `display` values of HTML elements.
//!
//! Follows the CSS 2.2 default style sheet for HTML 4
//! (<https://www.w3.org/TR/CSS22/sample.html>) plus the HTML5 sectioning
//! elements, which browsers also render as blocks.

/// The subset of the CSS `display` property the layout engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssDisplay {
    Block,
    Inline,
    ListItem,
    /// Generates no box at all.
    None,
}

/// Elements displayed as blocks by default.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "dir", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "html", "main", "menu", "nav", "noframes", "ol", "p",
    "pre", "section", "ul",
];

/// Elements that generate no box.
pub const HIDDEN_ELEMENTS: &[&str] = &["head", "template"];

/// Default display of the element with the given lowercase tag name.
///
/// Anything not listed is inline.
pub fn element_display(tag: &str) -> CssDisplay {
    if tag == "li" {
        CssDisplay::ListItem
    } else if BLOCK_ELEMENTS.contains(&tag) {
        CssDisplay::Block
    } else if HIDDEN_ELEMENTS.contains(&tag) {
        CssDisplay::None
    } else {
        CssDisplay::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_display() {
        assert_eq!(element_display("div"), CssDisplay::Block);
        assert_eq!(element_display("h3"), CssDisplay::Block);
        assert_eq!(element_display("li"), CssDisplay::ListItem);
        assert_eq!(element_display("head"), CssDisplay::None);
        assert_eq!(element_display("span"), CssDisplay::Inline);
        assert_eq!(element_display("custom-element"), CssDisplay::Inline);
    }
}
