//! Built-in layout generators.
//!
//! Each generator produces the boxes for one kind of element and writes the
//! Markdown syntax for it as text of inline or block boxes around the boxes
//! of the element's children.

use std::sync::Arc;

use agentmarkdown_core::{BoxType, CssBox, WhitespaceHandling};

use crate::entities::decode_html_entities;
use crate::layout::blockquote::BlockquoteGenerator;
use crate::layout::image::ImageGenerator;
use crate::layout::{GeneratorResult, LayoutContext, LayoutEngine, LayoutPlugin, ListType};
use crate::node::HtmlNode;
use crate::options::LayoutOptions;
use crate::Error;

/// The built-in plugins, in registration order.
pub fn default_plugins() -> Vec<LayoutPlugin> {
    let mut plugins = vec![
        LayoutPlugin::new("p", paragraph).named("paragraph"),
        LayoutPlugin::new("br", line_break).named("lineBreak"),
        LayoutPlugin::new("hr", thematic_break).named("thematicBreak"),
        LayoutPlugin::new("a", link).named("link"),
        LayoutPlugin::new("pre", preformatted).named("preformatted"),
        LayoutPlugin::new("code", code).named("code"),
        LayoutPlugin::from_generator("blockquote", Arc::new(BlockquoteGenerator))
            .named("blockquote"),
        LayoutPlugin::from_generator("img", Arc::new(ImageGenerator)).named("image"),
    ];
    for level in 1..=6 {
        plugins.push(LayoutPlugin::new(&format!("h{level}"), heading(level)).named("heading"));
    }
    plugins.extend(LayoutPlugin::for_elements(&["ul", "ol"], "list", Arc::new(list)));
    plugins.extend(LayoutPlugin::for_elements(
        &["b", "strong"],
        "strong",
        Arc::new(emphasis(Delimiter::Strong)),
    ));
    plugins.extend(LayoutPlugin::for_elements(
        &["i", "em"],
        "emphasis",
        Arc::new(emphasis(Delimiter::Emphasis)),
    ));
    plugins.push(LayoutPlugin::new("u", emphasis(Delimiter::Literal("_"))).named("underline"));
    plugins.extend(LayoutPlugin::for_elements(
        &["del", "s", "strike"],
        "strikethrough",
        Arc::new(emphasis(Delimiter::Literal("~"))),
    ));
    plugins
}

fn children_of(
    context: &mut LayoutContext,
    engine: &LayoutEngine,
    element: &HtmlNode,
) -> crate::Result<Vec<CssBox>> {
    engine.layout_children(context, &element.children)
}

/// Block box for elements without a dedicated generator.
pub(crate) fn generic_block(
    context: &mut LayoutContext,
    engine: &LayoutEngine,
    element: &HtmlNode,
) -> GeneratorResult {
    let children = children_of(context, engine, element)?;
    Ok(Some(CssBox::new(BoxType::Block, "", children, "genericBlock")))
}

/// Inline box for elements without a dedicated generator.
pub(crate) fn generic_inline(
    context: &mut LayoutContext,
    engine: &LayoutEngine,
    element: &HtmlNode,
) -> GeneratorResult {
    let children = children_of(context, engine, element)?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(CssBox::new(BoxType::Inline, "", children, "genericInline")))
}

/// Elements with `display: none`.
pub(crate) fn no_op(
    _context: &mut LayoutContext,
    _engine: &LayoutEngine,
    _element: &HtmlNode,
) -> GeneratorResult {
    Ok(None)
}

fn paragraph(context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode) -> GeneratorResult {
    let children = children_of(context, engine, element)?;
    let b = CssBox::new(BoxType::Block, "", children, "p").with_margins(true, true);
    Ok(Some(b))
}

fn heading(
    level: usize,
) -> impl Fn(&mut LayoutContext, &LayoutEngine, &HtmlNode) -> GeneratorResult + Send + Sync + 'static {
    move |context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode| {
        let hashes = "#".repeat(level);
        let mut children = Vec::with_capacity(element.children.len() + 2);
        children.push(CssBox::inline(format!("{hashes} ")));
        children.extend(children_of(context, engine, element)?);
        children.push(CssBox::inline(format!(" {hashes}")));
        Ok(Some(CssBox::new(BoxType::Block, "", children, format!("h{level}"))))
    }
}

#[derive(Debug, Clone, Copy)]
enum Delimiter {
    /// `LayoutOptions::strong_delimiter`
    Strong,
    /// `LayoutOptions::em_delimiter`
    Emphasis,
    Literal(&'static str),
}

impl Delimiter {
    fn resolve(self, options: &LayoutOptions) -> String {
        match self {
            Delimiter::Strong => options.strong_delimiter.clone(),
            Delimiter::Emphasis => options.em_delimiter.to_string(),
            Delimiter::Literal(text) => text.to_string(),
        }
    }
}

fn emphasis(
    delimiter: Delimiter,
) -> impl Fn(&mut LayoutContext, &LayoutEngine, &HtmlNode) -> GeneratorResult + Send + Sync + 'static {
    move |context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode| {
        let delimiter = delimiter.resolve(context.options());
        let mut children = Vec::with_capacity(element.children.len() + 2);
        children.push(CssBox::inline(delimiter.clone()));
        children.extend(children_of(context, engine, element)?);
        children.push(CssBox::inline(delimiter));
        Ok(Some(CssBox::new(BoxType::Inline, "", children, "emphasis")))
    }
}

fn link(context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode) -> GeneratorResult {
    let href = element.attr("href").unwrap_or_default();
    let title = element.attr("title").filter(|title| !title.is_empty());
    let destination = match title {
        Some(title) if href.is_empty() => format!("(\"{title}\")"),
        Some(title) => format!("({href} \"{title}\")"),
        None => format!("({href})"),
    };

    let mut children = Vec::with_capacity(element.children.len() + 3);
    children.push(CssBox::inline("["));
    children.extend(children_of(context, engine, element)?);
    children.push(CssBox::inline("]"));
    children.push(CssBox::inline(destination));
    Ok(Some(CssBox::new(BoxType::Inline, "", children, "link")))
}

fn line_break(_context: &mut LayoutContext, _engine: &LayoutEngine, _element: &HtmlNode) -> GeneratorResult {
    Ok(Some(CssBox::new(BoxType::Inline, "\n", Vec::new(), "br")))
}

fn thematic_break(context: &mut LayoutContext, _engine: &LayoutEngine, _element: &HtmlNode) -> GeneratorResult {
    let hr = context.options().hr.clone();
    // A dash rule directly under a line of text reads as a setext heading.
    let separated = hr.starts_with('-');
    let b = CssBox::new(BoxType::Block, hr, Vec::new(), "hr").with_margins(separated, separated);
    Ok(Some(b))
}

fn list(context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode) -> GeneratorResult {
    let list_type = ListType::from_tag(element.tag_name()).ok_or_else(|| {
        Error::Generator(format!("unexpected list element <{}>", element.tag_name()))
    })?;

    context.begin_list(list_type);
    let outermost = context.list_nesting_depth() == 1;
    let children = children_of(context, engine, element);
    context.end_list();

    // Nested lists sit directly under their parent item, so only the
    // outermost list is separated from its surroundings.
    let b = CssBox::new(BoxType::Block, "", children?, element.tag_name())
        .with_margins(outermost, outermost);
    Ok(Some(b))
}

/// `<li>`, and any element with `display: list-item`.
pub(crate) fn list_item(
    context: &mut LayoutContext,
    engine: &LayoutEngine,
    element: &HtmlNode,
) -> GeneratorResult {
    let options = context.options();
    let bullet = options.bullet_list_marker;
    let indent = " ".repeat(options.list_indent * context.list_nesting_depth().saturating_sub(1));

    let marker = match (context.list_type(), context.new_list_item()) {
        (Some(ListType::Ordered), Some(number)) => format!("{indent}{number}. "),
        (Some(ListType::Unordered), _) => format!("{indent}{bullet} "),
        _ => {
            log::warn!("<{}> outside of any list", element.tag_name());
            format!("{bullet} ")
        }
    };

    let content = CssBox::new(
        BoxType::Inline,
        "",
        children_of(context, engine, element)?,
        "li-content",
    );
    let marker = CssBox::new(BoxType::Inline, marker, Vec::new(), "li-marker");
    Ok(Some(CssBox::new(
        BoxType::Block,
        "",
        vec![marker, content],
        "li-principal",
    )))
}

fn preformatted(context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode) -> GeneratorResult {
    context.push_whitespace_handling(WhitespaceHandling::Pre);
    let children = children_of(context, engine, element);
    context.pop_whitespace_handling();
    let mut children = children?;

    if !context.entities_decoded() {
        for child in &mut children {
            decode_entities_in_tree(child);
        }
    }

    let fence = context.options().fence.clone();
    children.insert(0, CssBox::block(fence.clone()));
    children.push(CssBox::block(fence));
    Ok(Some(CssBox::new(BoxType::Block, "", children, "pre")))
}

fn decode_entities_in_tree(b: &mut CssBox) {
    if b.text_content().contains('&') {
        let decoded = decode_html_entities(b.text_content());
        b.set_text_content(decoded);
    }
    for child in b.stored_children_mut() {
        decode_entities_in_tree(child);
    }
}

fn code(context: &mut LayoutContext, engine: &LayoutEngine, element: &HtmlNode) -> GeneratorResult {
    let mut children = children_of(context, engine, element)?;
    // Inside <pre> the fence already marks the code.
    if context.whitespace_handling() != WhitespaceHandling::Pre {
        children.insert(0, CssBox::inline("`"));
        children.push(CssBox::inline("`"));
    }
    Ok(Some(CssBox::new(BoxType::Inline, "", children, "code")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentmarkdown_core::render;

    fn el(tag: &str, children: Vec<HtmlNode>) -> HtmlNode {
        let mut node = HtmlNode::element(tag);
        for child in children {
            node.add_child(child);
        }
        node
    }

    fn text(content: &str) -> HtmlNode {
        HtmlNode::text(content)
    }

    fn render_nodes(nodes: &[HtmlNode]) -> String {
        let root = LayoutEngine::default().layout(nodes).unwrap();
        render(&root)
    }

    #[test]
    fn test_headings() {
        let nodes = vec![el("h1", vec![text("foo")]), el("h2", vec![text("foo")])];
        assert_eq!(render_nodes(&nodes), "# foo #\n## foo ##");
    }

    #[test]
    fn test_emphasis_chain() {
        let nodes = vec![
            el("b", vec![text("bold")]),
            text(" "),
            el("em", vec![text("em")]),
            text(" "),
            el("u", vec![text("u")]),
            text(" "),
            el("del", vec![text("gone")]),
        ];
        assert_eq!(render_nodes(&nodes), "**bold** *em* _u_ ~gone~");
    }

    #[test]
    fn test_link_variants() {
        let plain = HtmlNode::element_with_attrs("a", vec![("href", "https://x.org")]);
        let titled =
            HtmlNode::element_with_attrs("a", vec![("href", "https://x.org"), ("title", "X")]);
        let empty = HtmlNode::element("a");
        let title_only = HtmlNode::element_with_attrs("a", vec![("title", "X")]);

        let mut nodes = Vec::new();
        for mut a in [plain, titled, empty, title_only] {
            a.add_child(text("x"));
            nodes.push(el("p", vec![a]));
        }
        assert_eq!(
            render_nodes(&nodes),
            "[x](https://x.org)\n\n[x](https://x.org \"X\")\n\n[x]()\n\n[x](\"X\")"
        );
    }

    #[test]
    fn test_line_break() {
        let nodes = vec![el("p", vec![text("a"), HtmlNode::element("br"), text("b")])];
        assert_eq!(render_nodes(&nodes), "a\nb");
    }

    #[test]
    fn test_thematic_break() {
        let nodes = vec![
            el("p", vec![text("a")]),
            HtmlNode::element("hr"),
            el("p", vec![text("b")]),
        ];
        assert_eq!(render_nodes(&nodes), "a\n\n* * *\n\nb");
    }

    #[test]
    fn test_dash_thematic_break_is_separated_from_text() {
        let options = LayoutOptions {
            hr: "---".to_string(),
            ..LayoutOptions::default()
        };
        let nodes = vec![text("text"), HtmlNode::element("hr"), text("more")];
        let mut context = LayoutContext::new(options);
        let root = LayoutEngine::default().layout_document(&mut context, &nodes).unwrap();
        assert_eq!(render(&root), "text\n\n---\n\nmore");
    }

    #[test]
    fn test_unordered_list() {
        let nodes = vec![el(
            "ul",
            vec![el("li", vec![text("one")]), el("li", vec![text("two")])],
        )];
        assert_eq!(render_nodes(&nodes), "* one\n* two");
    }

    #[test]
    fn test_ordered_list() {
        let nodes = vec![el(
            "ol",
            vec![el("li", vec![text("one")]), el("li", vec![text("two")])],
        )];
        assert_eq!(render_nodes(&nodes), "1. one\n2. two");
    }

    #[test]
    fn test_nested_list_is_indented() {
        let inner = el("ol", vec![el("li", vec![text("a")]), el("li", vec![text("b")])]);
        let nodes = vec![el(
            "ul",
            vec![el("li", vec![text("outer "), inner]), el("li", vec![text("next")])],
        )];
        assert_eq!(render_nodes(&nodes), "* outer \n  1. a\n  2. b\n* next");
    }

    #[test]
    fn test_list_separated_from_paragraphs() {
        let nodes = vec![
            el("p", vec![text("before")]),
            el("ul", vec![el("li", vec![text("item")])]),
            el("p", vec![text("after")]),
        ];
        assert_eq!(render_nodes(&nodes), "before\n\n* item\n\nafter");
    }

    #[test]
    fn test_list_item_outside_list() {
        let nodes = vec![el("li", vec![text("stray")])];
        assert_eq!(render_nodes(&nodes), "* stray");
    }

    #[test]
    fn test_preformatted() {
        let nodes = vec![el("pre", vec![text("fn main() {\n    x &amp;&amp; y\n}")])];
        assert_eq!(
            render_nodes(&nodes),
            "```\nfn main() {\n    x && y\n}\n```"
        );
    }

    #[test]
    fn test_preformatted_decoded_text_is_not_decoded_again() {
        let nodes = vec![el("pre", vec![text("&lt;div&gt;")])];
        let mut context = LayoutContext::default().with_entities_decoded(true);
        let root = LayoutEngine::default().layout_document(&mut context, &nodes).unwrap();
        assert_eq!(render(&root), "```\n&lt;div&gt;\n```");
    }

    #[test]
    fn test_empty_preformatted() {
        assert_eq!(render_nodes(&[HtmlNode::element("pre")]), "```\n```");
    }

    #[test]
    fn test_code_inside_pre_has_no_backticks() {
        let nodes = vec![el("pre", vec![el("code", vec![text("let x = 1;")])])];
        assert_eq!(render_nodes(&nodes), "```\nlet x = 1;\n```");
    }

    #[test]
    fn test_inline_code() {
        let nodes = vec![el("p", vec![text("run "), el("code", vec![text("ls")])])];
        assert_eq!(render_nodes(&nodes), "run `ls`");
    }

    #[test]
    fn test_generic_inline_without_content() {
        let nodes = vec![HtmlNode::element("span"), text("x")];
        let root = LayoutEngine::default().layout(&nodes).unwrap();
        assert_eq!(root.stored_children().len(), 1);
    }

    #[test]
    fn test_options_change_syntax() {
        let options = LayoutOptions {
            bullet_list_marker: '-',
            strong_delimiter: "__".to_string(),
            ..LayoutOptions::default()
        };
        let mut context = LayoutContext::new(options);
        let nodes = vec![el(
            "ul",
            vec![el("li", vec![el("strong", vec![text("x")])])],
        )];
        let root = LayoutEngine::default()
            .layout_document(&mut context, &nodes)
            .unwrap();
        assert_eq!(render(&root), "- __x__");
    }
}
