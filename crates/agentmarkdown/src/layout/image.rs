//! `<img>` layout.

use agentmarkdown_core::{BoxType, CssBox};

use crate::layout::{GeneratorResult, LayoutContext, LayoutEngine, LayoutGenerator};
use crate::node::HtmlNode;

/// An image found during layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub src: String,
    pub alt: String,
    pub title: Option<String>,
}

/// Generator for `<img>`: writes `![alt](src "title")` and records the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageGenerator;

impl LayoutGenerator for ImageGenerator {
    fn generate(
        &self,
        context: &mut LayoutContext,
        _engine: &LayoutEngine,
        element: &HtmlNode,
    ) -> GeneratorResult {
        let image = ImageReference {
            src: element.attr("src").unwrap_or_default().to_string(),
            alt: element.attr("alt").unwrap_or_default().to_string(),
            title: element
                .attr("title")
                .filter(|title| !title.is_empty())
                .map(str::to_string),
        };

        let text = match &image.title {
            Some(title) => format!("![{}]({} \"{}\")", image.alt, image.src, title),
            None => format!("![{}]({})", image.alt, image.src),
        };
        context.add_image(image);
        Ok(Some(CssBox::new(BoxType::Inline, text, Vec::new(), "img")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(element: &HtmlNode) -> (String, LayoutContext) {
        let mut context = LayoutContext::default();
        let b = ImageGenerator
            .generate(&mut context, &LayoutEngine::default(), element)
            .unwrap()
            .unwrap();
        (b.text_content().to_string(), context)
    }

    #[test]
    fn test_image() {
        let img = HtmlNode::element_with_attrs("img", vec![("src", "cat.png"), ("alt", "A cat")]);
        let (text, context) = generate(&img);
        assert_eq!(text, "![A cat](cat.png)");
        assert_eq!(
            context.images(),
            &[ImageReference {
                src: "cat.png".to_string(),
                alt: "A cat".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn test_image_with_title() {
        let img = HtmlNode::element_with_attrs(
            "img",
            vec![("src", "cat.png"), ("alt", "cat"), ("title", "Tom")],
        );
        let (text, context) = generate(&img);
        assert_eq!(text, "![cat](cat.png \"Tom\")");
        assert_eq!(context.images()[0].title.as_deref(), Some("Tom"));
    }

    #[test]
    fn test_image_without_attributes() {
        let (text, _) = generate(&HtmlNode::element("img"));
        assert_eq!(text, "![]()");
    }
}
