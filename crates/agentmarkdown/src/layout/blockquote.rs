//! `<blockquote>` layout.
//!
//! The quote's children are laid out normally, then every line that the
//! renderer will start inside the quote gets a `> ` prefix. Lines started by
//! collapsed margins are prefixed by the renderer itself.

use agentmarkdown_core::{BoxType, ChildRun, CssBox, BLOCKQUOTE_NOTE};

use crate::layout::{GeneratorResult, LayoutContext, LayoutEngine, LayoutGenerator};
use crate::node::HtmlNode;

const PREFIX: &str = "> ";
const PREFIX_NOTE: &str = "blockquote-prefix";

/// Generator for `<blockquote>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockquoteGenerator;

impl LayoutGenerator for BlockquoteGenerator {
    fn generate(
        &self,
        context: &mut LayoutContext,
        engine: &LayoutEngine,
        element: &HtmlNode,
    ) -> GeneratorResult {
        context.begin_blockquote();
        let children = engine.layout_children(context, &element.children);
        context.end_blockquote();

        let mut quote =
            CssBox::new(BoxType::Block, "", children?, BLOCKQUOTE_NOTE).with_margins(true, true);
        insert_blockquote_prefixes(&mut quote);
        Ok(Some(quote))
    }
}

/// Prefix every line started inside `quote` with `> `.
///
/// A line starts at the first box of the quote, at every block box or
/// anonymous block box that is not the first among its siblings, and after
/// every linefeed in text. An empty quote still gets one prefix.
pub fn insert_blockquote_prefixes(quote: &mut CssBox) {
    let mut pending = true;
    prefix_lines(quote, &mut pending);
}

fn prefix_box() -> CssBox {
    CssBox::new(BoxType::Inline, PREFIX, Vec::new(), PREFIX_NOTE)
}

fn prefix_lines(b: &mut CssBox, pending: &mut bool) {
    if !b.text_content().is_empty() {
        let mut text = b.text_content().replace('\n', "\n> ");
        if *pending {
            text.insert_str(0, PREFIX);
            *pending = false;
        }
        b.set_text_content(text);
    }

    if b.stored_children().is_empty() {
        if *pending && b.is_block() {
            b.prepend_child(prefix_box());
            *pending = false;
        }
        return;
    }

    // Indices shift as prefixes are inserted.
    let mut inserted = 0;
    for (position, run) in b.child_runs().into_iter().enumerate() {
        if position > 0 {
            *pending = true;
        }
        match run {
            ChildRun::Block(index) => {
                prefix_lines(&mut b.stored_children_mut()[index + inserted], pending);
            }
            ChildRun::Inline(range) => {
                if *pending {
                    b.insert_child(range.start + inserted, prefix_box());
                    inserted += 1;
                    *pending = false;
                }
                for index in range {
                    prefix_lines(&mut b.stored_children_mut()[index + inserted], pending);
                }
            }
        }
    }
}
