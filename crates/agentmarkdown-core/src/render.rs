//! Box tree serialization
//!
//! Walks a finished box tree depth first and writes its text, inserting the
//! newlines that block boxes and collapsed vertical margins call for.

use crate::css_box::{ChildBox, CssBox, BLOCKQUOTE_NOTE};

/// Continuation prefix written after a margin newline inside a blockquote.
const BLOCKQUOTE_PREFIX: &str = "> ";

/// Serialize a box tree to text.
///
/// The root is treated as the only member of its sibling list. Rendering is
/// a pure function of the tree.
pub fn render(root: &CssBox) -> String {
    let mut state = RenderState {
        output: String::with_capacity(4096),
        ..RenderState::default()
    };
    state.render_boxes(&[ChildBox::Box(root)]);
    state.output
}

/// State shared by the whole walk, not per branch, so margins and blockquote
/// depth carry across subtree boundaries.
#[derive(Default)]
struct RenderState {
    output: String,
    active_blockquote_count: usize,
    pending_bottom_margin: bool,
}

impl RenderState {
    fn render_boxes(&mut self, boxes: &[ChildBox<'_>]) {
        for (index, b) in boxes.iter().enumerate() {
            let is_first_sibling = index == 0;
            self.before_box(b, is_first_sibling);
            self.render_box(b, is_first_sibling);
            self.after_box(b);
        }
    }

    fn before_box(&mut self, b: &ChildBox<'_>, is_first_sibling: bool) {
        // Adjoining top and bottom margins collapse into a single newline.
        if (b.top_margin() && !is_first_sibling) || self.pending_bottom_margin {
            self.output.push('\n');
            self.pending_bottom_margin = false;
            for _ in 0..self.active_blockquote_count {
                self.output.push_str(BLOCKQUOTE_PREFIX);
            }
        }
    }

    fn render_box(&mut self, b: &ChildBox<'_>, is_first_sibling: bool) {
        if b.is_block() && !is_first_sibling {
            self.output.push('\n');
        }
        self.output.push_str(b.text_content());

        let is_blockquote = b.debug_note() == BLOCKQUOTE_NOTE;
        if is_blockquote {
            self.active_blockquote_count += 1;
        }
        let children = b.children();
        if !children.is_empty() {
            self.render_boxes(&children);
        }
        if is_blockquote {
            self.active_blockquote_count -= 1;
        }
    }

    fn after_box(&mut self, b: &ChildBox<'_>) {
        if b.bottom_margin() {
            if !b.is_block() {
                log::warn!(
                    "inline box {:?} requested a bottom margin; only block boxes should",
                    b.debug_note()
                );
            }
            self.pending_bottom_margin = true;
        }
    }
}
