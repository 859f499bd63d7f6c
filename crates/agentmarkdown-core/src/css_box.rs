//! A simplified CSS box, as described by the CSS 2.2 visual formatting model.
//!
//! See <https://www.w3.org/TR/CSS22/visuren.html#box-gen>. Boxes are created by
//! layout generators and then handed to the renderer. The only structure the
//! renderer needs beyond the stored children is the anonymous block boxes of
//! <https://www.w3.org/TR/CSS22/visuren.html#anonymous-block-level>, which are
//! synthesized on demand by [`CssBox::children`].

use std::cell::Cell;
use std::fmt::Write as _;
use std::ops::Range;

/// Debug note given to anonymous block boxes.
pub const ANONYMOUS_NOTE: &str = "anonymous";

/// Debug note the renderer uses to recognize blockquote boxes.
pub const BLOCKQUOTE_NOTE: &str = "blockquote";

/// The two fundamental box kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxType {
    /// Stacks vertically; always starts on a new line.
    Block,
    /// Flows horizontally within a line.
    Inline,
}

#[derive(Debug, Clone, Copy, Default)]
struct ChildSummary {
    has_block: bool,
    has_inline: bool,
}

/// A box in the intermediate box tree.
///
/// A box exclusively owns its children. Once layout is finished the tree is
/// only read, except for text rewriting done by generators right after they
/// build a subtree.
#[derive(Debug, Clone)]
pub struct CssBox {
    box_type: BoxType,
    text_content: String,
    children: Vec<CssBox>,
    debug_note: String,
    top_margin: bool,
    bottom_margin: bool,
    // Invalidated whenever the stored children change.
    summary: Cell<Option<ChildSummary>>,
}

/// A contiguous group of stored children, as seen by block layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRun {
    /// A single block-level child, by index.
    Block(usize),
    /// A maximal run of adjacent inline children.
    Inline(Range<usize>),
}

/// One item yielded by [`CssBox::children`].
#[derive(Debug, Clone, Copy)]
pub enum ChildBox<'a> {
    /// A stored child, passed through unchanged.
    Box(&'a CssBox),
    /// A synthesized anonymous block box wrapping a run of inline children.
    Anonymous(&'a [CssBox]),
}

impl CssBox {
    /// Create a box.
    pub fn new(
        box_type: BoxType,
        text_content: impl Into<String>,
        children: Vec<CssBox>,
        debug_note: impl Into<String>,
    ) -> Self {
        Self {
            box_type,
            text_content: text_content.into(),
            children,
            debug_note: debug_note.into(),
            top_margin: false,
            bottom_margin: false,
            summary: Cell::new(None),
        }
    }

    /// Create a childless block box holding `text`.
    pub fn block(text_content: impl Into<String>) -> Self {
        Self::new(BoxType::Block, text_content, Vec::new(), "")
    }

    /// Create a childless inline box holding `text`.
    pub fn inline(text_content: impl Into<String>) -> Self {
        Self::new(BoxType::Inline, text_content, Vec::new(), "")
    }

    /// Set the vertical margin flags.
    pub fn with_margins(mut self, top: bool, bottom: bool) -> Self {
        self.top_margin = top;
        self.bottom_margin = bottom;
        self
    }

    /// Replace the debug note.
    pub fn with_debug_note(mut self, debug_note: impl Into<String>) -> Self {
        self.debug_note = debug_note.into();
        self
    }

    pub fn box_type(&self) -> BoxType {
        self.box_type
    }

    pub fn is_block(&self) -> bool {
        self.box_type == BoxType::Block
    }

    pub fn is_inline(&self) -> bool {
        self.box_type == BoxType::Inline
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.text_content = text.into();
    }

    pub fn debug_note(&self) -> &str {
        &self.debug_note
    }

    /// Whether a vertical separator is requested before this box.
    pub fn top_margin(&self) -> bool {
        self.top_margin
    }

    /// Whether a vertical separator is requested after this box.
    pub fn bottom_margin(&self) -> bool {
        self.bottom_margin
    }

    pub fn set_top_margin(&mut self, value: bool) {
        self.top_margin = value;
    }

    pub fn set_bottom_margin(&mut self, value: bool) {
        self.bottom_margin = value;
    }

    /// Append a child.
    pub fn add_child(&mut self, child: CssBox) {
        self.children.push(child);
        self.summary.set(None);
    }

    /// Insert a child before all existing children.
    pub fn prepend_child(&mut self, child: CssBox) {
        self.insert_child(0, child);
    }

    /// Insert a child at `index` among the stored children.
    ///
    /// # Panics
    ///
    /// Panics if `index > stored_children().len()`.
    pub fn insert_child(&mut self, index: usize, child: CssBox) {
        self.children.insert(index, child);
        self.summary.set(None);
    }

    /// The children exactly as they were added, without anonymous boxes.
    pub fn stored_children(&self) -> &[CssBox] {
        &self.children
    }

    /// Mutable access to the stored children.
    ///
    /// Children cannot change their [`BoxType`], so this never invalidates
    /// the cached child summary.
    pub fn stored_children_mut(&mut self) -> &mut [CssBox] {
        &mut self.children
    }

    /// Consume the box and return its stored children.
    pub fn into_children(self) -> Vec<CssBox> {
        self.children
    }

    fn summary(&self) -> ChildSummary {
        if let Some(summary) = self.summary.get() {
            return summary;
        }
        let summary = self
            .children
            .iter()
            .fold(ChildSummary::default(), |acc, child| ChildSummary {
                has_block: acc.has_block || child.is_block(),
                has_inline: acc.has_inline || child.is_inline(),
            });
        self.summary.set(Some(summary));
        summary
    }

    /// True if any stored child is a block box.
    pub fn has_block_children(&self) -> bool {
        self.summary().has_block
    }

    /// True if this box is a block box or has a block child, i.e. lays its
    /// children out vertically.
    pub fn establishes_block_formatting_context(&self) -> bool {
        self.is_block() || self.summary().has_block
    }

    fn needs_anonymous_boxes(&self) -> bool {
        let summary = self.summary();
        summary.has_block && summary.has_inline
    }

    /// Group the stored children the way block layout sees them: each block
    /// child on its own, each maximal run of inline children together.
    pub fn child_runs(&self) -> Vec<ChildRun> {
        let mut runs = Vec::new();
        let mut index = 0;
        let len = self.children.len();
        while index < len {
            if self.children[index].is_block() {
                runs.push(ChildRun::Block(index));
                index += 1;
                continue;
            }
            let start = index;
            while index < len && self.children[index].is_inline() {
                index += 1;
            }
            runs.push(ChildRun::Inline(start..index));
        }
        runs
    }

    /// The children as block layout sees them.
    ///
    /// When the stored children mix block and inline boxes, every maximal run
    /// of inline children is wrapped in one anonymous block box. Otherwise the
    /// stored children are yielded unchanged.
    pub fn children(&self) -> Vec<ChildBox<'_>> {
        if !self.needs_anonymous_boxes() {
            return self.children.iter().map(ChildBox::Box).collect();
        }
        self.child_runs()
            .into_iter()
            .map(|run| match run {
                ChildRun::Block(index) => ChildBox::Box(&self.children[index]),
                ChildRun::Inline(range) => ChildBox::Anonymous(&self.children[range]),
            })
            .collect()
    }

    /// Dump the box tree, one box per line, indented by depth.
    pub fn trace_tree(&self) -> String {
        let mut output = String::new();
        trace_box(ChildBox::Box(self), 0, &mut output);
        output
    }
}

impl<'a> ChildBox<'a> {
    pub fn box_type(&self) -> BoxType {
        match *self {
            ChildBox::Box(b) => b.box_type(),
            ChildBox::Anonymous(_) => BoxType::Block,
        }
    }

    pub fn is_block(&self) -> bool {
        self.box_type() == BoxType::Block
    }

    pub fn text_content(&self) -> &'a str {
        match *self {
            ChildBox::Box(b) => b.text_content(),
            ChildBox::Anonymous(_) => "",
        }
    }

    pub fn debug_note(&self) -> &'a str {
        match *self {
            ChildBox::Box(b) => b.debug_note(),
            ChildBox::Anonymous(_) => ANONYMOUS_NOTE,
        }
    }

    pub fn top_margin(&self) -> bool {
        matches!(*self, ChildBox::Box(b) if b.top_margin())
    }

    pub fn bottom_margin(&self) -> bool {
        matches!(*self, ChildBox::Box(b) if b.bottom_margin())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(*self, ChildBox::Anonymous(_))
    }

    /// Children of this box, with anonymous boxes synthesized as needed.
    pub fn children(&self) -> Vec<ChildBox<'a>> {
        match *self {
            ChildBox::Box(b) => b.children(),
            // A run only ever holds inline boxes, so nothing to wrap.
            ChildBox::Anonymous(run) => run.iter().map(ChildBox::Box).collect(),
        }
    }
}

fn trace_box(b: ChildBox<'_>, indent: usize, output: &mut String) {
    let kind = match b.box_type() {
        BoxType::Block => "block",
        BoxType::Inline => "inline",
    };
    let _ = writeln!(
        output,
        "{}CssBox {{ type: {}, text: {:?}, debug: {:?} }}",
        "  ".repeat(indent),
        kind,
        b.text_content(),
        b.debug_note()
    );
    for child in b.children() {
        trace_box(child, indent + 1, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(child: &ChildBox<'_>) -> String {
        let mut text = child.text_content().to_string();
        for grandchild in child.children() {
            text.push_str(&text_of(&grandchild));
        }
        text
    }

    #[test]
    fn test_uniform_inline_children_pass_through() {
        let mut parent = CssBox::block("");
        parent.add_child(CssBox::inline("a"));
        parent.add_child(CssBox::inline("b"));

        let children = parent.children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| !c.is_anonymous()));
        for (yielded, stored) in children.iter().zip(parent.stored_children()) {
            match yielded {
                ChildBox::Box(b) => assert!(std::ptr::eq(*b, stored)),
                ChildBox::Anonymous(_) => panic!("unexpected anonymous box"),
            }
        }
    }

    #[test]
    fn test_uniform_block_children_pass_through() {
        let mut parent = CssBox::block("");
        parent.add_child(CssBox::block("a"));
        parent.add_child(CssBox::block("b"));

        let children = parent.children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| !c.is_anonymous()));
    }

    #[test]
    fn test_mixed_children_wrap_inline_runs() {
        let mut parent = CssBox::block("");
        parent.add_child(CssBox::inline("a"));
        parent.add_child(CssBox::inline("b"));
        parent.add_child(CssBox::block("c"));
        parent.add_child(CssBox::inline("d"));
        parent.add_child(CssBox::block("e"));
        parent.add_child(CssBox::block("f"));
        parent.add_child(CssBox::inline("g"));

        let children = parent.children();
        let shape: Vec<(bool, String)> = children
            .iter()
            .map(|c| (c.is_anonymous(), text_of(c)))
            .collect();
        assert_eq!(
            shape,
            vec![
                (true, "ab".to_string()),
                (false, "c".to_string()),
                (true, "d".to_string()),
                (false, "e".to_string()),
                (false, "f".to_string()),
                (true, "g".to_string()),
            ]
        );
        assert!(children.iter().all(|c| c.is_block()));
        assert_eq!(children[0].debug_note(), ANONYMOUS_NOTE);
    }

    #[test]
    fn test_summary_invalidated_on_add_child() {
        let mut parent = CssBox::inline("");
        parent.add_child(CssBox::inline("a"));
        assert!(!parent.establishes_block_formatting_context());
        assert_eq!(parent.children().len(), 1);

        parent.add_child(CssBox::block("b"));
        assert!(parent.establishes_block_formatting_context());
        assert!(parent.children()[0].is_anonymous());
    }

    #[test]
    fn test_block_box_establishes_block_formatting_context() {
        let leaf = CssBox::block("text");
        assert!(leaf.establishes_block_formatting_context());
        assert!(!leaf.has_block_children());
    }

    #[test]
    fn test_prepend_child() {
        let mut parent = CssBox::block("");
        parent.add_child(CssBox::inline("world"));
        parent.prepend_child(CssBox::inline("hello "));
        let texts: Vec<&str> = parent
            .stored_children()
            .iter()
            .map(CssBox::text_content)
            .collect();
        assert_eq!(texts, vec!["hello ", "world"]);
    }

    #[test]
    fn test_child_runs() {
        let mut parent = CssBox::block("");
        parent.add_child(CssBox::block("a"));
        parent.add_child(CssBox::inline("b"));
        parent.add_child(CssBox::inline("c"));
        assert_eq!(
            parent.child_runs(),
            vec![ChildRun::Block(0), ChildRun::Inline(1..3)]
        );
    }

    #[test]
    fn test_trace_tree() {
        let mut parent = CssBox::new(BoxType::Block, "", Vec::new(), "body");
        parent.add_child(CssBox::inline("hi"));
        assert_eq!(
            parent.trace_tree(),
            "CssBox { type: block, text: \"\", debug: \"body\" }\n  CssBox { type: inline, text: \"hi\", debug: \"\" }\n"
        );
    }
}
