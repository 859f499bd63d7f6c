//! Scoped state shared by layout generators during one conversion.
//!
//! Generators that need to know what encloses the element they are laying
//! out (the list it belongs to, whether it sits inside `<pre>`) push state on
//! the way down and pop it on the way back up. Each kind of state has its own
//! typed stack so nothing is looked up by string key or downcast at the call
//! site.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use agentmarkdown_core::WhitespaceHandling;

use crate::layout::image::ImageReference;
use crate::options::LayoutOptions;

/// A LIFO stack of scoped values.
#[derive(Debug, Clone)]
pub struct StateStack<T> {
    items: Vec<T>,
}

impl<T> Default for StateStack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> StateStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Remove and return the innermost value; `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The innermost value; `None` when empty.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Kind of the list an `<li>` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// `<ul>`
    Unordered,
    /// `<ol>`
    Ordered,
}

impl ListType {
    /// The list type for a `ul` or `ol` tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ul" => Some(Self::Unordered),
            "ol" => Some(Self::Ordered),
            _ => None,
        }
    }
}

/// State for a single conversion.
///
/// Created fresh for every render and discarded afterwards, so nothing
/// leaks between conversions.
#[derive(Debug, Default)]
pub struct LayoutContext {
    options: LayoutOptions,
    list_types: StateStack<ListType>,
    list_item_counts: StateStack<u32>,
    whitespace: StateStack<WhitespaceHandling>,
    blockquote_depth: usize,
    entities_decoded: bool,
    images: Vec<ImageReference>,
    extensions: HashMap<TypeId, Box<dyn Any>>,
}

impl LayoutContext {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Mark the text being laid out as already entity-decoded by its parser.
    pub fn with_entities_decoded(mut self, decoded: bool) -> Self {
        self.entities_decoded = decoded;
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Whether text nodes hold decoded characters rather than the source form.
    pub fn entities_decoded(&self) -> bool {
        self.entities_decoded
    }

    /// Enter a `<ul>` or `<ol>`.
    pub fn begin_list(&mut self, list_type: ListType) {
        self.list_types.push(list_type);
        self.list_item_counts.push(0);
    }

    /// Leave the innermost list.
    ///
    /// # Panics
    ///
    /// Panics if no list is open.
    pub fn end_list(&mut self) {
        let ended = self.list_types.pop().is_some();
        self.list_item_counts.pop();
        assert!(ended, "end_list called without a matching begin_list");
    }

    /// Type of the innermost open list.
    pub fn list_type(&self) -> Option<ListType> {
        self.list_types.peek().copied()
    }

    /// Number of open lists; 1 inside a top-level list.
    pub fn list_nesting_depth(&self) -> usize {
        self.list_types.len()
    }

    /// Count a new item in the innermost list and return its 1-based number.
    pub fn new_list_item(&mut self) -> Option<u32> {
        let count = self.list_item_counts.peek_mut()?;
        *count += 1;
        Some(*count)
    }

    pub fn push_whitespace_handling(&mut self, handling: WhitespaceHandling) {
        self.whitespace.push(handling);
    }

    /// # Panics
    ///
    /// Panics if nothing was pushed.
    pub fn pop_whitespace_handling(&mut self) {
        let popped = self.whitespace.pop().is_some();
        assert!(popped, "pop_whitespace_handling called without a matching push");
    }

    /// The innermost `white-space` mode, `Normal` outside any override.
    pub fn whitespace_handling(&self) -> WhitespaceHandling {
        self.whitespace.peek().copied().unwrap_or_default()
    }

    pub fn begin_blockquote(&mut self) {
        self.blockquote_depth += 1;
    }

    /// # Panics
    ///
    /// Panics if no blockquote is open.
    pub fn end_blockquote(&mut self) {
        assert!(
            self.blockquote_depth > 0,
            "end_blockquote called without a matching begin_blockquote"
        );
        self.blockquote_depth -= 1;
    }

    /// Number of open blockquotes; 0 outside any quote.
    pub fn blockquote_depth(&self) -> usize {
        self.blockquote_depth
    }

    pub fn add_image(&mut self, image: ImageReference) {
        self.images.push(image);
    }

    /// Images seen so far, in document order.
    pub fn images(&self) -> &[ImageReference] {
        &self.images
    }

    pub fn into_images(self) -> Vec<ImageReference> {
        self.images
    }

    /// A stack owned by a custom generator, keyed by the type it holds.
    ///
    /// Generators that need their own scoped state should wrap it in a
    /// dedicated type so two plugins never share a stack by accident.
    pub fn stack<T: 'static>(&mut self) -> &mut StateStack<T> {
        self.extensions
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(StateStack::<T>::new()))
            .downcast_mut::<StateStack<T>>()
            .expect("extension stacks are keyed by their element type")
    }
}
