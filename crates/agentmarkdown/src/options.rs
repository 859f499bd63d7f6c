//! Configuration for the built-in layout generators.

/// Markdown syntax choices made by the built-in generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Text of a thematic break (`<hr>`). A break starting with `-` gets
    /// blank lines around it so it is not read as a setext underline.
    pub hr: String,
    /// Marker for unordered list items: `*`, `-` or `+`.
    pub bullet_list_marker: char,
    /// Fence written above and below `<pre>` blocks.
    pub fence: String,
    /// Delimiter for `<b>` and `<strong>`.
    pub strong_delimiter: String,
    /// Delimiter for `<i>` and `<em>`.
    pub em_delimiter: char,
    /// Spaces of indentation per list nesting level.
    pub list_indent: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            hr: "* * *".to_string(),
            bullet_list_marker: '*',
            fence: "```".to_string(),
            strong_delimiter: "**".to_string(),
            em_delimiter: '*',
            list_indent: 2,
        }
    }
}
