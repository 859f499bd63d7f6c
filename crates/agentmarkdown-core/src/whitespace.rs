//! CSS 2.1 `white-space` processing.
//!
//! Implements the four steps of the white-space processing model from
//! <https://www.w3.org/TR/CSS2/text.html#white-space-model> for the subset of
//! values that matter when turning text into Markdown.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACES_AROUND_LINEFEED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\t\r ]*\n[\t\r ]*").expect("SPACES_AROUND_LINEFEED: hardcoded regex is valid")
});

static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("SPACE_RUNS: hardcoded regex is valid"));

/// The value of the CSS `white-space` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceHandling {
    /// Collapse whitespace and linefeeds.
    #[default]
    Normal,
    /// Preserve everything (used inside `<pre>`).
    Pre,
    /// Like `Normal`; wrapping is irrelevant for Markdown.
    NoWrap,
    /// Preserve whitespace, allow wrapping.
    PreWrap,
    /// Collapse spaces but preserve linefeeds.
    PreLine,
}

impl WhitespaceHandling {
    fn strips_around_linefeeds(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap | Self::PreLine)
    }

    fn folds_linefeeds(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap)
    }

    fn collapses_spaces(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap | Self::PreLine)
    }
}

/// Normalize `text` according to the white-space processing model for `mode`.
///
/// The result is stable: normalizing already-normalized text with the same
/// mode returns it unchanged.
pub fn normalize_whitespace(text: &str, mode: WhitespaceHandling) -> String {
    let mut normalized = text.to_string();

    // Step 1: tabs, carriage returns and spaces around a linefeed are removed.
    if mode.strips_around_linefeeds() {
        normalized = SPACES_AROUND_LINEFEED
            .replace_all(&normalized, "\n")
            .into_owned();
    }

    // Step 2 (pre, pre-wrap): spaces become non-breaking. Nothing to do for
    // Markdown output, so the text passes through untouched.

    // Step 3: linefeeds render as a space, or as nothing when the text is
    // made only of linefeeds.
    if mode.folds_linefeeds() {
        if normalized.chars().all(|c| c == '\n') {
            normalized.clear();
        } else {
            normalized = normalized.replace('\n', " ");
        }
    }

    // Step 4: tabs become spaces and runs of spaces collapse to one.
    if mode.collapses_spaces() {
        normalized = normalized.replace('\t', " ");
        normalized = SPACE_RUNS.replace_all(&normalized, " ").into_owned();
    }

    normalized
}
