//! Document edits.
//!
//! A `TextEdit` replaces the bytes of `range` in the old text with
//! `new_text`. Applying an edit to a file decides between reparsing one
//! lazily parsed block in place and reparsing the whole file.

use crate::Span;

/// A single replacement in a document.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextEdit {
    /// Range in the old text that is removed.
    pub range: Span,
    /// Text inserted in its place.
    pub new_text: String,
}

impl TextEdit {
    pub fn new(range: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            range,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        TextEdit::new(Span::new(at, at), text)
    }

    pub fn delete(range: Span) -> Self {
        TextEdit::new(range, String::new())
    }

    /// Net change in document length (positive = grew).
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::try_from(self.new_text.len()).unwrap_or(i64::MAX) - i64::from(self.range.len())
    }

    /// Whether the removed range lies inside `span` without touching its
    /// first or last byte.
    ///
    /// Edits that satisfy this for a `{ ... }` block never disturb the braces.
    #[inline]
    pub fn is_strictly_inside(&self, span: Span) -> bool {
        span.start < self.range.start && self.range.end < span.end
    }

    /// Apply the edit to `old`, returning the new text.
    ///
    /// Returns `None` if the range is out of bounds or splits a UTF-8 sequence.
    pub fn apply(&self, old: &str) -> Option<String> {
        let range = self.range.to_range();
        if range.end > old.len()
            || !old.is_char_boundary(range.start)
            || !old.is_char_boundary(range.end)
        {
            return None;
        }
        let mut out = String::with_capacity(old.len() - range.len() + self.new_text.len());
        out.push_str(&old[..range.start]);
        out.push_str(&self.new_text);
        out.push_str(&old[range.end..]);
        Some(out)
    }
}
