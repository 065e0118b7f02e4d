//! Unicode cell iteration and width measurement.
//!
//! A *cell* is one grapheme cluster (UAX #29): the minimal unit of text that
//! must move, wrap, or be deleted atomically. A multi-byte codepoint, a
//! combining sequence, or an emoji ZWJ sequence is always one cell, so the
//! byte arithmetic in the rest of the crate never needs unicode awareness of
//! its own.
//!
//! Widths are terminal display columns: most cells occupy one column, CJK
//! ideographs and most emoji occupy two, combining marks and other zero-width
//! codepoints occupy none.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Positional iterator over the unicode cells of a string slice.
///
/// Unlike a plain grapheme iterator this can step in both directions from a
/// movable position, which is what cursor movement needs: step one cell, look
/// at its bytes, decide whether to keep going.
///
/// A freshly created iterator sits *before* the first cell; [`current`] is
/// empty until the first call to [`forward`] or [`backward`].
///
/// # Example
///
/// ```
/// use dashline::cell::CellIter;
///
/// let mut cells = CellIter::new("a漢b");
/// assert!(cells.forward());
/// assert_eq!(cells.current(), "a");
/// assert!(cells.forward());
/// assert_eq!(cells.current(), "漢");
/// assert_eq!(cells.pos(), 1);
/// ```
///
/// [`current`]: CellIter::current
/// [`forward`]: CellIter::forward
/// [`backward`]: CellIter::backward
#[derive(Debug, Clone)]
pub struct CellIter<'a> {
    text: &'a str,
    /// Byte range of the current cell; empty range = no current cell.
    start: usize,
    end: usize,
}

impl<'a> CellIter<'a> {
    /// Create an iterator positioned before the first cell of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            start: 0,
            end: 0,
        }
    }

    /// Create an iterator positioned after the last cell of `text`,
    /// ready for backward stepping.
    pub fn at_end(text: &'a str) -> Self {
        Self {
            text,
            start: text.len(),
            end: text.len(),
        }
    }

    /// Reposition past the last cell for backward iteration.
    pub fn goto_end(&mut self) {
        self.start = self.text.len();
        self.end = self.text.len();
    }

    /// Advance to the next cell. Returns `false` at the end of the text.
    pub fn forward(&mut self) -> bool {
        if self.end >= self.text.len() {
            return false;
        }
        let rest = &self.text[self.end..];
        let step = rest.graphemes(true).next().map_or(rest.len(), str::len);
        self.start = self.end;
        self.end += step;
        true
    }

    /// Retreat to the previous cell. Returns `false` at the start of the text.
    pub fn backward(&mut self) -> bool {
        if self.start == 0 {
            return false;
        }
        let head = &self.text[..self.start];
        let step = head.graphemes(true).next_back().map_or(head.len(), str::len);
        self.end = self.start;
        self.start -= step;
        true
    }

    /// The raw text of the current cell (empty before the first step).
    pub fn current(&self) -> &'a str {
        &self.text[self.start..self.end]
    }

    /// Byte offset where the current cell begins.
    pub fn pos(&self) -> usize {
        self.start
    }

    /// Byte offset just past the current cell.
    pub fn cell_end(&self) -> usize {
        self.end
    }
}

impl<'a> Iterator for CellIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.forward() {
            Some(self.current())
        } else {
            None
        }
    }
}

/// Display width of a single cell in terminal columns, clamped to 2.
///
/// Control characters and combining marks report 0, most text 1, CJK and
/// emoji 2. The clamp keeps pathological clusters from claiming more than
/// two columns, which no terminal renders anyway.
pub fn cell_width(cell: &str) -> usize {
    UnicodeWidthStr::width(cell).min(2)
}

/// Display width of a string: the sum of its cell widths.
pub fn visual_width(text: &str) -> usize {
    text.graphemes(true).map(cell_width).sum()
}

/// Longest prefix of `text` whose display width does not exceed `max_width`.
///
/// Never splits a cell: if the next cell would straddle the limit it is left
/// out entirely, so a double-width character falls wholly before or wholly
/// after the cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (offset, cell) in text.grapheme_indices(true) {
        let w = cell_width(cell);
        if used + w > max_width {
            break;
        }
        used += w;
        end = offset + cell.len();
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_steps_whole_graphemes() {
        let mut ci = CellIter::new("e\u{301}x");
        assert!(ci.forward());
        assert_eq!(ci.current(), "e\u{301}");
        assert_eq!(ci.pos(), 0);
        assert!(ci.forward());
        assert_eq!(ci.current(), "x");
        assert!(!ci.forward());
        assert_eq!(ci.current(), "x");
    }

    #[test]
    fn backward_from_end() {
        let mut ci = CellIter::new("a漢");
        ci.goto_end();
        assert!(ci.backward());
        assert_eq!(ci.current(), "漢");
        assert_eq!(ci.pos(), 1);
        assert!(ci.backward());
        assert_eq!(ci.current(), "a");
        assert!(!ci.backward());
    }

    #[test]
    fn forward_then_backward_revisits_cell() {
        let mut ci = CellIter::new("ab");
        assert!(ci.forward());
        assert!(ci.forward());
        assert_eq!(ci.current(), "b");
        assert!(ci.backward());
        assert_eq!(ci.current(), "a");
    }

    #[test]
    fn iterator_yields_cells_in_order() {
        let cells: Vec<&str> = CellIter::new("a🇺🇸b").collect();
        assert_eq!(cells, vec!["a", "🇺🇸", "b"]);
    }

    #[test]
    fn empty_text_has_no_cells() {
        let mut ci = CellIter::new("");
        assert!(!ci.forward());
        assert!(!ci.backward());
        assert_eq!(ci.current(), "");
    }

    #[test]
    fn widths() {
        assert_eq!(cell_width("a"), 1);
        assert_eq!(cell_width("漢"), 2);
        assert_eq!(visual_width("a漢b"), 4);
        assert_eq!(visual_width(""), 0);
    }

    #[test]
    fn truncate_respects_cell_boundaries() {
        // "a" (1) + "漢" (2) + "b" (1)
        assert_eq!(truncate_to_width("a漢b", 0), "");
        assert_eq!(truncate_to_width("a漢b", 1), "a");
        // Width 2 would split the wide cell - it stays out.
        assert_eq!(truncate_to_width("a漢b", 2), "a");
        assert_eq!(truncate_to_width("a漢b", 3), "a漢");
        assert_eq!(truncate_to_width("a漢b", 4), "a漢b");
        assert_eq!(truncate_to_width("a漢b", 10), "a漢b");
    }
}
