//! The multi-line text buffer and its mutation primitives.
//!
//! An [`EditBuffer`] is an ordered, never-empty sequence of logical lines
//! (no embedded line breaks) plus the single live cursor. Every mutation
//! keeps three things true: the buffer has at least one line, the cursor
//! names an existing line, and the cursor's byte offset sits on a cell
//! boundary within that line.
//!
//! Cursor columns are *byte offsets*, not display columns. Cell-boundary
//! safety comes from only ever deriving offsets through [`crate::cell`].

use crate::cell::CellIter;
use smallvec::SmallVec;
use smartstring::alias::String as SmartString;

/// Inline storage for the line list; interactive buffers rarely exceed a
/// handful of lines.
pub(crate) type LineVec = SmallVec<[SmartString; 4]>;

/// A logical cursor position: line index, then byte offset into that line.
///
/// Positions order lexicographically (line first, then offset), which is how
/// ranges passed to [`EditBuffer::erase_between`] are normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index into the buffer.
    pub y: usize,
    /// Byte offset into line `y`; always on a cell boundary.
    pub x: usize,
}

impl Position {
    /// Create a position from a line index and byte offset.
    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }
}

/// Multi-line text buffer with a cursor.
///
/// # Example
///
/// ```
/// use dashline::buffer::EditBuffer;
///
/// let mut buf = EditBuffer::new();
/// buf.insert_text("hello\nworld");
/// assert_eq!(buf.all_text(), "hello\nworld");
/// assert_eq!(buf.cursor().y, 1);
/// assert_eq!(buf.cursor().x, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub(crate) lines: LineVec,
    pub(crate) cursor: Position,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer {
    /// Create an empty buffer: one empty line, cursor at the origin.
    pub fn new() -> Self {
        let mut lines = LineVec::new();
        lines.push(SmartString::new());
        Self {
            lines,
            cursor: Position::default(),
        }
    }

    /// Create a buffer holding `text`, cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.insert_text(text);
        buf
    }

    /// The current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Number of logical lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at index `y`, if it exists.
    pub fn line(&self, y: usize) -> Option<&str> {
        self.lines.get(y).map(SmartString::as_str)
    }

    /// Iterator over the logical lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(SmartString::as_str)
    }

    /// The line the cursor is on.
    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.y]
    }

    /// Whether the buffer holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Everything before the cursor, lines joined with `\n`.
    pub fn text_up_to_cursor(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            let line = line.as_str();
            if i < self.cursor.y {
                out.push_str(line);
                out.push('\n');
            } else {
                out.push_str(&line[..self.cursor.x.min(line.len())]);
                break;
            }
        }
        out
    }

    /// Everything at and after the cursor, lines joined with `\n`.
    pub fn text_after_cursor(&self) -> String {
        let line = self.lines[self.cursor.y].as_str();
        let mut out = String::from(&line[self.cursor.x.min(line.len())..]);
        for line in &self.lines[self.cursor.y + 1..] {
            out.push('\n');
            out.push_str(line);
        }
        out
    }

    /// The whole buffer, lines joined with `\n`.
    pub fn all_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }

    /// Reset to a single empty line with the cursor at the origin.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(SmartString::new());
        self.cursor = Position::default();
    }

    /// Replace the whole buffer with `text`, cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert_text(text);
    }

    /// Insert `text` at the cursor. The text may contain line breaks.
    ///
    /// The current line is split at the cursor; the first inserted segment
    /// extends the before-cursor prefix, each further segment becomes a new
    /// line, a trailing line break appends an empty line, and the original
    /// after-cursor suffix is re-attached to the last line produced. The
    /// cursor ends up at the end of the inserted text.
    pub fn insert_text(&mut self, text: &str) {
        let y = self.cursor.y;
        let current = self.lines[y].clone();
        let (before, after) = current.as_str().split_at(self.cursor.x);
        let trailing_newline = text.ends_with('\n');

        let mut segments: Vec<&str> = text
            .split('\n')
            .map(|seg| seg.strip_suffix('\r').unwrap_or(seg))
            .collect();
        if trailing_newline {
            segments.pop();
        }

        let mut produced = LineVec::new();
        for (i, seg) in segments.iter().enumerate() {
            if i == 0 {
                let mut first = SmartString::from(before);
                first.push_str(seg);
                self.cursor.x = first.len();
                produced.push(first);
            } else {
                self.cursor.y += 1;
                self.cursor.x = seg.len();
                produced.push(SmartString::from(*seg));
            }
        }
        if trailing_newline {
            self.cursor.y += 1;
            self.cursor.x = 0;
            produced.push(SmartString::new());
        }
        if produced.is_empty() {
            produced.push(SmartString::from(before));
            self.cursor.x = before.len();
        }
        if !after.is_empty() {
            if let Some(last) = produced.last_mut() {
                last.push_str(after);
            }
        }

        let tail: LineVec = self.lines.drain(y + 1..).collect();
        self.lines.truncate(y);
        self.lines.extend(produced);
        self.lines.extend(tail);
    }

    /// Erase the half-open range `[start, end)`, swapping the bounds if they
    /// arrive reversed.
    ///
    /// A cursor inside the erased span is clamped to `start`; a cursor after
    /// the span on an affected line shifts left by the removed length; a
    /// cursor on a fully removed line relocates to `start`.
    pub fn erase_between(&mut self, start: Position, end: Position) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };

        if start.y == end.y {
            let line = self.lines[start.y].as_str();
            let mut spliced = SmartString::from(&line[..start.x]);
            spliced.push_str(&line[end.x..]);
            self.lines[start.y] = spliced;
            if self.cursor.y == start.y && self.cursor.x >= start.x {
                if self.cursor.x < end.x {
                    self.cursor.x = start.x;
                } else {
                    self.cursor.x -= end.x - start.x;
                }
            }
            return;
        }

        let mut kept = LineVec::with_capacity(self.lines.len());
        for (i, line) in self.lines.iter().enumerate() {
            let line = line.as_str();
            if i < start.y || i > end.y {
                kept.push(SmartString::from(line));
            } else if i == start.y {
                kept.push(SmartString::from(&line[..start.x]));
                if self.cursor.y == i && self.cursor.x > start.x {
                    self.cursor.x = start.x;
                }
            } else if i == end.y {
                if let Some(last) = kept.last_mut() {
                    last.push_str(&line[end.x..]);
                }
                if self.cursor.y == i {
                    self.cursor.y = start.y;
                    if self.cursor.x < end.x {
                        self.cursor.x = start.x;
                    } else {
                        // The end line's suffix lands at column start.x.
                        self.cursor.x = start.x + (self.cursor.x - end.x);
                    }
                }
            } else if self.cursor.y == i {
                self.cursor = start;
            }
        }
        self.lines = kept;
    }

    /// Erase up to `amt` cells before the cursor, optionally crossing line
    /// breaks. Returns the number of cells actually removed (a crossed line
    /// break counts as one).
    pub fn erase_chars_before_cursor(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let pos = self.cursor;
        let moved = self.move_left(amt, traverse_line_breaks);
        if moved == 0 {
            return 0;
        }
        self.erase_between(self.cursor, pos);
        moved
    }

    /// Erase up to `amt` cells after the cursor, optionally crossing line
    /// breaks. Returns the number of cells actually removed.
    pub fn erase_chars_after_cursor(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let pos = self.cursor;
        let moved = self.move_right(amt, traverse_line_breaks);
        if moved == 0 {
            return 0;
        }
        self.erase_between(pos, self.cursor);
        moved
    }

    /// Whether `pos` names a valid cell boundary in this buffer.
    ///
    /// Used by the property suite; mutation paths maintain this by
    /// construction rather than checking it.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        let Some(line) = self.lines.get(pos.y) else {
            return false;
        };
        if pos.x > line.len() {
            return false;
        }
        let mut ci = CellIter::new(line);
        if pos.x == 0 || pos.x == line.len() {
            return true;
        }
        while ci.forward() {
            if ci.pos() == pos.x {
                return true;
            }
            if ci.pos() > pos.x {
                return false;
            }
        }
        false
    }
}
