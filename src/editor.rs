//! The owning editor aggregate: buffer, cursor, and the wrapped-layout cache.
//!
//! [`LineEditor`] is the single exclusively-owned editor state. Every
//! navigation and mutation operation goes through `&mut self`, so there is no
//! shared or global state anywhere in the core. The wrapped screen-line
//! layout is a derived cache with an explicit validity flag: any state change
//! (edits move text, cursor moves relocate the cursor marker) invalidates it,
//! and the host's resize notification arrives as
//! [`invalidate_layout`](LineEditor::invalidate_layout).

use crate::buffer::{EditBuffer, Position};
use crate::cell::truncate_to_width;
use crate::screen::{EditorHost, LayoutError, ScreenLine};

/// Derived wrapped layout, valid until the next edit, cursor move, or resize.
#[derive(Debug, Default)]
struct LayoutCache {
    width: u16,
    lines: Vec<ScreenLine>,
    valid: bool,
}

/// Multi-line line editor: buffer + cursor + layout cache.
///
/// The editor owns no terminal and performs no I/O; the surrounding widget
/// feeds it [`Action`](crate::Action)s and supplies an [`EditorHost`] for
/// wrapping and history.
///
/// # Example
///
/// ```
/// use dashline::{HardWrapLayout, LineEditor};
///
/// let mut editor = LineEditor::new();
/// let mut host = HardWrapLayout::new(20);
/// editor.insert_text("first\nsecond");
/// assert_eq!(editor.cursor().y, 1);
/// let rows = editor.move_vertically(-1, &mut host).unwrap();
/// assert_eq!(rows, -1);
/// assert_eq!(editor.cursor().y, 0);
/// ```
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: EditBuffer,
    layout: LayoutCache,
}

impl LineEditor {
    /// Create an editor over an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: EditBuffer::new(),
            layout: LayoutCache::default(),
        }
    }

    /// Create an editor holding `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.insert_text(text);
        editor
    }

    /// Read access to the buffer and cursor.
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// The current cursor position.
    pub fn cursor(&self) -> Position {
        self.buffer.cursor()
    }

    /// The whole buffer contents, lines joined with `\n`.
    pub fn all_text(&self) -> String {
        self.buffer.all_text()
    }

    /// Drop the cached wrapped layout. Hosts call this whenever the terminal
    /// is resized; the next vertical navigation or layout query recomputes.
    pub fn invalidate_layout(&mut self) {
        self.layout.valid = false;
    }

    /// The width the cached layout was computed for, or `None` while the
    /// cache is invalid.
    pub fn layout_width(&self) -> Option<u16> {
        self.layout.valid.then_some(self.layout.width)
    }

    /// Insert text (possibly multi-line) at the cursor.
    pub fn insert_text(&mut self, text: &str) {
        self.buffer.insert_text(text);
        self.layout.valid = false;
    }

    /// Replace the buffer contents, cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.layout.valid = false;
    }

    /// Reset to a single empty line.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.layout.valid = false;
    }

    /// Erase `[start, end)`; see [`EditBuffer::erase_between`].
    pub fn erase_between(&mut self, start: Position, end: Position) {
        self.buffer.erase_between(start, end);
        self.layout.valid = false;
    }

    /// Erase up to `amt` cells before the cursor; returns cells removed.
    pub fn erase_chars_before_cursor(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let removed = self.buffer.erase_chars_before_cursor(amt, traverse_line_breaks);
        if removed > 0 {
            self.layout.valid = false;
        }
        removed
    }

    /// Erase up to `amt` cells after the cursor; returns cells removed.
    pub fn erase_chars_after_cursor(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let removed = self.buffer.erase_chars_after_cursor(amt, traverse_line_breaks);
        if removed > 0 {
            self.layout.valid = false;
        }
        removed
    }

    /// Move the cursor left by up to `amt` cells; returns cells moved.
    pub fn move_left(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let moved = self.buffer.move_left(amt, traverse_line_breaks);
        if moved > 0 {
            self.layout.valid = false;
        }
        moved
    }

    /// Move the cursor right by up to `amt` cells; returns cells moved.
    pub fn move_right(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let moved = self.buffer.move_right(amt, traverse_line_breaks);
        if moved > 0 {
            self.layout.valid = false;
        }
        moved
    }

    /// Jump to column 0 of the current line; returns whether the cursor moved.
    pub fn move_to_start_of_line(&mut self) -> bool {
        let changed = self.buffer.move_to_start_of_line();
        self.note_moved(changed)
    }

    /// Jump past the end of the current line; returns whether the cursor moved.
    pub fn move_to_end_of_line(&mut self) -> bool {
        let changed = self.buffer.move_to_end_of_line();
        self.note_moved(changed)
    }

    /// Jump to the start of the document; returns whether the cursor moved.
    pub fn move_to_start(&mut self) -> bool {
        let changed = self.buffer.move_to_start();
        self.note_moved(changed)
    }

    /// Jump to the end of the document; returns whether the cursor moved.
    pub fn move_to_end(&mut self) -> bool {
        let changed = self.buffer.move_to_end();
        self.note_moved(changed)
    }

    /// Move forward up to `amt` word ends; returns word units traversed.
    pub fn move_to_end_of_word(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let moved = self.buffer.move_to_end_of_word(amt, traverse_line_breaks);
        if moved > 0 {
            self.layout.valid = false;
        }
        moved
    }

    /// Move backward up to `amt` word starts; returns word units traversed.
    pub fn move_to_start_of_word(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let moved = self.buffer.move_to_start_of_word(amt, traverse_line_breaks);
        if moved > 0 {
            self.layout.valid = false;
        }
        moved
    }

    /// The wrapped layout for the current width, recomputing through `host`
    /// if the cache is stale.
    pub fn screen_lines<H: EditorHost>(
        &mut self,
        host: &mut H,
    ) -> Result<&[ScreenLine], LayoutError> {
        self.ensure_layout(host)?;
        Ok(&self.layout.lines)
    }

    /// Index of the screen row currently hosting the cursor.
    pub fn cursor_screen_row<H: EditorHost>(&mut self, host: &mut H) -> Result<usize, LayoutError> {
        self.ensure_layout(host)?;
        Ok(self
            .layout
            .lines
            .iter()
            .position(|sl| sl.cursor_cell.is_some())
            .unwrap_or(0))
    }

    /// Move the cursor `amt` screen rows down (negative = up).
    ///
    /// The target row is clamped to the wrapped layout; when it differs from
    /// the source row the cursor keeps its visual distance past the prompt,
    /// truncated at a cell boundary so a double-width character is never
    /// split. Returns the signed number of rows actually traversed (0 when
    /// already on the first/last row in that direction).
    pub fn move_vertically<H: EditorHost>(
        &mut self,
        amt: isize,
        host: &mut H,
    ) -> Result<isize, LayoutError> {
        self.ensure_layout(host)?;
        if self.layout.lines.is_empty() {
            return Ok(0);
        }
        let cursor_row = self
            .layout
            .lines
            .iter()
            .position(|sl| sl.cursor_cell.is_some())
            .unwrap_or(0);
        let last = self.layout.lines.len() - 1;
        let target_row = cursor_row.saturating_add_signed(amt).min(last);
        let traversed = target_row as isize - cursor_row as isize;
        if traversed != 0 {
            let new_pos = {
                let source = &self.layout.lines[cursor_row];
                let dest = &self.layout.lines[target_row];
                let distance = source
                    .cursor_cell
                    .unwrap_or(source.prompt_len)
                    .saturating_sub(source.prompt_len);
                let prefix = truncate_to_width(&dest.text, distance);
                Position::new(dest.parent_line, dest.offset_in_parent + prefix.len())
            };
            self.buffer.cursor = new_pos;
            self.layout.valid = false;
        }
        Ok(traversed)
    }

    fn note_moved(&mut self, changed: bool) -> bool {
        if changed {
            self.layout.valid = false;
        }
        changed
    }

    fn ensure_layout<H: EditorHost>(&mut self, host: &mut H) -> Result<(), LayoutError> {
        if self.layout.valid {
            return Ok(());
        }
        let width = host.ensure_screen_width()?;
        let lines = host.compute_screen_lines(&self.buffer, width)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(width, rows = lines.len(), "recomputed wrapped layout");
        self.layout.width = width;
        self.layout.lines = lines;
        self.layout.valid = true;
        Ok(())
    }
}
