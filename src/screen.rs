//! Wrapped screen lines and the host collaborator contract.
//!
//! The editing core does not render. It consumes an ordered sequence of
//! [`ScreenLine`]s (wrapped visual segments of the logical lines) produced
//! by whatever owns the terminal, and uses them only for vertical cursor
//! movement. [`EditorHost`] is that collaborator's contract; [`HardWrapLayout`]
//! is a ready-made host for widgets that are happy with plain fixed-width
//! wrapping (and for the test suites).

use crate::buffer::EditBuffer;
use crate::cell::{cell_width, visual_width};
use unicode_segmentation::UnicodeSegmentation;

/// One wrapped visual segment of a logical line.
///
/// Derived data: recomputed on demand and never kept past a width change or
/// an edit. Several screen lines may map to one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    /// Index of the logical line this segment belongs to.
    pub parent_line: usize,
    /// Byte offset into the parent line where this segment begins.
    pub offset_in_parent: usize,
    /// The visible substring of the parent line.
    pub text: String,
    /// Visual columns consumed by a prompt prefix on this segment.
    pub prompt_len: usize,
    /// Visual column of the cursor on this segment, or `None` when the
    /// cursor is elsewhere.
    pub cursor_cell: Option<usize>,
}

/// Failure to obtain a wrapped layout from the host.
///
/// These stay in the recoverable tier: dispatch degrades them to
/// [`Outcome::Blocked`](crate::Outcome::Blocked).
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The screen width has not been established yet (e.g. before the first
    /// terminal size probe, or after a resize that is still settling).
    #[error("screen width has not been established")]
    WidthUnavailable,
    /// The host failed to produce a layout.
    #[error("layout provider error: {0}")]
    Provider(String),
}

/// Contract the surrounding widget fulfils for the editing core.
///
/// The two required methods are the layout side: establish the screen width
/// and wrap the buffer at that width. The history methods back the
/// history-or-cursor fallback actions and default to "not handled", so hosts
/// without command history implement nothing extra.
pub trait EditorHost {
    /// Establish (or re-validate) the current screen width in columns.
    fn ensure_screen_width(&mut self) -> Result<u16, LayoutError>;

    /// Wrap `buffer` at `width` columns into ordered screen lines.
    ///
    /// Exactly one returned segment must carry the cursor
    /// (`cursor_cell.is_some()`), and every `(parent_line,
    /// offset_in_parent)` must name a cell boundary in `buffer`; cursor
    /// remapping trusts these offsets.
    fn compute_screen_lines(
        &mut self,
        buffer: &EditBuffer,
        width: u16,
    ) -> Result<Vec<ScreenLine>, LayoutError>;

    /// Recall the previous history entry. `true` means the host consumed the
    /// action; the host cannot reach the editor while dispatch borrows it, so
    /// implementations usually record the recalled entry and apply it with
    /// [`LineEditor::set_text`](crate::LineEditor::set_text) once dispatch
    /// returns.
    fn history_previous(&mut self, _count: usize) -> bool {
        false
    }

    /// Recall the next history entry; see
    /// [`history_previous`](Self::history_previous).
    fn history_next(&mut self, _count: usize) -> bool {
        false
    }
}

/// Fixed-width, cell-aware hard wrapping host.
///
/// Lines wrap at the first cell that would overflow the width; a
/// double-width cell that straddles the boundary moves wholly to the next
/// segment. The first segment of the first line reserves `prompt_len`
/// columns, the first segment of every later line reserves
/// `continuation_prompt_len`; wrapped continuation segments reserve nothing.
///
/// A width of zero means "not yet known" and reports
/// [`LayoutError::WidthUnavailable`] until [`set_width`](Self::set_width) is
/// called.
#[derive(Debug, Clone)]
pub struct HardWrapLayout {
    width: u16,
    prompt_len: usize,
    continuation_prompt_len: usize,
}

impl HardWrapLayout {
    /// Create a layout host for the given width (0 = not yet known).
    pub fn new(width: u16) -> Self {
        Self {
            width,
            prompt_len: 0,
            continuation_prompt_len: 0,
        }
    }

    /// Reserve prompt columns on the first screen line.
    pub fn with_prompt(mut self, columns: usize) -> Self {
        self.prompt_len = columns;
        self
    }

    /// Reserve prompt columns on the first segment of continuation lines.
    pub fn with_continuation_prompt(mut self, columns: usize) -> Self {
        self.continuation_prompt_len = columns;
        self
    }

    /// Record a new terminal width (call on resize, together with
    /// [`LineEditor::invalidate_layout`](crate::LineEditor::invalidate_layout)).
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// The current width, 0 when unknown.
    pub fn width(&self) -> u16 {
        self.width
    }

    fn wrap_line(
        &self,
        out: &mut Vec<ScreenLine>,
        buffer: &EditBuffer,
        y: usize,
        line: &str,
        width: usize,
    ) {
        let line_prompt = if y == 0 {
            self.prompt_len
        } else {
            self.continuation_prompt_len
        };
        let cursor = buffer.cursor();
        let mut seg_start = 0;
        let mut first_seg = true;
        loop {
            let seg_prompt = if first_seg { line_prompt } else { 0 };
            let avail = width.saturating_sub(seg_prompt).max(1);
            let mut used = 0;
            let mut seg_end = seg_start;
            for (offset, cell) in line[seg_start..].grapheme_indices(true) {
                let w = cell_width(cell);
                if used + w > avail && seg_end > seg_start {
                    break;
                }
                used += w;
                seg_end = seg_start + offset + cell.len();
            }

            let is_last = seg_end == line.len();
            let cursor_here = cursor.y == y
                && cursor.x >= seg_start
                && (cursor.x < seg_end || (is_last && cursor.x == seg_end));
            out.push(ScreenLine {
                parent_line: y,
                offset_in_parent: seg_start,
                text: line[seg_start..seg_end].to_string(),
                prompt_len: seg_prompt,
                cursor_cell: cursor_here
                    .then(|| seg_prompt + visual_width(&line[seg_start..cursor.x])),
            });

            if is_last {
                break;
            }
            seg_start = seg_end;
            first_seg = false;
        }
    }
}

impl EditorHost for HardWrapLayout {
    fn ensure_screen_width(&mut self) -> Result<u16, LayoutError> {
        if self.width == 0 {
            return Err(LayoutError::WidthUnavailable);
        }
        Ok(self.width)
    }

    fn compute_screen_lines(
        &mut self,
        buffer: &EditBuffer,
        width: u16,
    ) -> Result<Vec<ScreenLine>, LayoutError> {
        if width == 0 {
            return Err(LayoutError::WidthUnavailable);
        }
        let mut out = Vec::new();
        for (y, line) in buffer.lines().enumerate() {
            self.wrap_line(&mut out, buffer, y, line, width as usize);
        }
        Ok(out)
    }
}
