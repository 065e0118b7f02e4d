//! Horizontal, word, and document-boundary cursor movement.
//!
//! All movement is measured in unicode cells via [`CellIter`], so a wide
//! character or combining sequence always moves as one unit. Crossing a line
//! break counts as one movement unit. Operations report how far they actually
//! got; callers treat zero as "blocked".

use crate::buffer::EditBuffer;
use crate::cell::CellIter;

/// A word cell is any cell containing a unicode letter or digit.
fn is_word_cell(cell: &str) -> bool {
    cell.chars().any(char::is_alphanumeric)
}

impl EditBuffer {
    /// Move the cursor left by up to `amt` cells. With `traverse_line_breaks`
    /// the cursor crosses onto the previous line's end (one unit per break).
    /// Returns the number of units actually moved.
    pub fn move_left(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let mut moved = 0;
        while moved < amt {
            if self.cursor.x == 0 {
                if !traverse_line_breaks || self.cursor.y == 0 {
                    return moved;
                }
                self.cursor.y -= 1;
                self.cursor.x = self.lines[self.cursor.y].len();
                moved += 1;
                continue;
            }
            let line = self.lines[self.cursor.y].as_str();
            let mut ci = CellIter::at_end(&line[..self.cursor.x]);
            let mut x = self.cursor.x;
            while moved < amt && ci.backward() {
                x -= ci.current().len();
                moved += 1;
            }
            self.cursor.x = x;
        }
        moved
    }

    /// Move the cursor right by up to `amt` cells; the mirror of
    /// [`move_left`](Self::move_left).
    pub fn move_right(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let mut moved = 0;
        while moved < amt {
            if self.cursor.x >= self.lines[self.cursor.y].len() {
                if !traverse_line_breaks || self.cursor.y == self.lines.len() - 1 {
                    return moved;
                }
                self.cursor.y += 1;
                self.cursor.x = 0;
                moved += 1;
                continue;
            }
            let line = self.lines[self.cursor.y].as_str();
            let mut ci = CellIter::new(&line[self.cursor.x..]);
            let mut x = self.cursor.x;
            while moved < amt && ci.forward() {
                x += ci.current().len();
                moved += 1;
            }
            self.cursor.x = x;
        }
        moved
    }

    /// Jump to column 0. Returns whether the cursor moved.
    pub fn move_to_start_of_line(&mut self) -> bool {
        if self.cursor.x > 0 {
            self.cursor.x = 0;
            return true;
        }
        false
    }

    /// Jump past the last cell of the current line. Returns whether the
    /// cursor moved.
    pub fn move_to_end_of_line(&mut self) -> bool {
        let len = self.lines[self.cursor.y].len();
        if self.cursor.x >= len {
            return false;
        }
        self.cursor.x = len;
        true
    }

    /// Jump to the start of the first line. Returns whether the cursor moved.
    pub fn move_to_start(&mut self) -> bool {
        if self.cursor.y == 0 && self.cursor.x == 0 {
            return false;
        }
        self.cursor.y = 0;
        self.move_to_start_of_line();
        true
    }

    /// Jump past the end of the last line. Returns whether the cursor moved.
    pub fn move_to_end(&mut self) -> bool {
        let last = self.lines.len() - 1;
        if self.cursor.y == last && self.cursor.x >= self.lines[last].len() {
            return false;
        }
        self.cursor.y = last;
        self.move_to_end_of_line();
        true
    }

    /// Move forward to the end of up to `amt` words.
    ///
    /// The scan walks cell by cell; each transition out of a run of word
    /// cells consumes one unit and lands the cursor on that boundary. A line
    /// exhausted mid-count falls back to the end of the line (one unit if it
    /// moved), then continues onto the next line when `traverse_line_breaks`
    /// is set. Returns the number of word units traversed.
    pub fn move_to_end_of_word(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let mut moved = 0;
        let mut remaining = amt;
        while remaining > 0 {
            {
                let origin = self.cursor.x;
                let line = self.lines[self.cursor.y].as_str();
                let mut ci = CellIter::new(&line[origin..]);
                let mut in_word = false;
                while ci.forward() {
                    if is_word_cell(ci.current()) {
                        in_word = true;
                    } else if in_word {
                        self.cursor.x = origin + ci.pos();
                        remaining -= 1;
                        moved += 1;
                        if remaining == 0 {
                            return moved;
                        }
                        in_word = false;
                    }
                }
            }
            if self.move_to_end_of_line() {
                remaining -= 1;
                moved += 1;
                if remaining == 0 {
                    return moved;
                }
            }
            if traverse_line_breaks && self.cursor.y + 1 < self.lines.len() {
                self.cursor.y += 1;
                self.cursor.x = 0;
            } else {
                break;
            }
        }
        moved
    }

    /// Move backward to the start of up to `amt` words; the mirror of
    /// [`move_to_end_of_word`](Self::move_to_end_of_word), falling back to
    /// the start of the line and continuing onto the previous line's end.
    pub fn move_to_start_of_word(&mut self, amt: usize, traverse_line_breaks: bool) -> usize {
        let mut moved = 0;
        let mut remaining = amt;
        while remaining > 0 {
            {
                let origin = self.cursor.x;
                let line = self.lines[self.cursor.y].as_str();
                let mut ci = CellIter::at_end(&line[..origin]);
                let mut in_word = false;
                while ci.backward() {
                    if is_word_cell(ci.current()) {
                        in_word = true;
                    } else if in_word {
                        self.cursor.x = ci.cell_end();
                        remaining -= 1;
                        moved += 1;
                        if remaining == 0 {
                            return moved;
                        }
                        in_word = false;
                    }
                }
            }
            if self.move_to_start_of_line() {
                remaining -= 1;
                moved += 1;
                if remaining == 0 {
                    return moved;
                }
            }
            if traverse_line_breaks && self.cursor.y > 0 {
                self.cursor.y -= 1;
                self.cursor.x = self.lines[self.cursor.y].len();
            } else {
                break;
            }
        }
        moved
    }
}
