//! The closed action set and its dispatcher.
//!
//! An external input loop decodes keystrokes into an [`Action`] plus a repeat
//! count and calls [`LineEditor::dispatch`] once per action. Dispatch is
//! stateless: everything it needs lives in the editor aggregate and the
//! [`EditorHost`]. The only branching behavior is the history-or-cursor
//! fallback pair, which tries the host's history first when the cursor sits
//! on the first visual row and otherwise degrades to plain vertical movement.
//!
//! Hosts cannot reach back into the editor while `dispatch` borrows it, so a
//! history implementation typically records the recalled entry and applies it
//! with [`LineEditor::set_text`] after `dispatch` returns `Success`.

use crate::editor::LineEditor;
use crate::screen::EditorHost;

/// One named editing or navigation command, paired with a repeat count at
/// dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Erase cells before the cursor, crossing line breaks.
    Backspace,
    /// Erase cells after the cursor, crossing line breaks.
    Delete,
    /// Jump to column 0 of the current line.
    MoveToStartOfLine,
    /// Jump past the last cell of the current line.
    MoveToEndOfLine,
    /// Move backward to the start of a word.
    MoveToStartOfWord,
    /// Move forward to the end of a word.
    MoveToEndOfWord,
    /// Jump to the start of the document.
    MoveToStartOfDocument,
    /// Jump to the end of the document.
    MoveToEndOfDocument,
    /// Move one cell left, crossing line breaks.
    CursorLeft,
    /// Move one cell right, crossing line breaks.
    CursorRight,
    /// Move one screen row up.
    CursorUp,
    /// Move one screen row down.
    CursorDown,
    /// End the input session if the current line is empty, else accept.
    EndInput,
    /// Submit the buffer contents.
    AcceptInput,
    /// History recall when on the first screen row, else cursor up.
    HistoryPreviousOrCursorUp,
    /// History recall when on the first screen row, else cursor down.
    HistoryNextOrCursorDown,
}

/// What a dispatched action did.
///
/// `Success`/`Blocked` are the ordinary outcomes; `Accept` and `EndOfInput`
/// are control signals that end the edit session. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The action made progress (possibly less than the repeat count asked
    /// for).
    Success,
    /// Nothing could be done; recoverable, often used to trigger a fallback.
    Blocked,
    /// Submit the current buffer contents.
    Accept,
    /// End of input: `EndInput` arrived on an empty current line.
    EndOfInput,
}

fn progress(made: bool) -> Outcome {
    if made {
        Outcome::Success
    } else {
        Outcome::Blocked
    }
}

fn signed(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

impl LineEditor {
    /// Perform `action` `repeat_count` times (0 is a no-op and reports
    /// [`Outcome::Blocked`]).
    ///
    /// Movement and erase actions report [`Outcome::Success`] when any
    /// progress was made, even partial progress against a large repeat
    /// count, and [`Outcome::Blocked`] when none was possible. Layout
    /// failures during vertical movement degrade to `Blocked`.
    pub fn dispatch<H: EditorHost>(
        &mut self,
        action: Action,
        repeat_count: usize,
        host: &mut H,
    ) -> Outcome {
        match action {
            Action::Backspace => progress(self.erase_chars_before_cursor(repeat_count, true) > 0),
            Action::Delete => progress(self.erase_chars_after_cursor(repeat_count, true) > 0),
            Action::MoveToStartOfLine => progress(self.move_to_start_of_line()),
            Action::MoveToEndOfLine => progress(self.move_to_end_of_line()),
            Action::MoveToStartOfWord => {
                progress(self.move_to_start_of_word(repeat_count, true) > 0)
            }
            Action::MoveToEndOfWord => progress(self.move_to_end_of_word(repeat_count, true) > 0),
            Action::MoveToStartOfDocument => progress(self.move_to_start()),
            Action::MoveToEndOfDocument => progress(self.move_to_end()),
            Action::CursorLeft => progress(self.move_left(repeat_count, true) > 0),
            Action::CursorRight => progress(self.move_right(repeat_count, true) > 0),
            Action::CursorUp => self.vertical_outcome(-signed(repeat_count), host),
            Action::CursorDown => self.vertical_outcome(signed(repeat_count), host),
            Action::EndInput => {
                if self.buffer().current_line().is_empty() {
                    Outcome::EndOfInput
                } else {
                    self.dispatch(Action::AcceptInput, repeat_count, host)
                }
            }
            Action::AcceptInput => Outcome::Accept,
            Action::HistoryPreviousOrCursorUp => {
                if self.on_first_screen_row(host) && host.history_previous(repeat_count) {
                    return Outcome::Success;
                }
                self.dispatch(Action::CursorUp, repeat_count, host)
            }
            Action::HistoryNextOrCursorDown => {
                if self.on_first_screen_row(host) && host.history_next(repeat_count) {
                    return Outcome::Success;
                }
                self.dispatch(Action::CursorDown, repeat_count, host)
            }
        }
    }

    fn vertical_outcome<H: EditorHost>(&mut self, amt: isize, host: &mut H) -> Outcome {
        match self.move_vertically(amt, host) {
            Ok(0) => Outcome::Blocked,
            Ok(_) => Outcome::Success,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, "vertical movement unavailable");
                Outcome::Blocked
            }
        }
    }

    fn on_first_screen_row<H: EditorHost>(&mut self, host: &mut H) -> bool {
        self.cursor_screen_row(host).map_or(false, |row| row == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::EditBuffer;
    use crate::screen::{HardWrapLayout, LayoutError, ScreenLine};

    /// Host with scriptable history results and call counters.
    struct ScriptedHost {
        layout: HardWrapLayout,
        prev_handled: bool,
        next_handled: bool,
        prev_calls: usize,
        next_calls: usize,
    }

    impl ScriptedHost {
        fn new(width: u16) -> Self {
            Self {
                layout: HardWrapLayout::new(width),
                prev_handled: false,
                next_handled: false,
                prev_calls: 0,
                next_calls: 0,
            }
        }
    }

    impl EditorHost for ScriptedHost {
        fn ensure_screen_width(&mut self) -> Result<u16, LayoutError> {
            self.layout.ensure_screen_width()
        }

        fn compute_screen_lines(
            &mut self,
            buffer: &EditBuffer,
            width: u16,
        ) -> Result<Vec<ScreenLine>, LayoutError> {
            self.layout.compute_screen_lines(buffer, width)
        }

        fn history_previous(&mut self, _count: usize) -> bool {
            self.prev_calls += 1;
            self.prev_handled
        }

        fn history_next(&mut self, _count: usize) -> bool {
            self.next_calls += 1;
            self.next_handled
        }
    }

    #[test]
    fn end_input_on_empty_line_signals_end() {
        let mut editor = LineEditor::new();
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::EndInput, 1, &mut host), Outcome::EndOfInput);

        let mut editor = LineEditor::with_text("x");
        assert_eq!(editor.dispatch(Action::EndInput, 1, &mut host), Outcome::Accept);
    }

    #[test]
    fn end_input_checks_the_current_line_only() {
        let mut editor = LineEditor::with_text("x\n");
        let mut host = ScriptedHost::new(40);
        // Cursor sits on the trailing empty line.
        assert_eq!(editor.dispatch(Action::EndInput, 1, &mut host), Outcome::EndOfInput);
    }

    #[test]
    fn accept_is_unconditional() {
        let mut editor = LineEditor::new();
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::AcceptInput, 1, &mut host), Outcome::Accept);
    }

    #[test]
    fn movement_reports_progress() {
        let mut editor = LineEditor::with_text("hello");
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::CursorLeft, 2, &mut host), Outcome::Success);
        assert_eq!(editor.cursor().x, 3);
        assert_eq!(editor.dispatch(Action::MoveToStartOfLine, 1, &mut host), Outcome::Success);
        assert_eq!(editor.dispatch(Action::MoveToStartOfLine, 1, &mut host), Outcome::Blocked);
        assert_eq!(editor.dispatch(Action::CursorLeft, 1, &mut host), Outcome::Blocked);
    }

    #[test]
    fn partial_progress_is_success() {
        let mut editor = LineEditor::with_text("ab");
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::Backspace, 10, &mut host), Outcome::Success);
        assert!(editor.buffer().is_empty());
    }

    #[test]
    fn zero_repeat_count_is_blocked() {
        let mut editor = LineEditor::with_text("ab");
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::Backspace, 0, &mut host), Outcome::Blocked);
        assert_eq!(editor.all_text(), "ab");
    }

    #[test]
    fn erase_actions_mutate_and_report() {
        let mut editor = LineEditor::with_text("hello world");
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::Backspace, 5, &mut host), Outcome::Success);
        assert_eq!(editor.all_text(), "hello ");
        editor.move_to_start();
        assert_eq!(editor.dispatch(Action::Delete, 6, &mut host), Outcome::Success);
        assert!(editor.buffer().is_empty());
        assert_eq!(editor.dispatch(Action::Delete, 1, &mut host), Outcome::Blocked);
    }

    #[test]
    fn word_actions_dispatch() {
        let mut editor = LineEditor::with_text("hello world");
        let mut host = ScriptedHost::new(40);
        editor.move_to_start();
        assert_eq!(editor.dispatch(Action::MoveToEndOfWord, 1, &mut host), Outcome::Success);
        assert_eq!(editor.cursor().x, 5);
        assert_eq!(editor.dispatch(Action::MoveToStartOfWord, 1, &mut host), Outcome::Success);
        assert_eq!(editor.cursor().x, 0);
        assert_eq!(editor.dispatch(Action::MoveToStartOfWord, 1, &mut host), Outcome::Blocked);
    }

    #[test]
    fn vertical_actions_use_screen_rows() {
        let mut editor = LineEditor::with_text("one\ntwo");
        let mut host = ScriptedHost::new(40);
        assert_eq!(editor.dispatch(Action::CursorUp, 1, &mut host), Outcome::Success);
        assert_eq!(editor.cursor().y, 0);
        assert_eq!(editor.dispatch(Action::CursorUp, 1, &mut host), Outcome::Blocked);
    }

    #[test]
    fn vertical_action_without_width_is_blocked() {
        let mut editor = LineEditor::with_text("one\ntwo");
        let mut host = ScriptedHost::new(0);
        assert_eq!(editor.dispatch(Action::CursorUp, 1, &mut host), Outcome::Blocked);
    }

    #[test]
    fn history_consumed_on_first_row() {
        let mut editor = LineEditor::with_text("one");
        let mut host = ScriptedHost::new(40);
        host.prev_handled = true;
        assert_eq!(
            editor.dispatch(Action::HistoryPreviousOrCursorUp, 1, &mut host),
            Outcome::Success
        );
        assert_eq!(host.prev_calls, 1);
        // The editor state is untouched; the host applies the recall.
        assert_eq!(editor.all_text(), "one");
    }

    #[test]
    fn history_declined_falls_through_to_cursor_motion() {
        let mut editor = LineEditor::with_text("one");
        let mut host = ScriptedHost::new(40);
        host.prev_handled = false;
        assert_eq!(
            editor.dispatch(Action::HistoryPreviousOrCursorUp, 1, &mut host),
            Outcome::Blocked
        );
        assert_eq!(host.prev_calls, 1);
    }

    #[test]
    fn history_skipped_off_the_first_row() {
        let mut editor = LineEditor::with_text("one\ntwo");
        let mut host = ScriptedHost::new(40);
        host.prev_handled = true;
        // Cursor is on the second screen row: straight to cursor movement.
        assert_eq!(
            editor.dispatch(Action::HistoryPreviousOrCursorUp, 1, &mut host),
            Outcome::Success
        );
        assert_eq!(host.prev_calls, 0);
        assert_eq!(editor.cursor().y, 0);
    }

    #[test]
    fn history_next_falls_through_to_cursor_down() {
        let mut editor = LineEditor::with_text("one\ntwo");
        let mut host = ScriptedHost::new(40);
        editor.move_to_start();
        host.next_handled = false;
        assert_eq!(
            editor.dispatch(Action::HistoryNextOrCursorDown, 1, &mut host),
            Outcome::Success
        );
        assert_eq!(host.next_calls, 1);
        assert_eq!(editor.cursor().y, 1);
    }

    #[test]
    fn history_row_check_uses_wrapped_rows() {
        // One logical line wrapped onto three rows: the cursor at the end is
        // on row 2, so history is not consulted.
        let mut editor = LineEditor::with_text("abcdefghij");
        let mut host = ScriptedHost::new(4);
        host.prev_handled = true;
        assert_eq!(
            editor.dispatch(Action::HistoryPreviousOrCursorUp, 1, &mut host),
            Outcome::Success
        );
        assert_eq!(host.prev_calls, 0);
    }

    #[test]
    fn history_attempt_skipped_when_layout_unavailable() {
        let mut editor = LineEditor::with_text("one");
        let mut host = ScriptedHost::new(0);
        host.prev_handled = true;
        assert_eq!(
            editor.dispatch(Action::HistoryPreviousOrCursorUp, 1, &mut host),
            Outcome::Blocked
        );
        assert_eq!(host.prev_calls, 0);
    }
}
