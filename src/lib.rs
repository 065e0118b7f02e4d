//! Cursor-aware multi-line editing core for terminal input widgets.
//!
//! `dashline` owns the hard part of an interactive line editor: the
//! multi-line text buffer, the logical cursor, and the dispatch of editing
//! actions, while keeping three coordinate systems consistent at all times:
//!
//! - **byte offsets** into UTF-8 lines (what the buffer stores),
//! - **unicode cells** (grapheme clusters, the atomic unit of movement and
//!   deletion, so a combining sequence or double-width character is never
//!   split),
//! - **wrapped screen rows** (what vertical navigation walks).
//!
//! It owns no terminal. Rendering, screen wrapping, keystroke decoding, and
//! command history live in the host widget behind the [`EditorHost`] trait;
//! the core exposes one dispatch call plus buffer/cursor accessors.
//!
//! # Example
//!
//! ```
//! use dashline::{Action, HardWrapLayout, LineEditor, Outcome};
//!
//! let mut editor = LineEditor::new();
//! let mut host = HardWrapLayout::new(40).with_prompt(2);
//!
//! editor.insert_text("hello world");
//! assert_eq!(
//!     editor.dispatch(Action::MoveToStartOfWord, 1, &mut host),
//!     Outcome::Success
//! );
//! assert_eq!(editor.cursor().x, 6);
//! assert_eq!(
//!     editor.dispatch(Action::AcceptInput, 1, &mut host),
//!     Outcome::Accept
//! );
//! ```
//!
//! # Modules
//!
//! - [`cell`]: unicode cell iteration and display widths
//! - [`buffer`]: the line buffer and its mutation primitives
//! - [`screen`]: wrapped screen lines and the host contract
//! - [`editor`]: the owning aggregate and vertical navigation
//! - [`action`]: the closed action set and dispatcher

pub mod action;
pub mod buffer;
pub mod cell;
pub mod editor;
mod movement;
pub mod screen;

pub use action::{Action, Outcome};
pub use buffer::{EditBuffer, Position};
pub use cell::CellIter;
pub use editor::LineEditor;
pub use screen::{EditorHost, HardWrapLayout, LayoutError, ScreenLine};
