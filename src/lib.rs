// Chunk: docs/chunks/gap_buffer_engine - Gap buffer engine with grapheme bookkeeping
// Chunk: docs/chunks/grapheme_clusters - Grapheme cluster segmentation helpers
// Chunk: docs/chunks/positional_types - Typed positional index spaces
// Chunk: docs/chunks/extractors - Line and word extractors

//! unicode-gap-buffer: a Unicode-aware gap buffer, the editing substrate for
//! an interactive text editor.
//!
//! The buffer stores one logical sequence of user-visible characters
//! (graphemes) in a contiguous array of 32-bit code units with a movable gap
//! at the cursor. Local edits (insert, delete, move one position) complete
//! without shifting the bulk of the text; the gap is refilled by occasional
//! reallocation.
//!
//! # Overview
//!
//! The main type is [`GapBuffer`]:
//! - cursor movement, insertion, and deletion by grapheme
//! - indexing and slicing by grapheme, with owned results
//! - zero-copy reads of the content on either side of the gap
//! - line queries and conversions between positional spaces
//!
//! On top of its read-side interface sit two extractors, [`lines`] and
//! [`words`]: bounded, bidirectional, predicate-filtered enumerations that
//! emit [`Subject`] values and stop walking as soon as the budget is met.
//!
//! Positions come in three distinct spaces ([`GrpmIdx`], [`CpIdx`],
//! [`BufIdx`]) that do not convert implicitly; see [`GrpmIdx`] for the
//! 0-based/1-based conventions.
//!
//! # Example
//!
//! ```
//! use unicode_gap_buffer::{GapBuffer, GrpmIdx};
//!
//! let mut buf = GapBuffer::from_str("hello world");
//! buf.cursor_forward(5);
//! assert_eq!(buf.cursor_pos(), GrpmIdx::new(6));
//!
//! buf.add_text(",");
//! assert_eq!(buf.content(), "hello, world");
//! assert_eq!(buf.len(), 12);
//! ```
//!
//! # Unicode modes
//!
//! Content without multi-code-point clusters runs on a fast path where
//! grapheme count equals code-point count and every positional operation is
//! direct. Combining marks, ZWJ emoji, and regional-indicator pairs switch
//! the buffer to a slow path that strides by grapheme cluster. The switch is
//! automatic and observable via [`GapBuffer::has_combining_graphemes`];
//! callers that accept degraded display semantics for combined clusters can
//! pin the fast path with [`GapBuffer::set_force_fast_mode`].
//!
//! # Threading
//!
//! A `GapBuffer` is exclusively owned by one editor session; it is
//! single-threaded and not reentrant. Serializing access from outside is the
//! caller's concern.

mod gap_buffer;
mod grapheme;
mod lines;
mod subject;
mod types;
mod words;

pub use gap_buffer::{GapBuffer, DEFAULT_GAP_SIZE};
pub use lines::{lines, lines_all};
pub use subject::Subject;
pub use types::{BufIdx, CpIdx, Direction, Error, GrpmIdx, LineNumber};
pub use words::{words, words_all, WordSeparators};
