// Chunk: docs/chunks/positional_types - Typed positional index spaces

//! Nominal index types for the three positional spaces, plus the small
//! shared vocabulary of the crate.
//!
//! Grapheme, code-point, and raw-array offsets are all `usize` underneath,
//! which is exactly why they get distinct newtypes: an index in one space is
//! meaningless in another, and silent mixing is the classic gap-buffer bug.

use thiserror::Error;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(value: usize) -> Self {
                Self(value)
            }

            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(
    /// A grapheme index: the position of a user-visible character.
    ///
    /// Indexing and slicing use 0-based `GrpmIdx` values. The cursor-position
    /// surface (`cursor_pos`, `set_cursor_pos`) uses 1-based values: position
    /// `p` means the cursor sits immediately before the grapheme at index
    /// `p - 1`, and `cursor_pos() >= 1` always holds.
    GrpmIdx
);

index_type!(
    /// A code-point offset into the logical content, i.e. the text as if the
    /// gap were absent. 0-based.
    CpIdx
);

index_type!(
    /// A raw offset into the backing array, gap included. 0-based. Only
    /// meaningful to code that knows where the gap is.
    BufIdx
);

index_type!(
    /// A 1-based line ordinal within the buffer.
    LineNumber
);

/// Direction of travel for the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the end of the buffer.
    Front,
    /// Toward the start of the buffer.
    Back,
}

/// Contract violations. Every variant is a programmer error: the buffer
/// never fails due to external conditions, and no operation catches or
/// translates these.
///
/// The negative-count failure class from the design has no variant here:
/// counts are `usize`, so the type system discharges it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Gap size of 1 or less at construction or reconfiguration.
    #[error("gap size must be greater than 1, got {gap_size}")]
    InvalidConfiguration { gap_size: usize },

    /// Indexing, slicing, or a positional query outside the valid range.
    #[error("position {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_types_round_trip() {
        let g = GrpmIdx::new(3);
        assert_eq!(g.get(), 3);
        assert_eq!(g, GrpmIdx::from(3));
        assert_eq!(g.to_string(), "3");
    }

    #[test]
    fn test_index_ordering() {
        assert!(GrpmIdx::new(1) < GrpmIdx::new(2));
        assert!(CpIdx::new(0) < CpIdx::new(10));
        assert_eq!(LineNumber::new(5).to_string(), "5");
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration { gap_size: 1 };
        assert_eq!(err.to_string(), "gap size must be greater than 1, got 1");

        let err = Error::OutOfBounds { index: 9, len: 4 };
        assert_eq!(err.to_string(), "position 9 is out of bounds for length 4");
    }
}
