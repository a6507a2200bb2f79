// Chunk: docs/chunks/extractors - Line and word extractors

//! Line extractor: bounded, bidirectional, predicate-filtered enumeration of
//! line subjects.
//!
//! Stateless between calls and strictly read-only: the extractor consumes
//! the engine's positional conversions and line queries, nothing more.

use std::ops::Range;

use crate::gap_buffer::GapBuffer;
use crate::subject::Subject;
use crate::types::{Direction, GrpmIdx, LineNumber};

/// Returns up to `count` line subjects, starting from the line containing
/// the grapheme position `from` and walking in `direction`.
///
/// `from` is a 0-based grapheme index, clamped to the content. Lines
/// rejected by `predicate` are skipped without counting toward `count`.
/// Enumeration stops once `count` subjects were emitted or the line ordinal
/// leaves `[1, num_lines()]`.
pub fn lines<P>(
    buf: &GapBuffer,
    from: GrpmIdx,
    direction: Direction,
    count: usize,
    predicate: P,
) -> Vec<Subject>
where
    P: Fn(&Subject) -> bool,
{
    let mut out = Vec::new();
    if count == 0 {
        return out;
    }

    let cp = buf.grpm_pos_to_cp_pos(from);
    let mut line = match buf.line_num_at_pos(cp) {
        Ok(n) => n.get(),
        Err(_) => return out,
    };
    let total = buf.num_lines();

    loop {
        let Ok(range) = buf.line_bounds(LineNumber::new(line)) else {
            break;
        };
        let subject = line_subject(buf, range);
        if predicate(&subject) {
            out.push(subject);
            if out.len() == count {
                break;
            }
        }
        match direction {
            Direction::Front => {
                line += 1;
                if line > total {
                    break;
                }
            }
            Direction::Back => {
                if line == 1 {
                    break;
                }
                line -= 1;
            }
        }
    }

    out
}

/// [`lines`] with the default accept-all predicate.
pub fn lines_all(buf: &GapBuffer, from: GrpmIdx, direction: Direction, count: usize) -> Vec<Subject> {
    lines(buf, from, direction, count, |_| true)
}

/// Builds a subject from an end-exclusive line range. An empty line maps to
/// `start == end` with an empty payload.
fn line_subject(buf: &GapBuffer, range: Range<GrpmIdx>) -> Subject {
    let start = range.start;
    let end = range.end;
    let text = buf.slice(start..end).unwrap_or_default();
    let last = if end.get() > start.get() {
        GrpmIdx::new(end.get() - 1)
    } else {
        start
    };
    Subject::new(start, last, text)
}
