// Chunk: docs/chunks/extractors - Line and word extractors

//! Word extractor: bounded, bidirectional, predicate-filtered enumeration of
//! word subjects.
//!
//! Words are maximal runs of non-separator graphemes; the separator set is
//! supplied by the caller ([`WordSeparators`], the settings-provider
//! contract). Separators are boundaries only; a run of separators never
//! forms a word.

use std::collections::HashSet;

use crate::gap_buffer::GapBuffer;
use crate::subject::Subject;
use crate::types::{Direction, GrpmIdx};

/// The set of code points that split words.
///
/// A grapheme counts as a word character unless *any* of its component code
/// points is in this set. The default covers ASCII whitespace and common
/// punctuation, with `_` deliberately left out.
#[derive(Debug, Clone)]
pub struct WordSeparators(HashSet<char>);

impl WordSeparators {
    /// Returns true if `ch` is a separator code point.
    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    /// Returns true if the grapheme cluster contains no separator code point.
    pub fn is_word_grapheme(&self, cluster: &str) -> bool {
        !cluster.chars().any(|c| self.0.contains(&c))
    }
}

impl Default for WordSeparators {
    fn default() -> Self {
        " \t\r\n!\"#$%&'()*+,-./:;<=>?@[\\]^`{|}~".chars().collect()
    }
}

impl FromIterator<char> for WordSeparators {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns up to `count` word subjects, walking grapheme by grapheme from
/// the 0-based position `from` in `direction`.
///
/// The walk starts *at* `from` (clamped to the content): starting inside a
/// word captures only the part of it in the direction of travel. Words
/// rejected by `predicate` are skipped without counting toward `count`. A
/// word still open when the walk reaches either end of the buffer is
/// finalized. Emitted subjects always read left-to-right.
pub fn words<P>(
    buf: &GapBuffer,
    from: GrpmIdx,
    direction: Direction,
    count: usize,
    separators: &WordSeparators,
    predicate: P,
) -> Vec<Subject>
where
    P: Fn(&Subject) -> bool,
{
    if count == 0 || buf.is_empty() {
        return Vec::new();
    }
    let start = from.get().min(buf.len() - 1);

    match direction {
        Direction::Front => {
            let stream = buf.graphemes().enumerate().skip(start);
            collect_words(stream, direction, count, separators, &predicate)
        }
        Direction::Back => {
            let prefix: Vec<String> = buf.graphemes().take(start + 1).collect();
            let stream = prefix.into_iter().enumerate().rev();
            collect_words(stream, direction, count, separators, &predicate)
        }
    }
}

/// [`words`] with the default accept-all predicate.
pub fn words_all(
    buf: &GapBuffer,
    from: GrpmIdx,
    direction: Direction,
    count: usize,
    separators: &WordSeparators,
) -> Vec<Subject> {
    words(buf, from, direction, count, separators, |_| true)
}

/// Runs the word state machine over a stream of (grapheme index, cluster)
/// pairs in travel order.
fn collect_words<I, P>(
    stream: I,
    direction: Direction,
    count: usize,
    separators: &WordSeparators,
    predicate: &P,
) -> Vec<Subject>
where
    I: Iterator<Item = (usize, String)>,
    P: Fn(&Subject) -> bool,
{
    let mut out = Vec::new();
    let mut run: Vec<String> = Vec::new();
    let mut lo = 0;
    let mut hi = 0;

    for (idx, cluster) in stream {
        if separators.is_word_grapheme(&cluster) {
            if run.is_empty() {
                lo = idx;
                hi = idx;
            } else {
                // Keep start at the lower index, end at the higher, no
                // matter which way we travel.
                match direction {
                    Direction::Front => hi = idx,
                    Direction::Back => lo = idx,
                }
            }
            run.push(cluster);
        } else if !run.is_empty() {
            finalize(&mut out, &mut run, lo, hi, direction, predicate);
            if out.len() == count {
                return out;
            }
        }
    }

    if !run.is_empty() {
        finalize(&mut out, &mut run, lo, hi, direction, predicate);
    }
    out
}

/// Fixes the running word's orientation, builds its subject, and emits it if
/// the predicate accepts.
fn finalize<P>(
    out: &mut Vec<Subject>,
    run: &mut Vec<String>,
    lo: usize,
    hi: usize,
    direction: Direction,
    predicate: &P,
) where
    P: Fn(&Subject) -> bool,
{
    if direction == Direction::Back {
        run.reverse();
    }
    let text: String = run.drain(..).collect();
    let subject = Subject::new(GrpmIdx::new(lo), GrpmIdx::new(hi), text);
    if predicate(&subject) {
        out.push(subject);
    }
}
