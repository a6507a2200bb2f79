// Chunk: docs/chunks/gap_buffer_engine - Gap buffer engine with grapheme bookkeeping

//! Gap buffer storage engine.
//!
//! Text lives in a contiguous array of code units with a movable hole (the
//! gap) at the cursor. Insertions write into the gap and deletions extend it,
//! so the edits typical of interactive editing complete without shifting the
//! bulk of the text; moving the cursor by *k* graphemes copies only the code
//! units crossed.
//!
//! One code unit is one `char` is one code point, so positional math never
//! decodes a variable-width encoding. The only Unicode cost is grapheme
//! clustering, and the engine keeps per-side grapheme counts so that
//! `len()` and `cursor_pos()` stay O(1) on both the fast path (grapheme ==
//! code point) and the slow path (multi-code-point clusters present).

use std::ops::Range;

use crate::grapheme;
use crate::types::{BufIdx, CpIdx, Error, GrpmIdx, LineNumber};

/// Gap size used by [`GapBuffer::from_str`] and [`Default`].
pub const DEFAULT_GAP_SIZE: usize = 64;

/// A Unicode-aware gap buffer.
///
/// The backing store is laid out as `[content before gap | gap | content
/// after gap]`; the logical content is the two sides concatenated and the
/// gap bytes are meaningless. The cursor is the position at the start of the
/// gap, expressed in graphemes and 1-based: `cursor_pos() ==
/// content-before-gap grapheme count + 1`.
///
/// Every mutation returns the post-operation cursor position, so callers can
/// sanity-check `>= 1` without a second query.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// The backing store. Gap cells hold `'\0'` but are never content.
    data: Vec<char>,
    /// Raw index where the gap starts (first unused cell).
    gap_start: usize,
    /// Raw index where the gap ends (first used cell after the gap).
    gap_end: usize,
    /// Gap size restored by every reallocation. Always > 1.
    configured_gap_size: usize,
    /// Grapheme count of the content before the gap.
    before_grpm: usize,
    /// Grapheme count of the content after the gap.
    after_grpm: usize,
    /// Whether the content holds at least one cluster spanning more than one
    /// code point. Conservative: deletions never clear it; the next
    /// reallocation or explicit recheck does.
    has_combining: bool,
    /// When set, every grapheme-aware path pretends `has_combining` is
    /// false. Display semantics for combined clusters degrade; the caller
    /// accepts that trade.
    force_fast: bool,
    /// Number of reallocations since construction. Monotone.
    realloc_count: u64,
    /// Number of reallocations that had to extend the gap. Monotone.
    gap_extension_count: u64,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl GapBuffer {
    // ==================== Construction ====================

    /// Creates a buffer holding `text` with a gap of `gap_size` cells.
    ///
    /// Layout is `[gap | text]` and the cursor starts at position 1. The
    /// text is scanned once to decide the Unicode path and populate the
    /// grapheme caches.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when `gap_size <= 1`.
    pub fn new(text: &str, gap_size: usize) -> Result<Self, Error> {
        if gap_size <= 1 {
            return Err(Error::InvalidConfiguration { gap_size });
        }

        let mut data = Vec::with_capacity(gap_size + text.chars().count());
        data.resize(gap_size, '\0');
        data.extend(text.chars());

        let mut buf = Self {
            data,
            gap_start: 0,
            gap_end: gap_size,
            configured_gap_size: gap_size,
            before_grpm: 0,
            after_grpm: 0,
            has_combining: false,
            force_fast: false,
            realloc_count: 0,
            gap_extension_count: 0,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        };
        buf.refresh_unicode_state();
        Ok(buf)
    }

    /// Creates a buffer holding `text` with the default gap size.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        match Self::new(text, DEFAULT_GAP_SIZE) {
            Ok(buf) => buf,
            // DEFAULT_GAP_SIZE > 1, so construction cannot fail.
            Err(_) => unreachable!("default gap size is valid"),
        }
    }

    // ==================== Queries ====================

    /// Returns the logical length in graphemes. O(1).
    pub fn len(&self) -> usize {
        self.before_grpm + self.after_grpm
    }

    /// Returns true if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.content_cp_len() == 0
    }

    /// Returns the logical length in code points. O(1).
    pub fn content_cp_len(&self) -> usize {
        self.data.len() - self.current_gap_size()
    }

    /// Returns the current gap size in code units.
    pub fn current_gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Returns the content before the gap as a borrowed slice.
    ///
    /// The borrow is tied to the buffer, so it cannot be held across a
    /// mutation (mutations may reallocate the backing store).
    pub fn content_before_gap(&self) -> &[char] {
        &self.data[..self.gap_start]
    }

    /// Returns the content after the gap as a borrowed slice.
    ///
    /// Same borrow rules as [`content_before_gap`](Self::content_before_gap).
    pub fn content_after_gap(&self) -> &[char] {
        &self.data[self.gap_end..]
    }

    /// Returns an iterator over the logical content, code unit by code unit.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Returns the logical content as a newly allocated string.
    ///
    /// Prefer [`content_before_gap`](Self::content_before_gap) /
    /// [`content_after_gap`](Self::content_after_gap) for zero-copy reads.
    pub fn content(&self) -> String {
        self.chars().collect()
    }

    /// Returns an iterator over the logical content, grapheme by grapheme.
    ///
    /// Honors the Unicode mode: on the fast path every code unit is its own
    /// grapheme.
    pub fn graphemes(&self) -> Box<dyn Iterator<Item = String> + '_> {
        if self.uses_fast_path() {
            Box::new(self.chars().map(|c| c.to_string()))
        } else {
            Box::new(grapheme::clusters(self.chars()))
        }
    }

    /// Returns the cursor position: a 1-based grapheme position, always >= 1.
    pub fn cursor_pos(&self) -> GrpmIdx {
        GrpmIdx::new(self.before_grpm + 1)
    }

    /// Returns true if the content holds a cluster spanning more than one
    /// code point. May stay conservatively true after a deletion removed the
    /// last such cluster, until the next reallocation or recheck.
    pub fn has_combining_graphemes(&self) -> bool {
        self.has_combining
    }

    /// Returns the number of reallocations performed since construction.
    pub fn realloc_count(&self) -> u64 {
        self.realloc_count
    }

    /// Returns the number of reallocations that had to extend the gap.
    pub fn gap_extension_count(&self) -> u64 {
        self.gap_extension_count
    }

    // ==================== Cursor movement ====================

    /// Moves the cursor forward by up to `n` graphemes, clamped at the end.
    ///
    /// The gap is repositioned by copying the crossed code units from the
    /// far side of the gap to the near side. Returns the new cursor
    /// position.
    pub fn cursor_forward(&mut self, n: usize) -> GrpmIdx {
        if n == 0 || self.gap_end == self.data.len() {
            return self.cursor_pos();
        }

        let (cu, moved) = if self.uses_fast_path() {
            let d = n.min(self.data.len() - self.gap_end);
            (d, d)
        } else {
            self.stride_after_gap(n)
        };

        if cu > 0 {
            // copy_within is memmove: safe even when source and destination
            // ranges overlap mid-gap.
            self.data
                .copy_within(self.gap_end..self.gap_end + cu, self.gap_start);
            self.gap_start += cu;
            self.gap_end += cu;
            self.before_grpm += moved;
            self.after_grpm -= moved;
        }

        self.assert_caches_consistent();
        self.cursor_pos()
    }

    /// Moves the cursor backward by up to `n` graphemes, clamped at the
    /// start. Returns the new cursor position.
    pub fn cursor_backward(&mut self, n: usize) -> GrpmIdx {
        if n == 0 || self.gap_start == 0 {
            return self.cursor_pos();
        }

        let (cu, moved) = if self.uses_fast_path() {
            let d = n.min(self.gap_start);
            (d, d)
        } else {
            self.stride_before_gap(n)
        };

        if cu > 0 {
            self.data
                .copy_within(self.gap_start - cu..self.gap_start, self.gap_end - cu);
            self.gap_start -= cu;
            self.gap_end -= cu;
            self.before_grpm -= moved;
            self.after_grpm += moved;
        }

        self.assert_caches_consistent();
        self.cursor_pos()
    }

    /// Moves the cursor to `pos`, clamped to `[1, len() + 1]`. Returns the
    /// new cursor position.
    pub fn set_cursor_pos(&mut self, pos: GrpmIdx) -> GrpmIdx {
        let pos = pos.get().clamp(1, self.len() + 1);
        let current = self.before_grpm + 1;
        if pos > current {
            self.cursor_forward(pos - current)
        } else if pos < current {
            self.cursor_backward(current - pos)
        } else {
            self.cursor_pos()
        }
    }

    // ==================== Deletion ====================

    /// Deletes up to `n` graphemes before the cursor, clamped at the start.
    ///
    /// Only the gap boundary moves; no data is copied. The combining flag is
    /// not rechecked; it may stay conservatively set until the next
    /// reallocation. Returns the new cursor position.
    pub fn delete_left(&mut self, n: usize) -> GrpmIdx {
        if n == 0 || self.gap_start == 0 {
            return self.cursor_pos();
        }

        let (cu, removed) = if self.uses_fast_path() {
            let d = n.min(self.gap_start);
            (d, d)
        } else {
            self.stride_before_gap(n)
        };

        self.gap_start -= cu;
        self.before_grpm -= removed;

        self.assert_caches_consistent();
        self.cursor_pos()
    }

    /// Deletes up to `n` graphemes after the cursor, clamped at the end.
    ///
    /// Same gap-extension-only behavior as [`delete_left`](Self::delete_left).
    /// Returns the (unchanged) cursor position.
    pub fn delete_right(&mut self, n: usize) -> GrpmIdx {
        if n == 0 || self.gap_end == self.data.len() {
            return self.cursor_pos();
        }

        let (cu, removed) = if self.uses_fast_path() {
            let d = n.min(self.data.len() - self.gap_end);
            (d, d)
        } else {
            self.stride_after_gap(n)
        };

        self.gap_end += cu;
        self.after_grpm -= removed;

        self.assert_caches_consistent();
        self.cursor_pos()
    }

    // ==================== Insertion ====================

    /// Inserts `text` at the cursor. Returns the new cursor position.
    ///
    /// When the text fits strictly inside the current gap it is written in
    /// place; otherwise the buffer reallocates. A fast-path buffer that
    /// receives combining text switches to the slow path before its caches
    /// are updated.
    pub fn add_text(&mut self, text: &str) -> GrpmIdx {
        let cu_len = text.chars().count();
        if cu_len == 0 {
            return self.cursor_pos();
        }

        if cu_len < self.current_gap_size() {
            if !self.has_combining && grapheme::str_has_combining(text) {
                self.has_combining = true;
            }
            let added = if self.uses_fast_path() {
                cu_len
            } else {
                grapheme::count_str(text)
            };

            for (i, ch) in text.chars().enumerate() {
                self.data[self.gap_start + i] = ch;
            }
            self.gap_start += cu_len;
            self.before_grpm += added;
        } else {
            self.reallocate(text);
        }

        self.assert_caches_consistent();
        self.cursor_pos()
    }

    /// Ensures the gap is at least the configured size, splicing
    /// `text_to_add` in just before it. Returns the new cursor position.
    ///
    /// This is the only operation that moves the bulk of the text. It also
    /// rescans the whole content, so a conservatively set combining flag
    /// heals here.
    pub fn reallocate(&mut self, text_to_add: &str) -> GrpmIdx {
        let old_after_len = self.data.len() - self.gap_end;

        let mut splice_in: Vec<char> = text_to_add.chars().collect();
        let add_len = splice_in.len();

        let current = self.current_gap_size();
        if current < self.configured_gap_size {
            self.gap_extension_count += 1;
            splice_in.resize(add_len + (self.configured_gap_size - current), '\0');
        }

        let _ = self.data.splice(self.gap_start..self.gap_start, splice_in);
        self.gap_start += add_len;
        self.gap_end = self.data.len() - old_after_len;
        self.realloc_count += 1;

        self.refresh_unicode_state();
        self.assert_caches_consistent();
        self.cursor_pos()
    }

    /// Discards all state and reinitializes with `text`.
    ///
    /// With `move_cursor_to_end` the layout is `[text | gap]` and the cursor
    /// lands after the last grapheme; otherwise `[gap | text]` with the
    /// cursor at 1. The reallocation counters describe the instance, not the
    /// content, and survive. Returns the new cursor position.
    pub fn clear(&mut self, text: &str, move_cursor_to_end: bool) -> GrpmIdx {
        let gap = self.configured_gap_size;
        let mut data: Vec<char>;

        if move_cursor_to_end {
            data = text.chars().collect();
            let text_len = data.len();
            data.resize(text_len + gap, '\0');
            self.gap_start = text_len;
            self.gap_end = text_len + gap;
        } else {
            data = Vec::with_capacity(gap + text.chars().count());
            data.resize(gap, '\0');
            data.extend(text.chars());
            self.gap_start = 0;
            self.gap_end = gap;
        }
        self.data = data;

        self.refresh_unicode_state();
        self.assert_caches_consistent();
        self.cursor_pos()
    }

    // ==================== Indexing and slicing ====================

    /// Returns the grapheme at 0-based index `idx` as its code-unit sequence.
    ///
    /// Fails with [`Error::OutOfBounds`] outside `[0, len())`.
    pub fn grapheme_at(&self, idx: GrpmIdx) -> Result<String, Error> {
        let i = idx.get();
        let len = self.len();
        if i >= len {
            return Err(Error::OutOfBounds { index: i, len });
        }

        if self.uses_fast_path() {
            let raw = self.content_idx_to_buffer_idx(CpIdx::new(i));
            Ok(self.data[raw.get()].to_string())
        } else {
            grapheme::clusters(self.chars())
                .nth(i)
                .ok_or(Error::OutOfBounds { index: i, len })
        }
    }

    /// Returns the code units covering graphemes `range.start` (inclusive)
    /// through `range.end` (exclusive), newly allocated.
    ///
    /// Fails with [`Error::OutOfBounds`] when the range is inverted or its
    /// end exceeds `len()`.
    pub fn slice(&self, range: Range<GrpmIdx>) -> Result<String, Error> {
        let (a, b) = (range.start.get(), range.end.get());
        let len = self.len();
        if a > b || b > len {
            return Err(Error::OutOfBounds { index: a.max(b), len });
        }
        if a == b {
            return Ok(String::new());
        }

        if self.uses_fast_path() {
            Ok(self.slice_cp(a, b))
        } else {
            Ok(grapheme::clusters(self.chars()).skip(a).take(b - a).collect())
        }
    }

    /// Copies the logical code-point range `a..b` out of the two sides.
    fn slice_cp(&self, a: usize, b: usize) -> String {
        let gap = self.current_gap_size();
        if b <= self.gap_start {
            self.data[a..b].iter().collect()
        } else if a >= self.gap_start {
            self.data[a + gap..b + gap].iter().collect()
        } else {
            let mut out = String::with_capacity(b - a);
            out.extend(&self.data[a..self.gap_start]);
            out.extend(&self.data[self.gap_end..b + gap]);
            out
        }
    }

    /// Converts a logical code-point index (gap absent) to a raw index into
    /// the backing array (gap present).
    ///
    /// The caller must pass an index below [`content_cp_len`](Self::content_cp_len).
    pub fn content_idx_to_buffer_idx(&self, idx: CpIdx) -> BufIdx {
        let i = idx.get();
        if i >= self.gap_start {
            BufIdx::new(i + self.current_gap_size())
        } else {
            BufIdx::new(i)
        }
    }

    // ==================== Positional conversions ====================

    /// Converts a 0-based grapheme position to its code-point offset,
    /// clamped to the content.
    pub fn grpm_pos_to_cp_pos(&self, pos: GrpmIdx) -> CpIdx {
        let g = pos.get().min(self.len());
        if self.uses_fast_path() {
            CpIdx::new(g)
        } else {
            let cu: usize = grapheme::clusters(self.chars())
                .take(g)
                .map(|c| c.chars().count())
                .sum();
            CpIdx::new(cu)
        }
    }

    /// Converts a code-point offset to the count of graphemes fully
    /// contained before it, clamped to the content.
    pub fn cp_pos_to_grpm_pos(&self, pos: CpIdx) -> GrpmIdx {
        let cp = pos.get().min(self.content_cp_len());
        if self.uses_fast_path() {
            return GrpmIdx::new(cp);
        }

        let mut used = 0;
        let mut graphemes = 0;
        for cluster in grapheme::clusters(self.chars()) {
            let stride = cluster.chars().count();
            if used + stride > cp {
                break;
            }
            used += stride;
            graphemes += 1;
        }
        GrpmIdx::new(graphemes)
    }

    // ==================== Line queries ====================
    // TODO: cache a line-offset table instead of rescanning on every call.

    /// Returns the number of lines. A buffer always has at least one line.
    pub fn num_lines(&self) -> usize {
        self.chars().filter(|&c| c == '\n').count() + 1
    }

    /// Returns the 1-based line ordinal containing the code-point position
    /// `pos`. A position equal to the content length is on the last line.
    ///
    /// Fails with [`Error::OutOfBounds`] past the content.
    pub fn line_num_at_pos(&self, pos: CpIdx) -> Result<LineNumber, Error> {
        let cp = pos.get();
        let cp_len = self.content_cp_len();
        if cp > cp_len {
            return Err(Error::OutOfBounds { index: cp, len: cp_len });
        }
        let terminators = self.chars().take(cp).filter(|&c| c == '\n').count();
        Ok(LineNumber::new(terminators + 1))
    }

    /// Returns the end-exclusive grapheme range of the given line's content,
    /// terminator excluded. An empty line yields an empty range.
    ///
    /// Fails with [`Error::OutOfBounds`] when the ordinal leaves
    /// `[1, num_lines()]`.
    pub fn line_bounds(&self, line: LineNumber) -> Result<Range<GrpmIdx>, Error> {
        let wanted = line.get();
        let total = self.num_lines();
        if wanted == 0 || wanted > total {
            return Err(Error::OutOfBounds { index: wanted, len: total });
        }

        let mut start_cp = 0;
        let mut end_cp = self.content_cp_len();
        let mut current = 1;
        for (i, ch) in self.chars().enumerate() {
            if ch == '\n' {
                if current == wanted {
                    end_cp = i;
                    break;
                }
                current += 1;
                start_cp = i + 1;
            }
        }

        Ok(self.cp_pos_to_grpm_pos(CpIdx::new(start_cp))..self.cp_pos_to_grpm_pos(CpIdx::new(end_cp)))
    }

    // ==================== Configuration ====================

    /// Returns the configured gap size.
    pub fn configured_gap_size(&self) -> usize {
        self.configured_gap_size
    }

    /// Changes the configured gap size and reallocates to honor it.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when `size <= 1`.
    pub fn set_configured_gap_size(&mut self, size: usize) -> Result<GrpmIdx, Error> {
        if size <= 1 {
            return Err(Error::InvalidConfiguration { gap_size: size });
        }
        self.configured_gap_size = size;
        Ok(self.reallocate(""))
    }

    /// Returns whether fast mode is forced.
    pub fn force_fast_mode(&self) -> bool {
        self.force_fast
    }

    /// Forces or releases fast mode.
    ///
    /// While forced, grapheme-aware paths treat every code unit as its own
    /// grapheme even if combining content is present. Releasing triggers a
    /// full recheck of the content.
    pub fn set_force_fast_mode(&mut self, on: bool) {
        self.force_fast = on;
        if on {
            // Caches flip to code-point units to match the forced path.
            self.before_grpm = self.gap_start;
            self.after_grpm = self.data.len() - self.gap_end;
        } else {
            self.refresh_unicode_state();
        }
    }

    // ==================== Snapshot and debugging ====================

    /// Returns an independently owned deep copy, suitable for snapshotting.
    pub fn save(&self) -> GapBuffer {
        self.clone()
    }

    /// Returns a human-readable dump of the buffer state. Development aid.
    pub fn debug_content(&self) -> String {
        let before: String = self.content_before_gap().iter().collect();
        let after: String = self.content_after_gap().iter().collect();
        let mode = match (self.force_fast, self.has_combining) {
            (true, _) => "fast (forced)",
            (false, false) => "fast",
            (false, true) => "slow",
        };
        format!(
            "GapBuffer: {} graphemes ({} + {}), {} code points, cursor {}\n\
             gap {}..{} (size {}, configured {}), mode {}, combining {}\n\
             reallocs {}, gap extensions {}\n\
             {:?} <gap> {:?}",
            self.len(),
            self.before_grpm,
            self.after_grpm,
            self.content_cp_len(),
            self.cursor_pos(),
            self.gap_start,
            self.gap_end,
            self.current_gap_size(),
            self.configured_gap_size,
            mode,
            self.has_combining,
            self.realloc_count,
            self.gap_extension_count,
            before,
            after,
        )
    }

    // ==================== Internals ====================

    fn uses_fast_path(&self) -> bool {
        self.force_fast || !self.has_combining
    }

    /// Measures up to `n` graphemes after the gap: (code units, graphemes).
    fn stride_after_gap(&self, n: usize) -> (usize, usize) {
        let after = &self.data[self.gap_end..];
        let mut cu = 0;
        let mut graphemes = 0;
        for cluster in grapheme::clusters(after.iter().copied()).take(n) {
            cu += cluster.chars().count();
            graphemes += 1;
        }
        (cu, graphemes)
    }

    /// Measures up to the last `n` graphemes before the gap.
    fn stride_before_gap(&self, n: usize) -> (usize, usize) {
        let strides = grapheme::strides(&self.data[..self.gap_start]);
        let take = n.min(strides.len());
        let cu = strides[strides.len() - take..].iter().sum();
        (cu, take)
    }

    /// Rescans the content: combining flag and both grapheme caches.
    fn refresh_unicode_state(&mut self) {
        let before = &self.data[..self.gap_start];
        let after = &self.data[self.gap_end..];
        self.has_combining = grapheme::has_combining(before) || grapheme::has_combining(after);
        if self.uses_fast_path() {
            self.before_grpm = before.len();
            self.after_grpm = after.len();
        } else {
            self.before_grpm = grapheme::count(before);
            self.after_grpm = grapheme::count(after);
        }
    }

    /// Debug assertion: gap geometry and grapheme caches against a
    /// from-scratch recount.
    ///
    /// Uses a mutation counter so the O(n) recount doesn't tank perf in
    /// tight loops: checks every 64th mutation. Compiled out in release
    /// builds.
    #[cfg(debug_assertions)]
    fn assert_caches_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        assert!(
            self.gap_start <= self.gap_end && self.gap_end <= self.data.len(),
            "gap geometry violated: {}..{} in {} cells",
            self.gap_start,
            self.gap_end,
            self.data.len(),
        );
        // The caches may read high after an insertion fused with a
        // neighboring cluster (heals on reallocation), never low.
        let expected_before = if self.uses_fast_path() {
            self.gap_start
        } else {
            grapheme::count(&self.data[..self.gap_start])
        };
        let expected_after = if self.uses_fast_path() {
            self.data.len() - self.gap_end
        } else {
            grapheme::count(&self.data[self.gap_end..])
        };
        assert!(
            self.before_grpm >= expected_before && self.after_grpm >= expected_after,
            "grapheme cache drift after {} mutations: cached {} + {}, recounted {} + {}",
            self.debug_mutation_count,
            self.before_grpm,
            self.after_grpm,
            expected_before,
            expected_after,
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_caches_consistent(&mut self) {}
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::from_str("")
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
