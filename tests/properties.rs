// Chunk: docs/chunks/gap_buffer_engine - Gap buffer engine with grapheme bookkeeping

//! Property tests: the universal invariants must survive arbitrary mutation
//! sequences.
//!
//! Text is generated as a concatenation of self-contained grapheme clusters
//! (none starts with an extending code point), so inserted text never fuses
//! with its neighbors and grapheme arithmetic stays exact.

use proptest::prelude::*;
use unicode_gap_buffer::{GapBuffer, GrpmIdx};
use unicode_segmentation::UnicodeSegmentation;

fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

fn cluster_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("a"),
        Just("b"),
        Just("z"),
        Just(" "),
        Just("\n"),
        Just("é"),
        Just("ñ"),
        Just("r\u{0308}"),
        Just("a\u{20D1}"),
        Just("🙂"),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(cluster_strategy(), 0..24).prop_map(|v| v.concat())
}

#[derive(Debug, Clone)]
enum Op {
    Forward(usize),
    Backward(usize),
    SetCursor(usize),
    AddText(String),
    DeleteLeft(usize),
    DeleteRight(usize),
    Reallocate,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..20).prop_map(Op::Forward),
        (0usize..20).prop_map(Op::Backward),
        (0usize..48).prop_map(Op::SetCursor),
        text_strategy().prop_map(Op::AddText),
        (0usize..8).prop_map(Op::DeleteLeft),
        (0usize..8).prop_map(Op::DeleteRight),
        Just(Op::Reallocate),
    ]
}

/// Recomputes every cached quantity from scratch and compares.
fn assert_invariants(buf: &GapBuffer) {
    let before: String = buf.content_before_gap().iter().collect();
    let after: String = buf.content_after_gap().iter().collect();
    let content = buf.content();

    // Logical content is the concatenation of the two sides.
    assert_eq!(format!("{before}{after}"), content);

    // Cached grapheme length equals a from-scratch recount.
    assert_eq!(buf.len(), grapheme_count(&content));

    // Cursor is the before-gap grapheme count plus one, and at least 1.
    assert_eq!(buf.cursor_pos().get(), grapheme_count(&before) + 1);
    assert!(buf.cursor_pos().get() >= 1);

    // Code-point length is consistent with the raw sides.
    assert_eq!(
        buf.content_cp_len(),
        buf.content_before_gap().len() + buf.content_after_gap().len()
    );
}

proptest! {
    #[test]
    fn prop_invariants_survive_mutation_sequences(
        text in text_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..32),
    ) {
        let mut buf = GapBuffer::new(&text, 8).unwrap();
        assert_invariants(&buf);

        for op in ops {
            match op {
                Op::Forward(n) => { buf.cursor_forward(n); }
                Op::Backward(n) => { buf.cursor_backward(n); }
                Op::SetCursor(p) => { buf.set_cursor_pos(GrpmIdx::new(p)); }
                Op::AddText(t) => { buf.add_text(&t); }
                Op::DeleteLeft(n) => { buf.delete_left(n); }
                Op::DeleteRight(n) => { buf.delete_right(n); }
                Op::Reallocate => { buf.reallocate(""); }
            }
            prop_assert!(buf.cursor_pos().get() >= 1);
        }

        assert_invariants(&buf);
    }

    #[test]
    fn prop_forward_then_backward_restores(
        text in text_strategy(),
        start in 0usize..48,
        k in 0usize..48,
    ) {
        let mut buf = GapBuffer::from_str(&text);
        buf.set_cursor_pos(GrpmIdx::new(start.max(1)));

        let content = buf.content();
        let pos = buf.cursor_pos();

        // Clamp k so neither move hits a buffer end.
        let room = buf.len() + 1 - pos.get();
        let k = if room == 0 { 0 } else { k % (room + 1) };

        buf.cursor_forward(k);
        buf.cursor_backward(k);

        prop_assert_eq!(buf.cursor_pos(), pos);
        prop_assert_eq!(buf.content(), content);
    }

    #[test]
    fn prop_movement_never_changes_content(
        text in text_strategy(),
        moves in prop::collection::vec((0usize..32, any::<bool>()), 0..16),
    ) {
        let mut buf = GapBuffer::from_str(&text);
        let content = buf.content();
        for (n, forward) in moves {
            if forward {
                buf.cursor_forward(n);
            } else {
                buf.cursor_backward(n);
            }
            prop_assert_eq!(buf.content(), content.clone());
        }
    }

    #[test]
    fn prop_insert_then_delete_left_restores(
        text in text_strategy(),
        insert in text_strategy(),
        start in 0usize..48,
    ) {
        prop_assume!(!insert.is_empty());

        let mut buf = GapBuffer::from_str(&text);
        buf.set_cursor_pos(GrpmIdx::new(start.max(1)));

        let content = buf.content();
        let pos = buf.cursor_pos();

        buf.add_text(&insert);
        buf.delete_left(grapheme_count(&insert));

        prop_assert_eq!(buf.content(), content);
        prop_assert_eq!(buf.cursor_pos(), pos);
    }

    #[test]
    fn prop_slice_and_index_cohere(text in text_strategy(), idx in 0usize..48) {
        let buf = GapBuffer::from_str(&text);
        if buf.len() == 0 {
            return Ok(());
        }
        let i = idx % buf.len();
        let single = buf.grapheme_at(GrpmIdx::new(i)).unwrap();
        let sliced = buf.slice(GrpmIdx::new(i)..GrpmIdx::new(i + 1)).unwrap();
        prop_assert_eq!(single, sliced);
    }

    #[test]
    fn prop_reallocate_preserves_observations(
        text in text_strategy(),
        start in 0usize..48,
    ) {
        let mut buf = GapBuffer::new(&text, 4).unwrap();
        buf.set_cursor_pos(GrpmIdx::new(start.max(1)));

        let content = buf.content();
        let pos = buf.cursor_pos();
        let reallocs = buf.realloc_count();

        buf.reallocate("");

        prop_assert_eq!(buf.content(), content);
        prop_assert_eq!(buf.cursor_pos(), pos);
        prop_assert!(buf.current_gap_size() >= buf.configured_gap_size());
        prop_assert_eq!(buf.realloc_count(), reallocs + 1);
    }

    #[test]
    fn prop_force_fast_round_trip_restores_observations(
        text in text_strategy(),
    ) {
        let mut buf = GapBuffer::from_str(&text);
        let len = buf.len();
        let content = buf.content();

        buf.set_force_fast_mode(true);
        buf.set_force_fast_mode(false);

        prop_assert_eq!(buf.len(), len);
        prop_assert_eq!(buf.content(), content);
    }

    #[test]
    fn prop_full_sweep_and_back_is_identity(text in text_strategy()) {
        let mut buf = GapBuffer::from_str(&text);
        let content = buf.content();

        let end = buf.cursor_forward(usize::MAX);
        prop_assert_eq!(end.get(), buf.len() + 1);

        let start = buf.cursor_backward(usize::MAX);
        prop_assert_eq!(start.get(), 1);
        prop_assert_eq!(buf.content(), content);
    }
}
