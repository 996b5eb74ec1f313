//! Property-based tests: structural invariants that must hold for any input
//! and any chunking, not just crafted examples.

mod common;

use chunkdown_engine::{split_by_xml, Segment, SegmentKind, StreamSession};
use proptest::prelude::*;

use common::{normalize, run_chunked};

/// Markdown-ish fragments; concatenations of these hit every recognizer,
/// including half-open and malformed constructs.
fn fragment() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a", "bc d", "\n", "# ", "## head\n", "> ", "- ", "1. ", "12. x\n", "* ", "+ ", "```",
        "```rust\n", "`", "**", "*", "~~", "__", "$", "$$", "\\[", "\\]", "\\(", "\\)", "|",
        "| a | b |\n", "| - | - |\n", "---\n", "- - -\n", "___", "![i](u)", "![i](", "[t](u)",
        "[t]", "<plan>", "</plan>", "<plan a=\"b\">", "<tool>", "</tool>", "<br/>", "<", ">",
        "。", "，", "see: ", "é", "漢字",
    ])
    .prop_map(str::to_string)
}

fn doc() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(fragment(), 0..48).prop_map(|parts| {
        parts.concat().encode_utf16().collect()
    })
}

/// Sound output: breaks are zero-width; everything else is a well-formed,
/// in-bounds span; spans are ordered and disjoint.
fn assert_segment_invariants(segments: &[Segment], total: usize) {
    let mut prev_end = 0u32;
    for seg in segments {
        if seg.kind == SegmentKind::Break {
            assert_eq!(seg.start, seg.end, "break must be zero-width: {seg:?}");
            continue;
        }
        assert!(seg.start < seg.end, "empty content span: {seg:?}");
        assert!(
            seg.end as usize <= total,
            "span past end of input: {seg:?} (total {total})"
        );
        assert!(
            seg.start >= prev_end,
            "overlapping or out-of-order span: {seg:?} (prev end {prev_end})"
        );
        prev_end = seg.end;
    }
}

proptest! {
    #[test]
    fn block_push_is_total_and_sound(units in doc()) {
        let mut session = StreamSession::block();
        let segments = session.push(&units);
        assert_segment_invariants(&segments, units.len());
    }

    #[test]
    fn inline_push_is_total_and_sound(units in doc()) {
        let mut session = StreamSession::inline();
        let segments = session.push(&units);
        assert_segment_invariants(&segments, units.len());
    }

    #[test]
    fn block_chunking_is_invariant(
        units in doc(),
        sizes in prop::collection::vec(1usize..24, 1..6),
    ) {
        let mut one = StreamSession::block();
        let single = one.push(&units);
        let chunked = run_chunked(StreamSession::block(), &units, &sizes);

        assert_segment_invariants(&chunked, units.len());
        prop_assert_eq!(normalize(&single), normalize(&chunked));
    }

    #[test]
    fn inline_chunking_is_invariant(
        units in doc(),
        sizes in prop::collection::vec(1usize..24, 1..6),
    ) {
        let mut one = StreamSession::inline();
        let single = one.push(&units);
        let chunked = run_chunked(StreamSession::inline(), &units, &sizes);

        prop_assert_eq!(normalize(&single), normalize(&chunked));
    }

    /// One push per code unit is the worst case the engine sees in
    /// production (token-by-token streaming).
    #[test]
    fn single_unit_pushes_match_whole_push(units in doc()) {
        let mut one = StreamSession::block();
        let single = one.push(&units);
        let streamed = run_chunked(StreamSession::block(), &units, &[1]);
        prop_assert_eq!(normalize(&single), normalize(&streamed));
    }

    #[test]
    fn xml_split_tiles_the_input(units in doc()) {
        let spans = split_by_xml(&units);
        let mut pos = 0u32;
        for span in &spans {
            prop_assert_eq!(span.start, pos, "gap or overlap at {}", span.start);
            prop_assert!(span.end > span.start, "empty span {:?}", span);
            pos = span.end;
        }
        prop_assert_eq!(pos, units.len() as u32, "input not fully covered");
    }

    #[test]
    fn arbitrary_code_units_never_panic(units in prop::collection::vec(any::<u16>(), 0..512)) {
        let mut session = StreamSession::block();
        let segments = session.push(&units);
        assert_segment_invariants(&segments, units.len());
        let _ = split_by_xml(&units);
    }
}
