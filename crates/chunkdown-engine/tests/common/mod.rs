#![allow(dead_code)]

use chunkdown_engine::{Segment, SegmentKind, StreamSession};

pub fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

pub fn text_of(units: &[u16], start: u32, end: u32) -> String {
    String::from_utf16_lossy(&units[start as usize..end as usize])
}

/// Collapses a segment stream into `(kind, kept-text)` groups.
///
/// Adjacent same-kind segments concatenate until a break marker or a kind
/// change closes the group, which also merges partial runs flushed at chunk
/// boundaries back together.
pub fn groups(segments: &[Segment], units: &[u16]) -> Vec<(SegmentKind, String)> {
    let mut out: Vec<(SegmentKind, String)> = Vec::new();
    let mut group_open = false;
    for seg in segments {
        if seg.kind == SegmentKind::Break {
            group_open = false;
            continue;
        }
        let text = text_of(units, seg.start, seg.end);
        if group_open {
            if let Some(last) = out.last_mut() {
                if last.0 == seg.kind {
                    last.1.push_str(&text);
                    continue;
                }
            }
        }
        out.push((seg.kind, text));
        group_open = true;
    }
    out
}

/// Non-break segments with adjacent contiguous same-kind runs merged: the
/// canonical form for comparing chunked against single-push output.
pub fn normalize(segments: &[Segment]) -> Vec<(SegmentKind, u32, u32)> {
    let mut out: Vec<(SegmentKind, u32, u32)> = Vec::new();
    for seg in segments {
        if seg.kind == SegmentKind::Break {
            continue;
        }
        if let Some(last) = out.last_mut() {
            if last.0 == seg.kind && last.2 == seg.start {
                last.2 = seg.end;
                continue;
            }
        }
        out.push((seg.kind, seg.start, seg.end));
    }
    out
}

/// Pushes `units` through a fresh session in chunks of the given sizes,
/// cycling through `sizes` until the input is exhausted.
pub fn run_chunked(mut session: StreamSession, units: &[u16], sizes: &[usize]) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut i = 0;
    let mut k = 0;
    while i < units.len() {
        let step = if sizes.is_empty() {
            units.len()
        } else {
            sizes[k % sizes.len()].max(1)
        };
        k += 1;
        let end = (i + step).min(units.len());
        out.extend(session.push(&units[i..end]));
        i = end;
    }
    out
}
