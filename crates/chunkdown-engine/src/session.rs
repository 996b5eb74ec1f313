use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::emit::RunEmitter;
use crate::plugin::{PluginState, StreamPlugin, NL};
use crate::plugins::{
    BlockBracketLatex, BlockDollarLatex, BlockQuote, Bold, FencedCode, Header, HorizontalRule,
    Image, InlineCode, InlineDollarLatex, InlineParenLatex, Italic, Link, OrderedList,
    PlanExecution, Strikethrough, Table, Underline, UnorderedList, XmlRegion,
};
use crate::segment::{Segment, SegmentKind};

struct RosterEntry {
    plugin: Box<dyn StreamPlugin>,
    kind: SegmentKind,
}

fn entry(plugin: impl StreamPlugin + 'static, kind: SegmentKind) -> RosterEntry {
    RosterEntry {
        plugin: Box::new(plugin),
        kind,
    }
}

/// An emission deferred by a `WaitFor` lookahead.
struct DeferredEmit {
    index: u32,
    keep: bool,
}

struct Waitfor {
    /// Line-start flag to hand the recognizer with the resolving code unit.
    at_line_start: bool,
    pending: Vec<DeferredEmit>,
}

/// A code unit queued for reprocessing with its original global index.
struct QueuedChar {
    c: u16,
    index: u32,
}

/// A streaming segmentation session.
///
/// Owns an ordered recognizer roster, the global UTF-16 code-unit offset and
/// all cross-chunk state. While no recognizer has committed, every code unit
/// is buffered and fed to the whole roster speculatively; the first
/// (lowest-indexed) recognizer to reach [`PluginState::Processing`] wins, the
/// buffered keep decisions replay under its tag, and the rest of the roster
/// resets. Roster order is grammar precedence.
///
/// `push` is synchronous and runs to completion; a session may be moved
/// across threads but must not be shared. Dropping the session discards any
/// buffered, unresolved input.
pub struct StreamSession {
    roster: Vec<RosterEntry>,
    global_offset: u32,
    at_line_start: bool,

    active: Option<usize>,
    active_kind: SegmentKind,

    eval_start: Option<u32>,
    /// Per buffered code unit, bit `i` records whether roster entry `i`
    /// voted keep.
    eval_votes: Vec<u32>,

    waitfor: Option<Waitfor>,
    queued: VecDeque<QueuedChar>,
}

impl StreamSession {
    /// Session over the block-level roster, in grammar-precedence order.
    pub fn block() -> Self {
        Self::with_roster(vec![
            entry(PlanExecution::new(true), SegmentKind::PlanExecution),
            entry(Header::new(true), SegmentKind::Header),
            entry(FencedCode::new(true), SegmentKind::CodeBlock),
            entry(BlockQuote::new(false), SegmentKind::BlockQuote),
            entry(OrderedList::new(true), SegmentKind::OrderedList),
            entry(UnorderedList::new(false), SegmentKind::UnorderedList),
            entry(HorizontalRule::new(true), SegmentKind::HorizontalRule),
            entry(BlockDollarLatex::new(false), SegmentKind::BlockLatex),
            // Delimiters stay on for the bracket family so a failed closer
            // never swallows a lone backslash.
            entry(BlockBracketLatex::new(true), SegmentKind::BlockLatex),
            entry(Table::new(true), SegmentKind::Table),
            entry(Image::new(true), SegmentKind::Image),
            entry(XmlRegion::new(true), SegmentKind::XmlBlock),
        ])
    }

    /// Session over the inline-level roster.
    pub fn inline() -> Self {
        Self::with_roster(vec![
            entry(Bold::new(false), SegmentKind::Bold),
            entry(Italic::new(false), SegmentKind::Italic),
            entry(InlineCode::new(false), SegmentKind::InlineCode),
            entry(Link::new(), SegmentKind::Link),
            entry(Strikethrough::new(false), SegmentKind::Strikethrough),
            entry(Underline::new(true), SegmentKind::Underline),
            entry(InlineDollarLatex::new(false), SegmentKind::InlineLatex),
            entry(InlineParenLatex::new(true), SegmentKind::InlineLatex),
        ])
    }

    fn with_roster(mut roster: Vec<RosterEntry>) -> Self {
        debug_assert!(roster.len() <= 32, "keep votes are tracked in a u32 mask");
        for e in &mut roster {
            e.plugin.init();
        }
        debug!(plugins = roster.len(), "segmentation session created");
        Self {
            roster,
            global_offset: 0,
            at_line_start: true,
            active: None,
            active_kind: SegmentKind::PlainText,
            eval_start: None,
            eval_votes: Vec::new(),
            waitfor: None,
            queued: VecDeque::new(),
        }
    }

    /// Processes one chunk of UTF-16 code units and returns every segment
    /// closed within it. An empty chunk yields no segments. Constructs still
    /// open at the end of the chunk stay pending for the next push.
    pub fn push(&mut self, chunk: &[u16]) -> Vec<Segment> {
        if chunk.is_empty() {
            return Vec::new();
        }

        let mut out = RunEmitter::new();
        let mut line_start = self.at_line_start;
        let mut i = 0;

        while i < chunk.len() || !self.queued.is_empty() {
            let (c, forced) = match self.queued.pop_front() {
                Some(q) => (q.c, Some(q.index)),
                None => {
                    let c = chunk[i];
                    i += 1;
                    (c, None)
                }
            };
            let sol = line_start;
            line_start = c == NL;
            self.process_code_unit(c, sol, forced, &mut out);
        }

        self.at_line_start = line_start;
        out.finish()
    }

    /// Re-encodes a `&str` chunk as UTF-16 code units and pushes it.
    pub fn push_str(&mut self, chunk: &str) -> Vec<Segment> {
        let units: Vec<u16> = chunk.encode_utf16().collect();
        self.push(&units)
    }

    fn process_code_unit(
        &mut self,
        c: u16,
        at_line_start: bool,
        forced_index: Option<u32>,
        out: &mut RunEmitter,
    ) {
        let g = match forced_index {
            Some(index) => index,
            None => {
                let index = self.global_offset;
                self.global_offset += 1;
                index
            }
        };

        // A pending lookahead resolves before anything else.
        if let Some(waitfor) = self.waitfor.take() {
            let Some(active) = self.active else {
                return;
            };
            let entry = &mut self.roster[active];
            let keep_next = entry.plugin.process_char(c, waitfor.at_line_start);

            if entry.plugin.state() == PluginState::Processing {
                // Confirmed: the deferred code unit belongs to the construct.
                for p in &waitfor.pending {
                    if p.keep {
                        out.keep(self.active_kind, p.index);
                    }
                }
                if keep_next {
                    out.keep(self.active_kind, g);
                }
                return;
            }

            // Rejected: deferred emissions degrade to plain text and the
            // current code unit is requeued for idle reprocessing under its
            // original index.
            trace!(at = g, "lookahead rejected");
            for p in &waitfor.pending {
                if p.keep {
                    out.keep(SegmentKind::PlainText, p.index);
                }
            }
            out.group_break(g);
            self.active = None;
            self.active_kind = SegmentKind::PlainText;
            for e in &mut self.roster {
                e.plugin.reset();
            }
            self.queued.push_front(QueuedChar { c, index: g });
            return;
        }

        // Committed recognizer consumes directly.
        if let Some(active) = self.active {
            let entry = &mut self.roster[active];
            let keep = entry.plugin.process_char(c, at_line_start);
            let state = entry.plugin.state();

            if state == PluginState::WaitFor {
                self.waitfor = Some(Waitfor {
                    at_line_start: c == NL,
                    pending: vec![DeferredEmit { index: g, keep }],
                });
                return;
            }
            if keep {
                out.keep(self.active_kind, g);
            }
            if state != PluginState::Processing {
                out.group_break(g + 1);
                self.active = None;
                self.active_kind = SegmentKind::PlainText;
            }
            return;
        }

        // Speculative evaluation across the whole roster.
        if self.eval_start.is_none() {
            self.eval_start = Some(g);
        }
        let mut votes = 0u32;
        for (pi, e) in self.roster.iter_mut().enumerate() {
            if e.plugin.process_char(c, at_line_start) {
                votes |= 1 << pi;
            }
        }
        self.eval_votes.push(votes);

        let winner = self
            .roster
            .iter()
            .position(|e| e.plugin.state() == PluginState::Processing);

        if let Some(winner) = winner {
            self.active = Some(winner);
            self.active_kind = self.roster[winner].kind;
            let start = self.eval_start.take().unwrap_or(g);
            trace!(kind = ?self.active_kind, start, "recognizer committed");

            // Force a fresh group even when the previous run had this kind.
            out.flush_run();
            for (bi, &mask) in self.eval_votes.iter().enumerate() {
                if mask & (1 << winner) != 0 {
                    out.keep(self.active_kind, start + bi as u32);
                }
            }
            self.eval_votes.clear();
            for (pi, e) in self.roster.iter_mut().enumerate() {
                if pi != winner {
                    e.plugin.reset();
                }
            }
            return;
        }

        let any_trying = self
            .roster
            .iter()
            .any(|e| e.plugin.state() == PluginState::Trying);
        if !any_trying {
            // Nobody wants the buffered prefix: it is plain text.
            let start = self.eval_start.take().unwrap_or(g);
            for bi in 0..self.eval_votes.len() {
                out.keep(SegmentKind::PlainText, start + bi as u32);
            }
            self.eval_votes.clear();
            for e in &mut self.roster {
                e.plugin.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let mut s = StreamSession::block();
        assert!(s.push(&[]).is_empty());
    }

    #[test]
    fn plain_text_coalesces_into_one_segment() {
        let mut s = StreamSession::block();
        let segs = s.push(&utf16("hello"));
        assert_eq!(segs, vec![Segment::new(SegmentKind::PlainText, 0, 5)]);
    }

    #[test]
    fn global_offset_spans_pushes() {
        let mut s = StreamSession::block();
        s.push(&utf16("ab"));
        let segs = s.push(&utf16("cd"));
        assert_eq!(segs, vec![Segment::new(SegmentKind::PlainText, 2, 4)]);
    }

    #[test]
    fn bold_wire_positions() {
        let mut s = StreamSession::inline();
        let segs = s.push(&utf16("a**b**c"));
        assert_eq!(
            segs,
            vec![
                Segment::new(SegmentKind::PlainText, 0, 1),
                Segment::new(SegmentKind::Bold, 3, 4),
                Segment::new(SegmentKind::Break, 6, 6),
                Segment::new(SegmentKind::PlainText, 6, 7),
            ]
        );
    }

    #[test]
    fn unresolved_prefix_is_held_across_pushes() {
        let mut s = StreamSession::inline();
        // A lone "**" keeps the bold recognizer trying, so nothing is
        // emitted yet.
        assert!(s.push(&utf16("**")).is_empty());
        let segs = s.push(&utf16("b**"));
        assert_eq!(
            segs,
            vec![
                Segment::new(SegmentKind::Bold, 2, 3),
                Segment::new(SegmentKind::Break, 5, 5),
            ]
        );
    }
}
