use serde::Serialize;

/// Classification of an emitted span.
///
/// Discriminants are the wire tags consumed by downstream hosts and must not
/// be renumbered. [`SegmentKind::Break`] is a sentinel, not content: it marks
/// the boundary between two construct instances so that adjacent spans of the
/// same kind are never folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i16)]
pub enum SegmentKind {
    Break = -1,
    Header = 0,
    BlockQuote = 1,
    CodeBlock = 2,
    OrderedList = 3,
    UnorderedList = 4,
    HorizontalRule = 5,
    BlockLatex = 6,
    Table = 7,
    XmlBlock = 8,
    PlanExecution = 9,
    Bold = 10,
    Italic = 11,
    InlineCode = 12,
    Link = 13,
    Image = 14,
    Strikethrough = 15,
    Underline = 16,
    InlineLatex = 17,
    PlainText = 18,
}

impl SegmentKind {
    /// Wire tag for the flat `[tag, start, end]` layout.
    pub fn tag(self) -> i16 {
        self as i16
    }

    pub fn is_break(self) -> bool {
        matches!(self, SegmentKind::Break)
    }
}

/// A typed half-open span of kept code units.
///
/// `start` and `end` are global UTF-16 code-unit indices counted from session
/// creation. For [`SegmentKind::Break`] markers `start == end` is the boundary
/// position. Code units dropped by a recognizer (stripped delimiters) are
/// absent from every span even though the global offset advances past them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: u32,
    pub end: u32,
}

impl Segment {
    pub fn new(kind: SegmentKind, start: u32, end: u32) -> Self {
        Self { kind, start, end }
    }
}

/// Flattens segments into the `[tag, start, end, …]` signed-32-bit wire
/// layout shared with foreign hosts. Break markers keep their `-1` tag.
pub fn segments_to_wire(segments: &[Segment]) -> Vec<i32> {
    let mut out = Vec::with_capacity(segments.len() * 3);
    for s in segments {
        out.push(i32::from(s.kind.tag()));
        out.push(s.start as i32);
        out.push(s.end as i32);
    }
    out
}
