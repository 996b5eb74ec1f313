/// Lifecycle of a construct recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    /// No hypothesis active.
    Idle,
    /// Consuming a candidate prefix; not yet committed. Several recognizers
    /// in a roster may be `Trying` at once.
    Trying,
    /// Committed; consuming body code units until the close condition fires.
    Processing,
    /// The body nominally ended; one more lookahead code unit decides
    /// whether to genuinely close or to keep processing.
    WaitFor,
}

/// A streaming recognizer for one construct.
///
/// `process_char` consumes a single UTF-16 code unit, advances the state
/// machine as a side effect and returns the *keep decision*: `true` when the
/// code unit contributes to the span being formed, `false` to drop it
/// (delimiter stripping). The engine queries `state` between code units and
/// never hands a recognizer more than one code unit of lookahead.
///
/// Each recognizer takes an *include-delimiters* flag at construction that
/// decides whether its opening/closing markers are kept or dropped.
pub trait StreamPlugin: Send + Sync {
    fn state(&self) -> PluginState;

    /// `at_line_start` is true for the code unit immediately following a
    /// `\n` and for the very first code unit of a session. Recognizers
    /// decide independently whether line anchoring matters.
    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool;

    /// One-time initialization at session start.
    fn init(&mut self) -> bool {
        self.reset();
        true
    }

    /// Returns to [`PluginState::Idle`] with all scratch cleared.
    fn reset(&mut self);
}

pub(crate) const NL: u16 = '\n' as u16;
pub(crate) const SPACE: u16 = ' ' as u16;
pub(crate) const TAB: u16 = '\t' as u16;

pub(crate) fn is_ascii_digit(c: u16) -> bool {
    (b'0' as u16..=b'9' as u16).contains(&c)
}

pub(crate) fn is_ascii_letter(c: u16) -> bool {
    (b'A' as u16..=b'Z' as u16).contains(&c) || (b'a' as u16..=b'z' as u16).contains(&c)
}
