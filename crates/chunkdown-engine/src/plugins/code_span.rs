use crate::plugin::{PluginState, StreamPlugin, NL};

const TICK: u16 = '`' as u16;

/// Inline code span.
///
/// Opens on a single backtick followed by a body character; closes on a
/// backtick run of the same length as the opener. A newline while processing
/// aborts the span.
pub struct InlineCode {
    include_ticks: bool,
    state: PluginState,
    tick_len: u32,
    end_match: u32,
}

impl InlineCode {
    pub fn new(include_ticks: bool) -> Self {
        Self {
            include_ticks,
            state: PluginState::Idle,
            tick_len: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for InlineCode {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if c == NL {
                self.reset();
                return true;
            }
            if c == TICK {
                self.end_match += 1;
                if self.end_match == self.tick_len {
                    self.reset();
                }
                return self.include_ticks;
            }
            self.end_match = 0;
            return true;
        }

        if c == TICK {
            if self.state == PluginState::Idle {
                self.state = PluginState::Trying;
                self.tick_len = 1;
                return self.include_ticks;
            }
            if self.state == PluginState::Trying {
                // A second opener backtick fails the single-tick start.
                self.reset();
                return true;
            }
        }

        if self.state == PluginState::Trying {
            if c != TICK && c != NL {
                self.state = PluginState::Processing;
                self.end_match = 0;
                return true;
            }
            if c == NL {
                self.reset();
                return true;
            }
        }

        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.tick_len = 0;
        self.end_match = 0;
    }
}
