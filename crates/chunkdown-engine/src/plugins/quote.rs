use crate::plugin::{PluginState, StreamPlugin, NL, SPACE};

const GT: u16 = '>' as u16;

/// Block quote: a `> ` prefix at start of line.
///
/// A newline while processing moves to [`PluginState::WaitFor`] so the engine
/// asks, with the next code unit, whether the following line also begins with
/// `>`; if so the quote continues, otherwise it closes.
pub struct BlockQuote {
    include_marker: bool,
    state: PluginState,
    match_index: u8,
}

impl BlockQuote {
    pub fn new(include_marker: bool) -> Self {
        Self {
            include_marker,
            state: PluginState::Idle,
            match_index: 0,
        }
    }
}

impl StreamPlugin for BlockQuote {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        if c == NL {
            if self.state == PluginState::Processing {
                self.state = PluginState::WaitFor;
            } else {
                self.reset();
            }
            return true;
        }

        if self.state == PluginState::WaitFor && at_line_start {
            if c == GT {
                self.state = PluginState::Processing;
                self.match_index = 1;
                // Continuation markers are kept even when the opening
                // marker is stripped.
                return true;
            }
            self.reset();
            return true;
        }

        if at_line_start {
            if self.match_index == 0 {
                if c == GT {
                    self.match_index = 1;
                    self.state = PluginState::Trying;
                    return self.include_marker;
                }
                return true;
            }
            if self.match_index == 1 {
                if c == SPACE {
                    self.state = PluginState::Processing;
                    self.match_index = 0;
                    return self.include_marker;
                }
                self.reset();
                return true;
            }
        }

        if self.state == PluginState::Processing {
            return true;
        }

        if self.state == PluginState::Trying && self.match_index == 1 {
            if c == SPACE {
                self.state = PluginState::Processing;
                self.match_index = 0;
                return self.include_marker;
            }
            self.reset();
            return true;
        }

        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.match_index = 0;
    }
}
