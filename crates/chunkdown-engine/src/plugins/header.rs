use crate::plugin::{PluginState, StreamPlugin, NL, SPACE};

const HASH: u16 = '#' as u16;

/// ATX header: one to six `#` at start of line, then a single space, then
/// content to the end of the line.
pub struct Header {
    include_marker: bool,
    state: PluginState,
    hash_count: u32,
    in_match: bool,
}

impl Header {
    pub fn new(include_marker: bool) -> Self {
        Self {
            include_marker,
            state: PluginState::Idle,
            hash_count: 0,
            in_match: false,
        }
    }
}

impl StreamPlugin for Header {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if c == NL {
                self.reset();
            }
            return true;
        }

        if at_line_start {
            self.in_match = true;
            self.hash_count = 0;
            self.state = PluginState::Idle;
        }

        if !self.in_match && self.state != PluginState::Trying {
            return true;
        }

        if c == HASH {
            self.hash_count += 1;
            self.state = PluginState::Trying;
            return self.include_marker;
        }

        if c == SPACE && (1..=6).contains(&self.hash_count) {
            self.state = PluginState::Processing;
            self.in_match = false;
            return self.include_marker;
        }

        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.hash_count = 0;
        self.in_match = false;
    }
}
