//! List items. Both recognizers are line-anchored marker matchers whose body
//! runs to the end of the line; multi-line items and nesting are left to the
//! consumer, which re-feeds block spans through an inline session.

use crate::plugin::{is_ascii_digit, PluginState, StreamPlugin, NL, SPACE};

const DOT: u16 = '.' as u16;
const DASH: u16 = '-' as u16;
const PLUS: u16 = '+' as u16;
const STAR: u16 = '*' as u16;

/// Ordered list item: `[0-9]+. ` at start of line.
pub struct OrderedList {
    include_marker: bool,
    state: PluginState,
    match_state: u8,
}

impl OrderedList {
    pub fn new(include_marker: bool) -> Self {
        Self {
            include_marker,
            state: PluginState::Idle,
            match_state: 0,
        }
    }
}

impl StreamPlugin for OrderedList {
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
            self.match_state = 0;
            self.state = PluginState::Idle;
        }

        if !at_line_start && self.state != PluginState::Trying {
            return true;
        }

        match self.match_state {
            0 => {
                if is_ascii_digit(c) {
                    self.state = PluginState::Trying;
                    self.match_state = 1;
                    return self.include_marker;
                }
                self.reset();
                true
            }
            1 => {
                if is_ascii_digit(c) {
                    return self.include_marker;
                }
                if c == DOT {
                    self.match_state = 2;
                    return self.include_marker;
                }
                self.reset();
                true
            }
            _ => {
                if c == SPACE {
                    self.state = PluginState::Processing;
                    self.match_state = 0;
                    return self.include_marker;
                }
                self.reset();
                true
            }
        }
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.match_state = 0;
    }
}

/// Unordered list item: `- `, `+ ` or `* ` at start of line.
pub struct UnorderedList {
    include_marker: bool,
    state: PluginState,
    match_state: u8,
}

impl UnorderedList {
    pub fn new(include_marker: bool) -> Self {
        Self {
            include_marker,
            state: PluginState::Idle,
            match_state: 0,
        }
    }
}

impl StreamPlugin for UnorderedList {
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
            self.match_state = 0;
            self.state = PluginState::Idle;
        }

        if !at_line_start && self.state != PluginState::Trying {
            return true;
        }

        if self.match_state == 0 {
            if c == DASH || c == PLUS || c == STAR {
                self.state = PluginState::Trying;
                self.match_state = 1;
                return self.include_marker;
            }
            self.reset();
            return true;
        }

        if c == SPACE {
            self.state = PluginState::Processing;
            self.match_state = 0;
            return self.include_marker;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.match_state = 0;
    }
}
