use crate::plugin::{PluginState, StreamPlugin, NL};

const PIPE: u16 = '|' as u16;

/// Table: lines opening with `|`.
///
/// The first `|` at start of line commits immediately; each newline defers
/// via [`PluginState::WaitFor`] so the engine can check whether the next line
/// also opens with `|`. A `|[-: |\t]+|` separator as the second row is
/// tolerated but not required; any `|`-opened line continues the table.
pub struct Table {
    include_delimiters: bool,
    state: PluginState,
}

impl Table {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
        }
    }
}

impl StreamPlugin for Table {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        if c == NL {
            if self.state == PluginState::Processing {
                self.state = PluginState::WaitFor;
            }
            return true;
        }

        if self.state == PluginState::WaitFor && at_line_start {
            if c == PIPE {
                self.state = PluginState::Processing;
                return self.include_delimiters;
            }
            // Any other line opener ends the table.
            self.reset();
            return true;
        }

        if at_line_start {
            if c == PIPE {
                self.state = PluginState::Processing;
                return self.include_delimiters;
            }
            if self.state == PluginState::Processing {
                self.reset();
            }
            return true;
        }

        if self.state == PluginState::Processing {
            if self.include_delimiters {
                return true;
            }
            return c != PIPE;
        }

        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
    }
}
