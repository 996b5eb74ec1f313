//! LaTeX spans in both delimiter families.
//!
//! Dollar delimiters (`$…$`, `$$…$$`) are stripped by configuration; the
//! backslash families (`\(…\)`, `\[…\]`) run with delimiters kept so a failed
//! closer never swallows a lone backslash; the downstream consumer performs
//! the final delimiter strip.

use crate::plugin::{PluginState, StreamPlugin, NL};

const DOLLAR: u16 = '$' as u16;
const BACKSLASH: u16 = '\\' as u16;
const LPAREN: u16 = '(' as u16;
const RPAREN: u16 = ')' as u16;
const LBRACKET: u16 = '[' as u16;
const RBRACKET: u16 = ']' as u16;

/// Inline math `$…$`: single-dollar delimiters, body must start with
/// something other than `$` or a newline.
pub struct InlineDollarLatex {
    include_delimiters: bool,
    state: PluginState,
    started: bool,
}

impl InlineDollarLatex {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
            started: false,
        }
    }
}

impl StreamPlugin for InlineDollarLatex {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if c == DOLLAR {
                self.reset();
                return self.include_delimiters;
            }
            return true;
        }

        if !self.started {
            if c == DOLLAR {
                self.started = true;
                self.state = PluginState::Trying;
                return self.include_delimiters;
            }
            return true;
        }

        if c != DOLLAR && c != NL {
            self.state = PluginState::Processing;
            self.started = false;
            return true;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.started = false;
    }
}

/// Inline math `\(…\)`.
pub struct InlineParenLatex {
    include_delimiters: bool,
    state: PluginState,
    start_match: u8,
    end_match: u8,
}

impl InlineParenLatex {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
            start_match: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for InlineParenLatex {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if self.end_match == 0 {
                if c == BACKSLASH {
                    self.end_match = 1;
                    return self.include_delimiters;
                }
                return true;
            }
            if c == RPAREN {
                self.reset();
                return self.include_delimiters;
            }
            self.end_match = 0;
            return true;
        }

        match self.start_match {
            0 => {
                if c == BACKSLASH {
                    self.start_match = 1;
                    self.state = PluginState::Trying;
                    return self.include_delimiters;
                }
                true
            }
            1 => {
                if c == LPAREN {
                    self.start_match = 2;
                    return self.include_delimiters;
                }
                self.reset();
                true
            }
            _ => {
                if c != NL {
                    self.state = PluginState::Processing;
                    self.start_match = 0;
                    self.end_match = 0;
                    return true;
                }
                self.reset();
                true
            }
        }
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.start_match = 0;
        self.end_match = 0;
    }
}

/// Display math `$$…$$`.
pub struct BlockDollarLatex {
    include_delimiters: bool,
    state: PluginState,
    start_match: u8,
    end_match: u8,
}

impl BlockDollarLatex {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
            start_match: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for BlockDollarLatex {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if self.end_match == 0 {
                if c == DOLLAR {
                    self.end_match = 1;
                    return self.include_delimiters;
                }
                return true;
            }
            if c == DOLLAR {
                self.reset();
                return self.include_delimiters;
            }
            self.end_match = 0;
            return true;
        }

        if self.start_match == 0 {
            if c == DOLLAR {
                self.start_match = 1;
                self.state = PluginState::Trying;
                return self.include_delimiters;
            }
            return true;
        }
        if c == DOLLAR {
            self.state = PluginState::Processing;
            self.start_match = 0;
            self.end_match = 0;
            return self.include_delimiters;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.start_match = 0;
        self.end_match = 0;
    }
}

/// Display math `\[…\]`.
pub struct BlockBracketLatex {
    include_delimiters: bool,
    state: PluginState,
    start_match: u8,
    end_match: u8,
}

impl BlockBracketLatex {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
            start_match: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for BlockBracketLatex {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if self.end_match == 0 {
                if c == BACKSLASH {
                    self.end_match = 1;
                    return self.include_delimiters;
                }
                return true;
            }
            if c == RBRACKET {
                self.reset();
                return self.include_delimiters;
            }
            self.end_match = 0;
            return true;
        }

        if self.start_match == 0 {
            if c == BACKSLASH {
                self.start_match = 1;
                self.state = PluginState::Trying;
                return self.include_delimiters;
            }
            return true;
        }
        if c == LBRACKET {
            self.state = PluginState::Processing;
            self.start_match = 0;
            self.end_match = 0;
            return self.include_delimiters;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.start_match = 0;
        self.end_match = 0;
    }
}
