//! Emphasis spans with symmetric delimiters: bold, italic, strikethrough,
//! underline. All four are two-phase machines: a short opener match, then a
//! body scan for the closing delimiter run.

use crate::plugin::{PluginState, StreamPlugin, NL, SPACE};

const STAR: u16 = '*' as u16;
const TILDE: u16 = '~' as u16;
const UNDERSCORE: u16 = '_' as u16;

/// Bold: `**…**`. Opens on `**` followed by a character that is neither `*`
/// nor a newline (so `***` is not a bold opener); closes on `**`.
pub struct Bold {
    include_asterisks: bool,
    state: PluginState,
    start_match: u8,
    end_match: u8,
}

impl Bold {
    pub fn new(include_asterisks: bool) -> Self {
        Self {
            include_asterisks,
            state: PluginState::Idle,
            start_match: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for Bold {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if c == STAR {
                self.end_match += 1;
                if self.end_match == 2 {
                    self.reset();
                }
                return self.include_asterisks;
            }
            self.end_match = 0;
            return true;
        }

        match self.state {
            PluginState::Idle => {
                if c == STAR {
                    self.state = PluginState::Trying;
                    self.start_match = 1;
                    return self.include_asterisks;
                }
                true
            }
            PluginState::Trying => {
                if self.start_match == 1 {
                    if c == STAR {
                        self.start_match = 2;
                        return self.include_asterisks;
                    }
                    self.reset();
                    return true;
                }
                if self.start_match == 2 {
                    if c != STAR && c != NL {
                        self.state = PluginState::Processing;
                        self.start_match = 0;
                        self.end_match = 0;
                        return true;
                    }
                    self.reset();
                    return true;
                }
                self.reset();
                true
            }
            _ => true,
        }
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.start_match = 0;
        self.end_match = 0;
    }
}

/// Italic: `*…*`. The previous code unit is tracked so a `**` pair is never
/// misread as an italic opener or closer; a space right after the opener and
/// newlines anywhere abort.
pub struct Italic {
    include_asterisks: bool,
    state: PluginState,
    last_char: Option<u16>,
}

impl Italic {
    pub fn new(include_asterisks: bool) -> Self {
        Self {
            include_asterisks,
            state: PluginState::Idle,
            last_char: None,
        }
    }
}

impl StreamPlugin for Italic {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        if self.last_char == Some(STAR) && c == STAR {
            // Two consecutive asterisks mean bold, never italics.
            self.reset();
            return true;
        }
        self.last_char = Some(c);

        if self.state == PluginState::Processing {
            if c == NL {
                self.reset();
                return true;
            }
            if c == STAR {
                let keep = self.include_asterisks;
                self.reset();
                return keep;
            }
            return true;
        }

        if c == STAR {
            self.state = PluginState::Trying;
            return self.include_asterisks;
        }

        if self.state == PluginState::Trying {
            if c != STAR && c != NL && c != SPACE {
                self.state = PluginState::Processing;
                return true;
            }
            self.reset();
            return true;
        }

        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.last_char = None;
    }
}

/// Strikethrough: `~~…~~`.
pub struct Strikethrough {
    include_delimiters: bool,
    state: PluginState,
    start_match: u8,
    end_match: u8,
}

impl Strikethrough {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
            start_match: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for Strikethrough {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        process_two_char(
            &mut self.state,
            &mut self.start_match,
            &mut self.end_match,
            self.include_delimiters,
            TILDE,
            c,
        )
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.start_match = 0;
        self.end_match = 0;
    }
}

/// Underline: `__…__`.
pub struct Underline {
    include_delimiters: bool,
    state: PluginState,
    start_match: u8,
    end_match: u8,
}

impl Underline {
    pub fn new(include_delimiters: bool) -> Self {
        Self {
            include_delimiters,
            state: PluginState::Idle,
            start_match: 0,
            end_match: 0,
        }
    }
}

impl StreamPlugin for Underline {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, _at_line_start: bool) -> bool {
        process_two_char(
            &mut self.state,
            &mut self.start_match,
            &mut self.end_match,
            self.include_delimiters,
            UNDERSCORE,
            c,
        )
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.start_match = 0;
        self.end_match = 0;
    }
}

/// Shared machine for the `DD…DD` delimiters (strikethrough, underline):
/// opener is the doubled delimiter plus a body character that is neither the
/// delimiter nor a newline, closer is the doubled delimiter.
fn process_two_char(
    state: &mut PluginState,
    start_match: &mut u8,
    end_match: &mut u8,
    include_delimiters: bool,
    delim: u16,
    c: u16,
) -> bool {
    if *state == PluginState::Processing {
        if *end_match == 0 {
            if c == delim {
                *end_match = 1;
                return include_delimiters;
            }
            return true;
        }
        if c == delim {
            *state = PluginState::Idle;
            *start_match = 0;
            *end_match = 0;
            return include_delimiters;
        }
        *end_match = 0;
        return true;
    }

    match *start_match {
        0 => {
            if c == delim {
                *start_match = 1;
                *state = PluginState::Trying;
                return include_delimiters;
            }
            true
        }
        1 => {
            if c == delim {
                *start_match = 2;
                *state = PluginState::Trying;
                return include_delimiters;
            }
            *state = PluginState::Idle;
            *start_match = 0;
            true
        }
        _ => {
            if c != delim && c != NL {
                *state = PluginState::Processing;
                *start_match = 0;
                *end_match = 0;
                return true;
            }
            *state = PluginState::Idle;
            *start_match = 0;
            *end_match = 0;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeps(p: &mut dyn StreamPlugin, s: &str) -> Vec<bool> {
        s.encode_utf16().map(|c| p.process_char(c, false)).collect()
    }

    #[test]
    fn bold_strips_asterisks() {
        let mut p = Bold::new(false);
        assert_eq!(
            keeps(&mut p, "**hi**"),
            vec![false, false, true, true, false, false]
        );
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn triple_star_is_not_bold() {
        let mut p = Bold::new(false);
        keeps(&mut p, "***");
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn italic_rejects_double_star() {
        let mut p = Italic::new(false);
        keeps(&mut p, "**");
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn italic_rejects_space_after_opener() {
        let mut p = Italic::new(false);
        keeps(&mut p, "* x");
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn italic_closes_on_single_star() {
        let mut p = Italic::new(false);
        assert_eq!(keeps(&mut p, "*it*"), vec![false, true, true, false]);
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn strikethrough_round_trip() {
        let mut p = Strikethrough::new(false);
        assert_eq!(
            keeps(&mut p, "~~s~~"),
            vec![false, false, true, false, false]
        );
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn strikethrough_single_tilde_in_body_is_content() {
        let mut p = Strikethrough::new(false);
        assert_eq!(
            keeps(&mut p, "~~a~b~~"),
            vec![false, false, true, false, true, false, false]
        );
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn underline_keeps_delimiters() {
        let mut p = Underline::new(true);
        assert_eq!(keeps(&mut p, "__u__"), vec![true, true, true, true, true]);
        assert_eq!(p.state(), PluginState::Idle);
    }
}
