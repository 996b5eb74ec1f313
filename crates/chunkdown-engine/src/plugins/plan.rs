use crate::kmp::KmpMatcher;
use crate::plugin::{PluginState, StreamPlugin, SPACE, TAB};

const LT: u16 = '<' as u16;
const GT: u16 = '>' as u16;
const OPEN_TAG: [u16; 5] = ['<' as u16, 'p' as u16, 'l' as u16, 'a' as u16, 'n' as u16];

/// Plan execution region: `<plan …>…</plan>`.
///
/// Matches the literal `<plan`, consumes attributes up to `>`, then processes
/// until the fixed `</plan>` closer fires in the KMP matcher. An idle start
/// mid-line is only allowed right after a previous plan closed (one-shot
/// flag), so prose containing `<` does not open plans; a start-of-line `<` is
/// always a candidate.
pub struct PlanExecution {
    include_tags: bool,
    state: PluginState,
    matching_open: bool,
    open_match: usize,
    allow_restart: bool,
    end_matcher: KmpMatcher,
}

impl PlanExecution {
    pub fn new(include_tags: bool) -> Self {
        let mut end_matcher = KmpMatcher::new();
        let closer: Vec<u16> = "</plan>".encode_utf16().collect();
        end_matcher.set_pattern(&closer);
        Self {
            include_tags,
            state: PluginState::Idle,
            matching_open: false,
            open_match: 0,
            allow_restart: false,
            end_matcher,
        }
    }
}

impl StreamPlugin for PlanExecution {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if self.end_matcher.process(c) {
                self.allow_restart = true;
                self.reset();
                return self.include_tags;
            }
            return true;
        }

        if self.state == PluginState::Idle && !at_line_start {
            if !self.allow_restart {
                return true;
            }
            if c == SPACE || c == TAB {
                return true;
            }
        }

        if !self.matching_open {
            if c == LT {
                self.matching_open = true;
                self.open_match = 1;
                self.state = PluginState::Trying;
                return self.include_tags;
            }
            return true;
        }

        if self.open_match < OPEN_TAG.len() {
            if c == OPEN_TAG[self.open_match] {
                self.open_match += 1;
                return self.include_tags;
            }
            self.reset();
            self.allow_restart = false;
            return true;
        }

        // `<plan` matched; attributes run to `>`.
        if c == GT {
            self.state = PluginState::Processing;
            self.matching_open = false;
            self.open_match = 0;
            self.allow_restart = false;
            self.end_matcher.reset();
            return self.include_tags;
        }
        self.include_tags
    }

    /// The restart allowance survives resets.
    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.matching_open = false;
        self.open_match = 0;
        self.end_matcher.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(p: &mut PlanExecution, s: &str, mut sol: bool) -> bool {
        for c in s.encode_utf16() {
            p.process_char(c, sol);
            sol = c == '\n' as u16;
        }
        sol
    }

    #[test]
    fn open_tag_with_attributes_commits() {
        let mut p = PlanExecution::new(true);
        drive(&mut p, "<plan id=\"1\">", true);
        assert_eq!(p.state(), PluginState::Processing);
    }

    #[test]
    fn closes_on_end_tag() {
        let mut p = PlanExecution::new(true);
        drive(&mut p, "<plan>do a thing</plan>", true);
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn other_tags_resign() {
        let mut p = PlanExecution::new(true);
        drive(&mut p, "<tool>", true);
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn mid_line_start_requires_prior_close() {
        let mut p = PlanExecution::new(true);
        let sol = drive(&mut p, "text ", true);
        drive(&mut p, "<plan>", sol);
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn reopen_allowed_right_after_close() {
        let mut p = PlanExecution::new(true);
        let sol = drive(&mut p, "<plan>a</plan>", true);
        assert_eq!(p.state(), PluginState::Idle);
        drive(&mut p, "<plan>", sol);
        assert_eq!(p.state(), PluginState::Processing);
    }
}
