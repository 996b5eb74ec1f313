use crate::plugin::{PluginState, StreamPlugin, NL, SPACE};

const TICK: u16 = '`' as u16;

/// Fenced code block.
///
/// A run of three or more backticks opens the block; the rest of the opening
/// line is the info string and the body begins after its newline. A line of
/// optional leading spaces followed by three or more backticks closes it, and
/// the closing line is consumed. Opening is not anchored to start of line.
pub struct FencedCode {
    include_fences: bool,
    state: PluginState,
    fence_len: u32,
    matching_close_fence: bool,
    close_fence_started: bool,
}

impl FencedCode {
    pub fn new(include_fences: bool) -> Self {
        Self {
            include_fences,
            state: PluginState::Idle,
            fence_len: 0,
            matching_close_fence: false,
            close_fence_started: false,
        }
    }
}

impl StreamPlugin for FencedCode {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        match self.state {
            PluginState::Processing => {
                if at_line_start {
                    self.matching_close_fence = true;
                    self.close_fence_started = false;
                }
                if !self.matching_close_fence {
                    return true;
                }
                if !self.close_fence_started {
                    if c == SPACE {
                        return self.include_fences;
                    }
                    self.close_fence_started = true;
                }
                if c == TICK {
                    self.fence_len += 1;
                    return self.include_fences;
                }
                if c == NL {
                    if self.fence_len >= 3 {
                        self.reset();
                        return self.include_fences;
                    }
                    self.matching_close_fence = false;
                    self.fence_len = 0;
                    return true;
                }
                // Non-backtick content ends the close-fence attempt.
                self.matching_close_fence = false;
                self.fence_len = 0;
                true
            }
            PluginState::Idle => {
                if c == TICK {
                    self.state = PluginState::Trying;
                    self.fence_len = 1;
                    return self.include_fences;
                }
                true
            }
            PluginState::Trying => {
                if c == TICK {
                    self.fence_len += 1;
                    return self.include_fences;
                }
                if c == NL {
                    if self.fence_len >= 3 {
                        self.state = PluginState::Processing;
                        self.matching_close_fence = false;
                        self.close_fence_started = false;
                        self.fence_len = 0;
                        return self.include_fences;
                    }
                    self.reset();
                    return true;
                }
                if self.fence_len < 3 {
                    // One or two backticks is inline-code territory; stop
                    // trying before short runs accumulate into a fake fence.
                    self.reset();
                    return true;
                }
                // Info string on the opening line.
                self.include_fences
            }
            PluginState::WaitFor => true,
        }
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.fence_len = 0;
        self.matching_close_fence = false;
        self.close_fence_started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `s` starting with line-start flag `sol`; returns the flag for
    /// the next code unit so feeds can be chained.
    fn feed(p: &mut FencedCode, s: &str, mut sol: bool) -> bool {
        for c in s.encode_utf16() {
            p.process_char(c, sol);
            sol = c == NL;
        }
        sol
    }

    #[test]
    fn opens_after_three_ticks_and_newline() {
        let mut p = FencedCode::new(true);
        let sol = feed(&mut p, "```rust", true);
        assert_eq!(p.state(), PluginState::Trying);
        feed(&mut p, "\n", sol);
        assert_eq!(p.state(), PluginState::Processing);
    }

    #[test]
    fn two_ticks_resign_immediately() {
        let mut p = FencedCode::new(true);
        feed(&mut p, "``x", true);
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn closes_on_fence_line() {
        let mut p = FencedCode::new(true);
        let sol = feed(&mut p, "```\ncode\n```", true);
        assert_eq!(p.state(), PluginState::Processing);
        feed(&mut p, "\n", sol);
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn short_tick_run_inside_body_does_not_close() {
        let mut p = FencedCode::new(true);
        feed(&mut p, "```\n``\nstill code\n", true);
        assert_eq!(p.state(), PluginState::Processing);
    }

    #[test]
    fn leading_spaces_allowed_before_close_fence() {
        let mut p = FencedCode::new(true);
        feed(&mut p, "```\nbody\n  ```\n", true);
        assert_eq!(p.state(), PluginState::Idle);
    }
}
