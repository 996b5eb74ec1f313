use crate::plugin::{PluginState, StreamPlugin, NL, SPACE, TAB};

const DASH: u16 = '-' as u16;
const STAR: u16 = '*' as u16;
const UNDERSCORE: u16 = '_' as u16;

/// Horizontal rule: a line of three or more `-`, `*` or `_` (one marker kind
/// per line, spaces and tabs allowed between markers).
///
/// The rule only counts once the terminating newline confirms it; short or
/// mixed runs resign so the buffered prefix rewinds to the other candidates.
pub struct HorizontalRule {
    include_marker: bool,
    state: PluginState,
    marker: Option<u16>,
    marker_count: u32,
}

impl HorizontalRule {
    pub fn new(include_marker: bool) -> Self {
        Self {
            include_marker,
            state: PluginState::Idle,
            marker: None,
            marker_count: 0,
        }
    }
}

impl StreamPlugin for HorizontalRule {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        if c == NL {
            let is_rule = matches!(
                self.state,
                PluginState::Trying | PluginState::Processing
            ) && self.marker_count >= 3;
            self.reset();
            if is_rule {
                return self.include_marker;
            }
            return true;
        }

        if self.state == PluginState::Idle {
            if at_line_start && (c == DASH || c == STAR || c == UNDERSCORE) {
                self.state = PluginState::Trying;
                self.marker = Some(c);
                self.marker_count = 1;
                return self.include_marker;
            }
            return true;
        }

        if let Some(marker) = self.marker {
            if c == marker || c == SPACE || c == TAB {
                if c == marker {
                    self.marker_count += 1;
                }
                if self.marker_count >= 3 {
                    self.state = PluginState::Processing;
                }
                return self.include_marker;
            }
        }

        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.marker = None;
        self.marker_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(p: &mut HorizontalRule, s: &str) -> Vec<bool> {
        let mut sol = true;
        s.encode_utf16()
            .map(|c| {
                let keep = p.process_char(c, sol);
                sol = c == NL;
                keep
            })
            .collect()
    }

    #[test]
    fn three_dashes_commit() {
        let mut p = HorizontalRule::new(true);
        drive(&mut p, "---");
        assert_eq!(p.state(), PluginState::Processing);
    }

    #[test]
    fn spaced_markers_count() {
        let mut p = HorizontalRule::new(true);
        drive(&mut p, "- - -");
        assert_eq!(p.state(), PluginState::Processing);
    }

    #[test]
    fn mixed_markers_resign() {
        let mut p = HorizontalRule::new(true);
        drive(&mut p, "-*");
        assert_eq!(p.state(), PluginState::Idle);
    }

    #[test]
    fn two_markers_then_newline_is_not_a_rule() {
        let mut p = HorizontalRule::new(true);
        let kept = drive(&mut p, "--\n");
        assert_eq!(p.state(), PluginState::Idle);
        // The newline of a failed rule is ordinary text.
        assert_eq!(kept[2], true);
    }

    #[test]
    fn newline_confirms_and_is_kept() {
        let mut p = HorizontalRule::new(true);
        let kept = drive(&mut p, "***\n");
        assert_eq!(p.state(), PluginState::Idle);
        assert_eq!(kept, vec![true, true, true, true]);
    }
}
