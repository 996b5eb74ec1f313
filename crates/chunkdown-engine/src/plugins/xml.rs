use crate::kmp::KmpMatcher;
use crate::plugin::{is_ascii_letter, PluginState, StreamPlugin, SPACE, TAB};

const LT: u16 = '<' as u16;
const GT: u16 = '>' as u16;
const SLASH: u16 = '/' as u16;

/// Progress through an opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenState {
    WaitLt,
    WaitFirstLetter,
    InTagName,
    InAttrs,
}

/// XML-tagged region: `<tag …attrs…>…</tag>`.
///
/// The tag name must begin with an ASCII letter and contain no whitespace;
/// attributes run to the first `>`. On a successful open the closing pattern
/// `</tag>` is built dynamically and installed in the KMP matcher, and the
/// region processes until it fires.
///
/// An idle `<` that is not at start of line is only a candidate when the text
/// just passed a sentence-like punctuation trigger (optionally followed by
/// whitespace) or a previous region just closed. Tags whose `>` follows a `/`
/// (`<br/>`) stay plain text.
pub struct XmlRegion {
    include_tags: bool,
    state: PluginState,
    open_state: OpenState,
    allow_after_close: bool,
    allow_after_punctuation: bool,
    tag_name: Vec<u16>,
    end_matcher: KmpMatcher,
    have_end_pattern: bool,
    last_char: Option<u16>,
}

impl XmlRegion {
    pub fn new(include_tags: bool) -> Self {
        Self {
            include_tags,
            state: PluginState::Idle,
            open_state: OpenState::WaitLt,
            allow_after_close: false,
            allow_after_punctuation: false,
            tag_name: Vec::new(),
            end_matcher: KmpMatcher::new(),
            have_end_pattern: false,
            last_char: None,
        }
    }

    /// Fullwidth and halfwidth sentence punctuation that licenses an inline
    /// `<` as a tag opener.
    fn is_punctuation_trigger(c: u16) -> bool {
        matches!(
            c,
            0xFF0C | 0x3002 | 0xFF1F | 0xFF01 | 0xFF1A | 0xFF08 | 0xFF09 // ，。？！：（）
                | 0x3010 | 0x3011 | 0x300A | 0x300B | 0xFF5E | 0xFF1E // 【】《》～＞
                | 0x2C | 0x2E | 0x3F | 0x21 | 0x3A | 0x7E | 0x3E // , . ? ! : ~ >
        )
    }

    fn update_punctuation_allowance(&mut self, c: u16) {
        if Self::is_punctuation_trigger(c) {
            self.allow_after_punctuation = true;
        } else if c != SPACE && c != TAB {
            // Whitespace preserves the allowance; anything else spends it.
            self.allow_after_punctuation = false;
        }
    }

    fn default_char(&mut self, c: u16) -> bool {
        self.update_punctuation_allowance(c);
        true
    }

    /// Advances the opening-tag matcher; true when `c` is the `>` completing
    /// an open tag.
    fn process_open(&mut self, c: u16) -> bool {
        match self.open_state {
            OpenState::WaitLt => {
                if c == LT {
                    self.tag_name.clear();
                    self.open_state = OpenState::WaitFirstLetter;
                    self.state = PluginState::Trying;
                }
                false
            }
            OpenState::WaitFirstLetter => {
                if is_ascii_letter(c) {
                    self.tag_name.push(c);
                    self.open_state = OpenState::InTagName;
                    self.state = PluginState::Trying;
                } else {
                    self.open_state = OpenState::WaitLt;
                    self.state = PluginState::Idle;
                }
                false
            }
            OpenState::InTagName => {
                if c == SPACE {
                    self.open_state = OpenState::InAttrs;
                    return false;
                }
                if c == GT {
                    self.open_state = OpenState::WaitLt;
                    return true;
                }
                self.tag_name.push(c);
                false
            }
            OpenState::InAttrs => {
                if c == GT {
                    self.open_state = OpenState::WaitLt;
                    return true;
                }
                false
            }
        }
    }

    fn install_end_pattern(&mut self) {
        let mut pattern = Vec::with_capacity(self.tag_name.len() + 3);
        pattern.push(LT);
        pattern.push(SLASH);
        pattern.extend_from_slice(&self.tag_name);
        pattern.push(GT);
        self.end_matcher.set_pattern(&pattern);
        self.have_end_pattern = true;
    }

    fn advance(&mut self, c: u16, at_line_start: bool) -> bool {
        if self.state == PluginState::Processing {
            if self.have_end_pattern && self.end_matcher.process(c) {
                self.allow_after_close = true;
                self.allow_after_punctuation = false;
                self.reset();
                return self.include_tags;
            }
            return true;
        }

        if self.state == PluginState::Idle && !at_line_start {
            let allowed = self.allow_after_close || self.allow_after_punctuation;
            if !allowed {
                return self.default_char(c);
            }
            if c == SPACE || c == TAB {
                return self.default_char(c);
            }
        }

        let was_trying = self.state == PluginState::Trying;
        let opened = self.process_open(c);

        if opened {
            if self.last_char == Some(SLASH) {
                // Self-closing tags like <br/> stay plain text.
                self.reset();
                return true;
            }
            self.state = PluginState::Processing;
            self.allow_after_close = false;
            self.allow_after_punctuation = false;
            self.install_end_pattern();
            self.open_state = OpenState::WaitLt;
            return self.include_tags;
        }

        if self.state == PluginState::Trying {
            self.allow_after_punctuation = false;
            return self.include_tags;
        }

        if was_trying {
            self.reset();
        }
        self.allow_after_close = false;
        self.allow_after_punctuation = false;
        self.default_char(c)
    }
}

impl StreamPlugin for XmlRegion {
    fn state(&self) -> PluginState {
        self.state
    }

    fn process_char(&mut self, c: u16, at_line_start: bool) -> bool {
        let keep = self.advance(c, at_line_start);
        self.last_char = Some(c);
        keep
    }

    /// Start allowances deliberately survive resets.
    fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.open_state = OpenState::WaitLt;
        self.tag_name.clear();
        self.end_matcher.reset();
        self.have_end_pattern = false;
        self.last_char = None;
    }
}
