//! Stateless whole-document splitter separating XML-tagged regions from
//! surrounding text. Runs only the XML recognizer over a complete buffer; this
//! is the pre-pass hosts use before deciding how to render each region.

use serde::Serialize;

use crate::plugin::{PluginState, StreamPlugin, NL};
use crate::plugins::XmlRegion;

/// Region classification for the one-shot split. Discriminants are the wire
/// tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
pub enum SplitKind {
    Default = 0,
    Xml = 1,
}

/// A half-open region of the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitSpan {
    pub kind: SplitKind,
    pub start: u32,
    pub end: u32,
}

/// Splits a whole buffer into default and XML regions.
///
/// The regions tile the input exactly: consecutive, non-overlapping, and
/// covering `[0, len)`. XML candidacy follows the recognizer's start gating,
/// so a `<` in running prose stays in the default region, and a region left
/// open at the end of input closes there.
pub fn split_by_xml(content: &[u16]) -> Vec<SplitSpan> {
    let mut spans = Vec::new();
    let mut plugin = XmlRegion::new(true);
    plugin.init();

    let mut active_start: Option<u32> = None;
    let mut default_start: u32 = 0;
    let mut eval_start: Option<u32> = None;
    let mut line_start = true;

    for (i, &c) in content.iter().enumerate() {
        let i = i as u32;
        let sol = line_start;
        line_start = c == NL;

        if let Some(start) = active_start {
            plugin.process_char(c, sol);
            if plugin.state() != PluginState::Processing {
                spans.push(SplitSpan {
                    kind: SplitKind::Xml,
                    start,
                    end: i + 1,
                });
                active_start = None;
                default_start = i + 1;
            }
            continue;
        }

        if eval_start.is_none() {
            eval_start = Some(i);
        }
        plugin.process_char(c, sol);

        match plugin.state() {
            PluginState::Processing => {
                let start = eval_start.take().unwrap_or(i);
                if default_start < start {
                    spans.push(SplitSpan {
                        kind: SplitKind::Default,
                        start: default_start,
                        end: start,
                    });
                }
                default_start = start;
                active_start = Some(start);
            }
            PluginState::Trying => {}
            _ => {
                eval_start = None;
            }
        }
    }

    let len = content.len() as u32;
    if let Some(start) = active_start {
        if start < len {
            spans.push(SplitSpan {
                kind: SplitKind::Xml,
                start,
                end: len,
            });
        }
        default_start = len;
    }
    if default_start < len {
        spans.push(SplitSpan {
            kind: SplitKind::Default,
            start: default_start,
            end: len,
        });
    }
    spans
}

/// Flattens split regions into the `[tag, start, end, …]` wire layout.
pub fn split_spans_to_wire(spans: &[SplitSpan]) -> Vec<i32> {
    let mut out = Vec::with_capacity(spans.len() * 3);
    for s in spans {
        out.push(s.kind as i32);
        out.push(s.start as i32);
        out.push(s.end as i32);
    }
    out
}
