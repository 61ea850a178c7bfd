//! Link decorations for the visible windows of a live editor.
//!
//! Editors only ask about what is on screen. Each window is scanned on its
//! own and the results are translated back to document offsets, then merged
//! into one ascending list because decoration sinks reject unordered or
//! repeated positions.

use std::ops::Range;

use crate::label::Label;
use crate::pattern::Pattern;
use crate::scanner::{ScanMode, ScanStep, find_next_link_from};
use crate::segments::{Segment, segments};

/// A zero-width insertion point carrying a link widget.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoration {
    /// Absolute document offset where the widget goes (end of the trigger).
    pub pos: usize,
    pub trigger: Range<usize>,
    pub href: String,
    pub label: Label,
}

/// Decorations for every link inside `windows`, sorted and unique by position.
///
/// Windows are widened to whole lines so triggers are never cut and the
/// boundary check sees the real preceding character. Out-of-range windows
/// are clamped to the document.
pub fn decorations(
    doc: &str,
    windows: &[Range<usize>],
    patterns: &[Pattern],
    mode: ScanMode,
) -> Vec<Decoration> {
    let mut out = Vec::new();

    for window in windows {
        let window = widen_to_lines(doc, window.clone());
        if window.is_empty() {
            continue;
        }
        let text = &doc[window.clone()];
        match mode {
            ScanMode::Earliest => scan_window(text, window.start, patterns, &mut out),
            ScanMode::Sequential => {
                out.extend(segments(text, patterns, mode).into_iter().filter_map(
                    |segment| match segment {
                        Segment::Link(link) => Some(Decoration {
                            pos: window.start + link.range.end,
                            trigger: window.start + link.range.start
                                ..window.start + link.range.end,
                            href: link.href,
                            label: link.label,
                        }),
                        Segment::Plain(_) => None,
                    },
                ))
            }
        }
    }

    out.sort_by_key(|d| d.pos);
    out.dedup_by_key(|d| d.pos);
    out
}

/// Drive the scan loop over one window, translating offsets with the
/// window start plus the length consumed so far.
fn scan_window(text: &str, window_start: usize, patterns: &[Pattern], out: &mut Vec<Decoration>) {
    let mut consumed = 0;

    loop {
        match find_next_link_from(text, consumed, patterns) {
            ScanStep::NotFound { .. } => break,
            ScanStep::Found(found) => {
                let start = window_start + consumed + found.pre_text.len();
                let end = start + found.trigger.len();
                out.push(Decoration {
                    pos: end,
                    trigger: start..end,
                    href: found.href,
                    label: found.label,
                });
                consumed += found.pre_text.len() + found.trigger.len();
            }
            ScanStep::Faulted(faulted) => {
                log::warn!(
                    "Leaving `{}` at {} undecorated: {}",
                    faulted.trigger,
                    window_start + faulted.offset,
                    faulted.error
                );
                consumed += faulted.pre_text.len() + faulted.trigger.len();
            }
        }
    }
}

/// Extend `range` back to the start of its first line and forward to the
/// end of its last line (excluding the newline).
fn widen_to_lines(doc: &str, range: Range<usize>) -> Range<usize> {
    let mut start = range.start.min(doc.len());
    let mut end = range.end.clamp(start, doc.len());
    while !doc.is_char_boundary(start) {
        start -= 1;
    }
    while !doc.is_char_boundary(end) {
        end += 1;
    }

    let start = doc[..start].rfind('\n').map_or(0, |i| i + 1);
    let end = doc[end..].find('\n').map_or(doc.len(), |i| end + i);
    start..end
}
