//! Splitting text into plain and link segments, and feeding them to a sink.

use std::ops::Range;
use std::slice;

use crate::label::Label;
use crate::pattern::Pattern;
use crate::scanner::{ScanMode, ScanStep, find_next_link_from};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlainSegment<'t> {
    pub text: &'t str,
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinkSegment<'t> {
    /// The source text the link replaces.
    pub trigger: &'t str,
    pub href: String,
    pub label: Label,
    pub range: Range<usize>,
}

/// A contiguous piece of the input. Segments returned by [`segments`] are in
/// order and cover the input without gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Segment<'t> {
    Plain(PlainSegment<'t>),
    Link(LinkSegment<'t>),
}

impl<'t> Segment<'t> {
    /// The input text this segment covers.
    pub fn source(&self) -> &'t str {
        match self {
            Segment::Plain(plain) => plain.text,
            Segment::Link(link) => link.trigger,
        }
    }

    pub fn range(&self) -> Range<usize> {
        match self {
            Segment::Plain(plain) => plain.range.clone(),
            Segment::Link(link) => link.range.clone(),
        }
    }
}

/// Receives segments in document order.
pub trait Sink {
    fn plain(&mut self, text: &str, range: Range<usize>);
    fn link(&mut self, link: &LinkSegment<'_>);
}

/// Split `text` into plain and link segments.
pub fn segments<'t>(text: &'t str, patterns: &[Pattern], mode: ScanMode) -> Vec<Segment<'t>> {
    let mut out = Vec::new();
    match mode {
        ScanMode::Earliest => split_fragment(text, 0, patterns, &mut out),
        ScanMode::Sequential => {
            out.push(Segment::Plain(PlainSegment {
                text,
                range: 0..text.len(),
            }));
            for pattern in patterns {
                let mut next = Vec::with_capacity(out.len());
                for segment in out {
                    match segment {
                        Segment::Plain(plain) => split_fragment(
                            plain.text,
                            plain.range.start,
                            slice::from_ref(pattern),
                            &mut next,
                        ),
                        link => next.push(link),
                    }
                }
                out = next;
            }
            out.retain(|segment| !segment.source().is_empty());
        }
    }
    out
}

/// Scan `text` and feed the result to `sink`.
pub fn emit(text: &str, patterns: &[Pattern], mode: ScanMode, sink: &mut impl Sink) {
    for segment in segments(text, patterns, mode) {
        match &segment {
            Segment::Plain(plain) => sink.plain(plain.text, plain.range.clone()),
            Segment::Link(link) => sink.link(link),
        }
    }
}

/// Whether any pattern has a valid match anywhere in `text`.
pub fn any_match(text: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.find_from(text, 0).is_some())
}

/// Run the scan loop over one fragment whose first byte sits at `base` in
/// the document, appending segments with absolute ranges.
fn split_fragment<'t>(text: &'t str, base: usize, patterns: &[Pattern], out: &mut Vec<Segment<'t>>) {
    let mut pos = 0;
    let mut plain_start = 0;

    loop {
        match find_next_link_from(text, pos, patterns) {
            ScanStep::NotFound { .. } => break,
            ScanStep::Found(found) => {
                if plain_start < found.offset {
                    out.push(Segment::Plain(PlainSegment {
                        text: &text[plain_start..found.offset],
                        range: base + plain_start..base + found.offset,
                    }));
                }
                let end = found.end();
                out.push(Segment::Link(LinkSegment {
                    trigger: found.trigger,
                    href: found.href,
                    label: found.label,
                    range: base + found.offset..base + end,
                }));
                pos = end;
                plain_start = end;
            }
            ScanStep::Faulted(faulted) => {
                log::warn!(
                    "Leaving `{}` at {} unlinked: {}",
                    faulted.trigger,
                    base + faulted.offset,
                    faulted.error
                );
                // the trigger stays part of the surrounding plain text
                pos = faulted.end();
            }
        }
    }

    if plain_start < text.len() {
        out.push(Segment::Plain(PlainSegment {
            text: &text[plain_start..],
            range: base + plain_start..base + text.len(),
        }));
    }
}
