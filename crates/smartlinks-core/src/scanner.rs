//! Finding the next link across an ordered list of patterns.

use crate::error::DerivationError;
use crate::label::Label;
use crate::pattern::{Pattern, PatternMatch};

/// How multiple patterns share a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ScanMode {
    /// All patterns compete; the earliest match wins, ties go to the pattern
    /// declared first.
    #[default]
    Earliest,
    /// Each pattern in turn splits whatever plain text the previous patterns
    /// left behind.
    Sequential,
}

/// A link found by the scanner. Offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<'t> {
    pub offset: usize,
    /// Index of the winning pattern in the list that was scanned.
    pub pattern: usize,
    pub pre_text: &'t str,
    pub trigger: &'t str,
    pub href: String,
    pub label: Label,
    pub remaining: &'t str,
}

impl Found<'_> {
    pub fn end(&self) -> usize {
        self.offset + self.trigger.len()
    }
}

/// A match whose href or label could not be derived. The trigger should be
/// passed through as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faulted<'t> {
    pub offset: usize,
    pub pattern: usize,
    pub pre_text: &'t str,
    pub trigger: &'t str,
    pub error: DerivationError,
    pub remaining: &'t str,
}

impl Faulted<'_> {
    pub fn end(&self) -> usize {
        self.offset + self.trigger.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep<'t> {
    /// Nothing matched; `remaining` is all of the unscanned text.
    NotFound { remaining: &'t str },
    Found(Found<'t>),
    Faulted(Faulted<'t>),
}

/// Find the first link in `text`.
///
/// The start of `text` counts as a boundary, so feeding each step's
/// `remaining` back in links triggers that directly follow each other.
pub fn find_next_link<'t>(text: &'t str, patterns: &[Pattern]) -> ScanStep<'t> {
    let mut best: Option<(usize, PatternMatch<'t>, Result<String, DerivationError>)> = None;

    for (index, pattern) in patterns.iter().enumerate() {
        let Some((m, href)) = first_usable_match(pattern, text) else {
            continue;
        };
        // strictly smaller: on a tie the earlier pattern keeps the win
        if best.as_ref().is_none_or(|(_, b, _)| m.start < b.start) {
            best = Some((index, m, href));
        }
    }

    let Some((index, m, href)) = best else {
        return ScanStep::NotFound { remaining: text };
    };

    let pre_text = &text[..m.start];
    let remaining = &text[m.end..];
    let derived = href.and_then(|href| Ok((href, patterns[index].build_label(m.trigger)?)));

    match derived {
        Ok((href, label)) => ScanStep::Found(Found {
            offset: m.start,
            pattern: index,
            pre_text,
            trigger: m.trigger,
            href,
            label,
            remaining,
        }),
        Err(error) => ScanStep::Faulted(Faulted {
            offset: m.start,
            pattern: index,
            pre_text,
            trigger: m.trigger,
            error,
            remaining,
        }),
    }
}

/// [`find_next_link`] over `text[from..]`, with offsets reported relative to
/// `text`.
///
/// `from` is the end of the previous step, so it counts as a boundary just
/// like the start of `remaining` does. It is clamped to the text and moved
/// back to the nearest char boundary.
pub fn find_next_link_from<'t>(text: &'t str, from: usize, patterns: &[Pattern]) -> ScanStep<'t> {
    let mut from = from.min(text.len());
    while !text.is_char_boundary(from) {
        from -= 1;
    }

    match find_next_link(&text[from..], patterns) {
        ScanStep::Found(found) => ScanStep::Found(Found {
            offset: from + found.offset,
            ..found
        }),
        ScanStep::Faulted(faulted) => ScanStep::Faulted(Faulted {
            offset: from + faulted.offset,
            ..faulted
        }),
        not_found => not_found,
    }
}

/// The pattern's first valid match whose href is not empty. A match that
/// cannot be derived at all is returned with its error.
fn first_usable_match<'t>(
    pattern: &Pattern,
    text: &'t str,
) -> Option<(PatternMatch<'t>, Result<String, DerivationError>)> {
    let mut pos = 0;
    loop {
        let m = pattern.find_from(text, pos)?;
        match pattern.build_href(m.trigger) {
            Err(DerivationError::EmptyHref { .. }) => {
                log::debug!("Empty href for `{}`, skipping", m.trigger);
                // matches are never empty, so this always advances
                pos = m.start + text[m.start..].chars().next().map_or(1, char::len_utf8);
            }
            href => return Some((m, href)),
        }
    }
}
