//! Replacement templates for hrefs and labels.
//!
//! The grammar follows the replacement syntax editors already use in their
//! own settings files:
//!
//! - `$1` .. `$99`: positional capture group (two digits when that group exists)
//! - `$<name>`: named capture group
//! - `$&`: the whole match
//! - `` $` `` / `$'`: the text before / after the match
//! - `$$`: a literal dollar sign
//!
//! Anything else after a `$` is kept literally. Groups that did not take part
//! in the match, or that the detector does not define, expand to nothing.

use regex::{Captures, Regex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
    Named(String),
    Whole,
    Before,
    After,
}

/// A template compiled against a specific detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    pub fn parse(source: &str, detector: &Regex) -> Self {
        // captures_len counts group 0
        let group_count = detector.captures_len().saturating_sub(1);
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(dollar) = rest.find('$') {
            literal.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];
            let (piece, consumed) = parse_reference(after, group_count, detector);

            match piece {
                Some(Piece::Literal(text)) => literal.push_str(&text),
                Some(piece) => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(piece);
                }
                None => literal.push('$'),
            }
            rest = &after[consumed..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Self {
            source: source.to_string(),
            pieces,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the template has no literal text and no references.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Expand against `caps`, a match found in `haystack`.
    pub fn expand(&self, caps: &Captures<'_>, haystack: &str) -> String {
        let whole = caps.get(0);
        let mut out = String::new();

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Group(index) => {
                    if let Some(m) = caps.get(*index) {
                        out.push_str(m.as_str());
                    }
                }
                Piece::Named(name) => {
                    if let Some(m) = caps.name(name) {
                        out.push_str(m.as_str());
                    }
                }
                Piece::Whole => {
                    if let Some(m) = whole {
                        out.push_str(m.as_str());
                    }
                }
                Piece::Before => {
                    if let Some(m) = whole {
                        out.push_str(&haystack[..m.start()]);
                    }
                }
                Piece::After => {
                    if let Some(m) = whole {
                        out.push_str(&haystack[m.end()..]);
                    }
                }
            }
        }

        out
    }
}

/// Parse the reference following a `$`. Returns the piece (or `None` for a
/// bare dollar) and the number of bytes consumed after the `$`.
fn parse_reference(after: &str, group_count: usize, detector: &Regex) -> (Option<Piece>, usize) {
    let bytes = after.as_bytes();
    match bytes.first() {
        Some(b'$') => (Some(Piece::Literal("$".to_string())), 1),
        Some(b'&') => (Some(Piece::Whole), 1),
        Some(b'`') => (Some(Piece::Before), 1),
        Some(b'\'') => (Some(Piece::After), 1),
        Some(b'<') => match after.find('>') {
            Some(close) => {
                let name = &after[1..close];
                if !detector.capture_names().flatten().any(|n| n == name) {
                    log::debug!("Template references unknown group <{name}>");
                }
                (Some(Piece::Named(name.to_string())), close + 1)
            }
            None => (Some(Piece::Literal("$<".to_string())), 1),
        },
        Some(d) if d.is_ascii_digit() => {
            let first = usize::from(d - b'0');
            if let Some(d2) = bytes.get(1).filter(|b| b.is_ascii_digit()) {
                let two = first * 10 + usize::from(d2 - b'0');
                if (1..=group_count).contains(&two) {
                    return (Some(Piece::Group(two)), 2);
                }
            }
            if first == 0 {
                return (Some(Piece::Literal("$0".to_string())), 1);
            }
            if first > group_count {
                log::debug!("Template references ${first} but detector has {group_count} group(s)");
            }
            (Some(Piece::Group(first)), 1)
        }
        _ => (None, 0),
    }
}

/// Split a label template into `(prefix, active, suffix)` around its braced
/// active span. The span runs from the first `{` to the next `}`.
pub fn split_active_span(source: &str) -> Option<(&str, &str, &str)> {
    let open = source.find('{')?;
    let close = open + 1 + source[open + 1..].find('}')?;
    Some((&source[..open], &source[open + 1..close], &source[close + 1..]))
}
