//! Listing the links found in a document, with their positions.

use smartlinks_core::{Label, PatternSet, ScanMode, Segment, segments};

/// A link found in a document. `line` and `column` are 1-indexed; columns
/// count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub trigger: String,
    pub href: String,
    pub label: Label,
}

pub fn occurrences(input: &str, patterns: &PatternSet, mode: ScanMode) -> Vec<Occurrence> {
    let mut line = 1;
    let mut column = 1;
    let mut consumed = 0;
    let mut found = Vec::new();

    for segment in segments(input, patterns.patterns(), mode) {
        let range = segment.range();
        // advance the cursor to the start of this segment
        for ch in input[consumed..range.start].chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        consumed = range.start;

        if let Segment::Link(link) = segment {
            found.push(Occurrence {
                line,
                column,
                offset: range.start,
                trigger: link.trigger.to_string(),
                href: link.href,
                label: link.label,
            });
        }
    }

    found
}
