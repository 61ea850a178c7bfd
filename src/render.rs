//! Sinks that materialize segments as HTML, Markdown or JSON.
//!
//! The HTML sink lives in the engine crate so the wasm bridge can share it.

use std::ops::Range;

pub use smartlinks_core::html::{HtmlSink, escape_html};
use smartlinks_core::{LinkSegment, Segment, Sink};

/// Rewrites triggers as Markdown inline links, leaving all other text as is.
#[derive(Debug, Default)]
pub struct MarkdownSink {
    out: String,
}

impl MarkdownSink {
    pub fn finish(self) -> String {
        self.out
    }
}

impl Sink for MarkdownSink {
    fn plain(&mut self, text: &str, _range: Range<usize>) {
        self.out.push_str(text);
    }

    fn link(&mut self, link: &LinkSegment<'_>) {
        self.out.push('[');
        for ch in link.label.text().chars() {
            if matches!(ch, '[' | ']' | '\\') {
                self.out.push('\\');
            }
            self.out.push(ch);
        }
        self.out.push_str("](");
        // angle brackets let the destination hold spaces and parentheses
        if link
            .href
            .chars()
            .any(|c| c.is_whitespace() || c == '(' || c == ')')
        {
            self.out.push('<');
            self.out.push_str(&link.href);
            self.out.push('>');
        } else {
            self.out.push_str(&link.href);
        }
        self.out.push(')');
    }
}

pub fn to_json(segments: &[Segment<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(segments)
}
