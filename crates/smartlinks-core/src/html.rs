//! HTML rendering of segments.

use std::ops::Range;

use crate::label::Label;
use crate::segments::{LinkSegment, Sink};

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Renders links as anchors that open in a new browsing context.
#[derive(Debug, Default)]
pub struct HtmlSink {
    out: String,
}

impl HtmlSink {
    pub fn finish(self) -> String {
        self.out
    }
}

impl Sink for HtmlSink {
    fn plain(&mut self, text: &str, _range: Range<usize>) {
        escape_html(text, &mut self.out);
    }

    fn link(&mut self, link: &LinkSegment<'_>) {
        self.out.push_str("<a href=\"");
        escape_html(&link.href, &mut self.out);
        self.out
            .push_str("\" class=\"smart-link\" target=\"_blank\" rel=\"noopener noreferrer\">");
        match &link.label {
            Label::Flat { text } => escape_html(text, &mut self.out),
            Label::Padded {
                left,
                active,
                right,
            } => {
                escape_html(left, &mut self.out);
                self.out.push_str("<span class=\"smart-link-active\">");
                escape_html(active, &mut self.out);
                self.out.push_str("</span>");
                escape_html(right, &mut self.out);
            }
        }
        self.out.push_str("</a>");
    }
}
