//! JavaScript bindings for editor hosts.
//!
//! Offsets crossing this boundary are UTF-16 code units, the unit of
//! JavaScript string indices.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use smartlinks_core::html::HtmlSink;
use smartlinks_core::{ActivePatterns, Label, PatternSet, RuleConfig, ScanMode, decorations, emit};

/// A live pattern set that can be swapped while documents stay open.
#[wasm_bindgen]
pub struct SmartLinks {
    patterns: ActivePatterns,
}

#[derive(Serialize)]
struct WidgetJson {
    pos: usize,
    from: usize,
    to: usize,
    href: String,
    label: Label,
}

fn parse_rules(rules_json: &str) -> Result<Vec<RuleConfig>, JsError> {
    serde_json::from_str(rules_json).map_err(|e| JsError::new(&format!("invalid rules: {e}")))
}

#[wasm_bindgen]
impl SmartLinks {
    /// Builds from a JSON array of `{detect, href, label?}` rules. Invalid
    /// rules are skipped.
    #[wasm_bindgen(constructor)]
    pub fn new(rules_json: &str) -> Result<SmartLinks, JsError> {
        let (set, _) = PatternSet::from_rules(&parse_rules(rules_json)?);
        Ok(SmartLinks {
            patterns: ActivePatterns::new(set),
        })
    }

    /// Replaces the rules. Returns one message per skipped rule.
    pub fn configure(&self, rules_json: &str) -> Result<Vec<String>, JsError> {
        let dropped = self
            .patterns
            .reload(&parse_rules(rules_json)?, ScanMode::Earliest);
        Ok(dropped.iter().map(ToString::to_string).collect())
    }

    pub fn version(&self) -> u64 {
        self.patterns.snapshot().version
    }

    pub fn render_html(&self, text: &str) -> String {
        let snapshot = self.patterns.snapshot();
        let mut sink = HtmlSink::default();
        emit(text, snapshot.patterns.patterns(), snapshot.mode, &mut sink);
        sink.finish()
    }

    /// JSON array of `{pos, from, to, href, label}` for links between
    /// `from` and `to`, ascending by `pos`.
    pub fn decorations_json(&self, doc: &str, from: usize, to: usize) -> Result<String, JsError> {
        let snapshot = self.patterns.snapshot();
        let window = utf16_to_byte(doc, from)..utf16_to_byte(doc, to);

        let widgets: Vec<WidgetJson> =
            decorations(doc, &[window], snapshot.patterns.patterns(), snapshot.mode)
                .into_iter()
                .map(|d| WidgetJson {
                    pos: byte_to_utf16(doc, d.pos),
                    from: byte_to_utf16(doc, d.trigger.start),
                    to: byte_to_utf16(doc, d.trigger.end),
                    href: d.href,
                    label: d.label,
                })
                .collect();

        serde_json::to_string(&widgets).map_err(|e| JsError::new(&e.to_string()))
    }
}

fn utf16_to_byte(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (idx, ch) in text.char_indices() {
        if seen >= units {
            return idx;
        }
        seen += ch.len_utf16();
    }
    text.len()
}

fn byte_to_utf16(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())]
        .chars()
        .map(char::len_utf16)
        .sum()
}
