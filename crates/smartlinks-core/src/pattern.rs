//! A single trigger rule: detector, href template and optional label template.

use regex::Regex;

use crate::error::{DerivationError, PatternError};
use crate::label::Label;
use crate::template::{Template, split_active_span};

/// A structural match of a detector that passed the boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub trigger: &'t str,
}

#[derive(Debug, Clone)]
enum LabelTemplate {
    Flat(Template),
    Padded {
        left: Template,
        active: Template,
        right: Template,
    },
}

/// A compiled rule. Immutable once built.
#[derive(Debug, Clone)]
pub struct Pattern {
    detector: Regex,
    href: Template,
    label: Option<LabelTemplate>,
}

/// Whether a trigger starting at `start` begins a word: nothing precedes it,
/// or the preceding character is a space, tab or newline.
///
/// Checked by hand after matching rather than with a look-behind so the rule
/// is identical whatever the detector contains.
pub fn is_boundary(text: &str, start: usize) -> bool {
    matches!(
        text[..start].chars().next_back(),
        None | Some(' ' | '\t' | '\n')
    )
}

impl Pattern {
    pub fn new(detect: &str, href: &str, label: Option<&str>) -> Result<Self, PatternError> {
        if detect.is_empty() {
            return Err(PatternError::EmptyDetector);
        }
        if href.is_empty() {
            return Err(PatternError::EmptyHref);
        }

        let detector = Regex::new(detect).map_err(|source| PatternError::InvalidDetector {
            pattern: detect.to_string(),
            source,
        })?;

        let href = Template::parse(href, &detector);
        let label = label.filter(|l| !l.is_empty()).map(|source| {
            match split_active_span(source) {
                Some((left, active, right)) => LabelTemplate::Padded {
                    left: Template::parse(left, &detector),
                    active: Template::parse(active, &detector),
                    right: Template::parse(right, &detector),
                },
                None => LabelTemplate::Flat(Template::parse(source, &detector)),
            }
        });

        log::debug!("Compiled pattern `{detect}` -> `{}`", href.source());

        Ok(Self {
            detector,
            href,
            label,
        })
    }

    pub fn detector(&self) -> &Regex {
        &self.detector
    }

    pub fn href_template(&self) -> &str {
        self.href.source()
    }

    pub fn has_label_template(&self) -> bool {
        self.label.is_some()
    }

    /// The detector's first match in `text`, if it starts at a boundary.
    ///
    /// A first match that fails the boundary check is not retried further on;
    /// [`Pattern::find_from`] does that.
    pub fn matches<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        let m = self.detector.find(text)?;
        if m.is_empty() || !is_boundary(text, m.start()) {
            return None;
        }
        Some(PatternMatch {
            start: m.start(),
            end: m.end(),
            trigger: m.as_str(),
        })
    }

    /// The first non-empty match at or after `from` that starts at a boundary.
    ///
    /// The boundary check looks at the real character before the candidate,
    /// including text before `from`.
    pub fn find_from<'t>(&self, text: &'t str, from: usize) -> Option<PatternMatch<'t>> {
        let mut pos = from;
        while pos <= text.len() {
            let m = self.detector.find_at(text, pos)?;
            if !m.is_empty() && is_boundary(text, m.start()) {
                return Some(PatternMatch {
                    start: m.start(),
                    end: m.end(),
                    trigger: m.as_str(),
                });
            }
            // retry from the next character so overlapping candidates are seen
            pos = match text[m.start()..].chars().next() {
                Some(c) => m.start() + c.len_utf8(),
                None => break,
            };
        }
        None
    }

    /// Substitute the href template against the trigger alone.
    pub fn build_href(&self, trigger: &str) -> Result<String, DerivationError> {
        let caps = self
            .detector
            .captures(trigger)
            .ok_or_else(|| DerivationError::NoMatch {
                trigger: trigger.to_string(),
            })?;
        // caps.get(0) always exists for a successful match
        let whole = caps.get(0).map_or(0..trigger.len(), |m| m.range());

        let mut href = String::with_capacity(trigger.len() + self.href.source().len());
        href.push_str(&trigger[..whole.start]);
        href.push_str(&self.href.expand(&caps, trigger));
        href.push_str(&trigger[whole.end..]);

        if href.is_empty() {
            return Err(DerivationError::EmptyHref {
                trigger: trigger.to_string(),
            });
        }
        Ok(href)
    }

    /// Render the label for a trigger. Without a label template the trigger
    /// itself is the label.
    pub fn build_label(&self, trigger: &str) -> Result<Label, DerivationError> {
        let Some(template) = &self.label else {
            return Ok(Label::flat(trigger));
        };

        let caps = self
            .detector
            .captures(trigger)
            .ok_or_else(|| DerivationError::NoMatch {
                trigger: trigger.to_string(),
            })?;

        let label = match template {
            LabelTemplate::Flat(t) => Label::flat(t.expand(&caps, trigger)),
            LabelTemplate::Padded {
                left,
                active,
                right,
            } => Label::padded(
                left.expand(&caps, trigger),
                active.expand(&caps, trigger),
                right.expand(&caps, trigger),
            ),
        };

        if label.is_empty() {
            return Ok(Label::flat(trigger));
        }
        Ok(label)
    }

    /// Derive both href and label for a trigger.
    pub fn derive(&self, trigger: &str) -> Result<(String, Label), DerivationError> {
        let href = self.build_href(trigger)?;
        let label = self.build_label(trigger)?;
        Ok((href, label))
    }
}
