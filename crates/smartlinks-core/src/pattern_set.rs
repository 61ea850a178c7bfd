//! Ordered rule sets and the swappable holder scans read from.

use std::sync::{Arc, RwLock};

use crate::error::RuleError;
use crate::pattern::Pattern;
use crate::scanner::ScanMode;

/// One user rule as stored in settings. Order in a list is significant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RuleConfig {
    #[cfg_attr(feature = "serde", serde(alias = "regexp"))]
    pub detect: String,
    #[cfg_attr(feature = "serde", serde(alias = "replacement"))]
    pub href: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "render", skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,
}

impl RuleConfig {
    pub fn new(detect: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            detect: detect.into(),
            href: href.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Compiled rules in declared order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Compile every rule, dropping the ones that fail. The survivors keep
    /// their relative order.
    pub fn from_rules(rules: &[RuleConfig]) -> (Self, Vec<RuleError>) {
        let mut patterns = Vec::with_capacity(rules.len());
        let mut errors = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            match Pattern::new(&rule.detect, &rule.href, rule.label.as_deref()) {
                Ok(pattern) => patterns.push(pattern),
                Err(error) => {
                    log::warn!("Dropping rule #{index} (`{}`): {error}", rule.detect);
                    errors.push(RuleError { index, error });
                }
            }
        }

        (Self { patterns }, errors)
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl From<Vec<Pattern>> for PatternSet {
    fn from(patterns: Vec<Pattern>) -> Self {
        Self::new(patterns)
    }
}

/// A consistent view of the active rules and the mode they are scanned in.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub patterns: Arc<PatternSet>,
    pub mode: ScanMode,
}

#[derive(Debug)]
struct Slot {
    version: u64,
    patterns: Arc<PatternSet>,
    mode: ScanMode,
}

/// The currently active [`PatternSet`] and [`ScanMode`], replaced together
/// on every configuration change.
///
/// Readers take a [`Snapshot`] and scan it without holding the lock, so a
/// scan started before a rebuild keeps seeing the old set in full.
#[derive(Debug)]
pub struct ActivePatterns {
    slot: RwLock<Slot>,
}

impl ActivePatterns {
    pub fn new(patterns: PatternSet) -> Self {
        Self::with_mode(patterns, ScanMode::default())
    }

    pub fn with_mode(patterns: PatternSet, mode: ScanMode) -> Self {
        Self {
            slot: RwLock::new(Slot {
                version: 0,
                patterns: Arc::new(patterns),
                mode,
            }),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        // a poisoned lock still holds a complete slot: writers only swap fields
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        Snapshot {
            version: slot.version,
            patterns: Arc::clone(&slot.patterns),
            mode: slot.mode,
        }
    }

    /// Swap in a new set and mode and return their version.
    pub fn replace(&self, patterns: PatternSet, mode: ScanMode) -> u64 {
        let patterns = Arc::new(patterns);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        slot.version += 1;
        slot.patterns = patterns;
        slot.mode = mode;
        log::debug!(
            "Activated {} pattern(s) as version {}",
            slot.patterns.len(),
            slot.version
        );
        slot.version
    }

    /// Rebuild from rules and swap; returns the dropped rules.
    pub fn reload(&self, rules: &[RuleConfig], mode: ScanMode) -> Vec<RuleError> {
        let (set, errors) = PatternSet::from_rules(rules);
        self.replace(set, mode);
        errors
    }
}

impl Default for ActivePatterns {
    fn default() -> Self {
        Self::new(PatternSet::default())
    }
}
