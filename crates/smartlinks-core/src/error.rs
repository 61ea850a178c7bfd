//! Error types for rule construction and link derivation.

/// Why a configured rule could not be turned into a [`Pattern`](crate::Pattern).
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("detect pattern is empty")]
    EmptyDetector,
    #[error("href template is empty")]
    EmptyHref,
    #[error("invalid detect pattern `{pattern}`: {source}")]
    InvalidDetector {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A rule that was dropped while building a [`PatternSet`](crate::PatternSet).
#[derive(Debug, Clone, thiserror::Error)]
#[error("rule #{index} dropped: {error}")]
pub struct RuleError {
    /// Position of the rule in the configured list.
    pub index: usize,
    pub error: PatternError,
}

/// Failure to derive an href or label for a trigger the detector already matched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivationError {
    /// The detector no longer matches the trigger on its own.
    #[error("detector does not match its own trigger `{trigger}`")]
    NoMatch { trigger: String },
    #[error("href template produced an empty link for `{trigger}`")]
    EmptyHref { trigger: String },
}
