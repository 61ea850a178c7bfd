//! Detection of short trigger tokens (ticket IDs, ticker symbols, issue
//! numbers) in prose, and their conversion into links.
//!
//! A [`Pattern`] wraps one user rule: a detector regex, an href template and
//! an optional label template. [`find_next_link`] picks the earliest valid
//! match across an ordered list of patterns; [`segments`] repeats that until
//! the text is exhausted, producing the plain/link segments a renderer needs.
//! [`decorations`] does the same for the visible windows of a live editor.
//!
//! ```rust
//! use smartlinks_core::{PatternSet, RuleConfig, ScanMode, Segment, segments};
//!
//! let rules = [RuleConfig::new(r"T(\d+)", "https://phabricator.wikimedia.org/T$1")];
//! let (set, dropped) = PatternSet::from_rules(&rules);
//! assert!(dropped.is_empty());
//!
//! let segs = segments("Fixed in T1234.", set.patterns(), ScanMode::Earliest);
//! assert!(matches!(&segs[1], Segment::Link(link) if link.trigger == "T1234"));
//! ```

pub mod error;
#[cfg(feature = "html")]
pub mod html;
pub mod label;
pub mod pattern;
pub mod pattern_set;
pub mod scanner;
pub mod segments;
pub mod template;
pub mod viewport;

pub use error::{DerivationError, PatternError, RuleError};
pub use label::Label;
pub use pattern::{Pattern, PatternMatch, is_boundary};
pub use pattern_set::{ActivePatterns, PatternSet, RuleConfig, Snapshot};
pub use scanner::{Faulted, Found, ScanMode, ScanStep, find_next_link, find_next_link_from};
pub use segments::{LinkSegment, PlainSegment, Segment, Sink, any_match, emit, segments};
pub use viewport::{Decoration, decorations};
