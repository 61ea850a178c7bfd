pub mod config;
#[cfg(feature = "lsp")]
pub mod lsp;
pub mod render;
pub mod scan;

pub use config::Config;
pub use config::ConfigBuilder;
pub use config::OutputFormat;
pub use smartlinks_core::{PatternSet, RuleConfig, ScanMode};

use render::{HtmlSink, MarkdownSink};
use smartlinks_core::{emit, segments};

#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Converts every trigger in `input` into a link, rendered as `format`.
///
/// Rules that fail to compile are skipped (and logged); the rest still
/// apply.
///
/// # Examples
///
/// ```rust
/// use smartlinks::{ConfigBuilder, OutputFormat, linkify};
///
/// let cfg = ConfigBuilder::default().format(OutputFormat::Markdown).build();
/// let out = linkify("Fixed in T1234.", &cfg);
/// assert_eq!(out, "Fixed in [T1234](https://phabricator.wikimedia.org/T1234).");
/// ```
pub fn linkify(input: &str, config: &Config) -> String {
    let (patterns, _) = config.build_patterns();
    linkify_with(input, &patterns, config.mode, config.format)
}

pub fn linkify_with_defaults(input: &str) -> String {
    linkify(input, &Config::default())
}

/// Like [`linkify`] with an already compiled pattern set.
pub fn linkify_with(
    input: &str,
    patterns: &PatternSet,
    mode: ScanMode,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Html => {
            let mut sink = HtmlSink::default();
            emit(input, patterns.patterns(), mode, &mut sink);
            sink.finish()
        }
        OutputFormat::Markdown => {
            let mut sink = MarkdownSink::default();
            emit(input, patterns.patterns(), mode, &mut sink);
            sink.finish()
        }
        OutputFormat::Json => {
            let segs = segments(input, patterns.patterns(), mode);
            render::to_json(&segs).unwrap_or_else(|e| {
                log::error!("Failed to serialize segments: {e}");
                String::new()
            })
        }
    }
}
