use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use smartlinks_core::{PatternSet, RuleConfig, RuleError, ScanMode};

/// How `smartlinks link` writes its output.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// HTML anchors opening in a new context
    #[default]
    Html,
    /// Markdown inline links, for rewriting source files
    Markdown,
    /// The segment list as JSON
    Json,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: ScanMode,
    pub format: OutputFormat,
    /// Rules in priority order.
    pub patterns: Vec<RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ScanMode::default(),
            format: OutputFormat::default(),
            patterns: vec![RuleConfig::new(
                r"T(\d+)",
                "https://phabricator.wikimedia.org/T$1",
            )],
        }
    }
}

impl Config {
    /// Compile the configured rules, logging and returning the ones dropped.
    pub fn build_patterns(&self) -> (PatternSet, Vec<RuleError>) {
        let (set, errors) = PatternSet::from_rules(&self.patterns);
        log::debug!(
            "Built {} of {} configured pattern(s)",
            set.len(),
            self.patterns.len()
        );
        (set, errors)
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Replace the default rules.
    pub fn patterns(mut self, patterns: Vec<RuleConfig>) -> Self {
        self.config.patterns = patterns;
        self
    }

    pub fn pattern(mut self, rule: RuleConfig) -> Self {
        self.config.patterns.push(rule);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".smartlinks.toml", "smartlinks.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("smartlinks").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    let p = dirs::config_dir()?.join("smartlinks").join("config.toml");
    p.is_file().then_some(p)
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .smartlinks.toml, smartlinks.toml
/// 3) $XDG_CONFIG_HOME/smartlinks/config.toml, then the platform config dir
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    if let Some(p) = user_config_path() {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
