use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartlinks")]
#[command(author, version)]
#[command(about = "Turn ticket IDs, ticker symbols and issue numbers into links")]
#[command(
    long_about = "Smartlinks finds short trigger tokens in prose (ticket IDs like T1234, ticker \
    symbols like $GOOG, issue numbers like #42) using your own rules and converts each one into \
    a link. It renders HTML or Markdown from the command line and provides links and inlay hints \
    to editors through a language server."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file as HTML to stdout
    smartlinks link notes.md

    # Rewrite triggers as Markdown links in place
    smartlinks link --format markdown --write notes.md

    # List every link with its position
    smartlinks scan notes.md

    # Validate the configured rules
    smartlinks check

CONFIGURATION:

Smartlinks looks for configuration files in this order:
  1. Explicit --config path
  2. smartlinks.toml or .smartlinks.toml in current/parent directories
  3. ~/.config/smartlinks/config.toml (XDG)
  4. Built-in defaults

Example .smartlinks.toml:

    mode = \"earliest\"

    [[patterns]]
    detect = 'T(\\d+)'
    href = \"https://phabricator.wikimedia.org/T$1\"

    [[patterns]]
    detect = '#(\\d+)'
    href = \"https://github.com/owner/repo/issues/$1\"
    label = \"issue {#$1}\"")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, smartlinks will \
        search for .smartlinks.toml or smartlinks.toml in the current directory and its parents, \
        then fall back to ~/.config/smartlinks/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Markdown,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert triggers in a document into links
    #[command(
        long_about = "Convert every trigger in a document into a link. By default the result is \
        written to stdout in the format set in the configuration (HTML unless configured \
        otherwise). Use --write to rewrite the file in place or --check to see what would change."
    )]
    #[command(after_help = "\
EXAMPLES:

    # HTML to stdout
    smartlinks link notes.md

    # From stdin
    echo 'Fixed in T1234' | smartlinks link --format markdown

    # Check for unlinked triggers (exit code 1 if the file would change)
    smartlinks link --format markdown --check notes.md

    # Rewrite in place
    smartlinks link --format markdown --write notes.md

RULES:

  - A trigger must start the text, a line, or follow a space or tab
  - The earliest match wins; ties go to the rule listed first
  - Rules with an invalid pattern are skipped, the others still apply
  - A trigger directly after a link also links (T1T2 gives two links)
  - Markdown output is not re-linked unless a label puts a trigger after a
    space, so avoid such labels with --write")]
    Link {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        #[arg(help = "Output format (overrides the configured format)")]
        format: Option<FormatArg>,

        /// Check whether the document would change
        #[arg(long, conflicts_with = "write")]
        #[arg(help = "Show a diff and exit with code 1 if the output differs from the input")]
        check: bool,

        /// Rewrite the file in place
        #[arg(long, requires = "file")]
        #[arg(help = "Write the output back to the input file")]
        write: bool,
    },
    /// List every link found in a document
    #[command(
        long_about = "Scan a document and print one line per link in the form \
        FILE:LINE:COLUMN TRIGGER -> HREF. Useful to try out new rules before enabling them."
    )]
    Scan {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
    /// Validate the configured rules
    #[command(
        long_about = "Compile every configured rule and report the ones that would be skipped, \
        with the reason. Exits with code 1 if any rule is invalid."
    )]
    Check,
    /// Start the Language Server Protocol server
    #[command(
        long_about = "Start the smartlinks Language Server Protocol (LSP) server. It provides \
        document links for every trigger and inlay hints for rules with a label template."
    )]
    #[command(after_help = "\
The LSP server communicates via stdin/stdout and is typically launched automatically by your \
editor's LSP client. You generally don't need to run this command manually.")]
    Lsp,
}
