use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use similar::{ChangeTag, TextDiff};

use smartlinks::config::{self, Config};
use smartlinks::{OutputFormat, linkify_with};

mod cli;
use cli::{Cli, Commands, FormatArg};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, file: &Option<PathBuf>) -> io::Result<Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = config::load(explicit, &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

fn print_diff(file_path: &str, original: &str, linked: &str) {
    let diff = TextDiff::from_lines(original, linked);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("---");
        }

        println!("Diff in {}:{}:", file_path, group[0].old_range().start + 1);

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("-", "\x1b[31m"), // red
                    ChangeTag::Insert => ("+", "\x1b[32m"), // green
                    ChangeTag::Equal => (" ", "\x1b[0m"),   // normal
                };

                print!("{}{}{}", style, sign, change.value());

                if change.tag() != ChangeTag::Equal {
                    print!("\x1b[0m");
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Link {
            file,
            format,
            check,
            write,
        } => {
            let cfg = load_config(cli.config.as_deref(), &file)?;
            let (patterns, dropped) = cfg.build_patterns();
            for err in &dropped {
                eprintln!("\x1b[33mwarning\x1b[0m: {err}");
            }

            let format = match format {
                Some(FormatArg::Html) => OutputFormat::Html,
                Some(FormatArg::Markdown) => OutputFormat::Markdown,
                Some(FormatArg::Json) => OutputFormat::Json,
                None => cfg.format,
            };

            let input = read_all(file.as_ref())?;
            let output = linkify_with(&input, &patterns, cfg.mode, format);

            if check {
                if input != output {
                    let file_name = file.as_ref().and_then(|p| p.to_str()).unwrap_or("<stdin>");
                    print_diff(file_name, &input, &output);
                    std::process::exit(1);
                }
                if file.is_some() {
                    println!("No unlinked triggers");
                }
            } else if write {
                // clap guarantees a file with --write
                if let Some(file_path) = &file {
                    fs::write(file_path, &output)?;
                    println!("Linked {}", file_path.display());
                }
            } else {
                print!("{output}");
            }

            Ok(())
        }
        Commands::Scan { file } => {
            let cfg = load_config(cli.config.as_deref(), &file)?;
            let (patterns, _) = cfg.build_patterns();
            let input = read_all(file.as_ref())?;
            let file_name = file.as_ref().and_then(|p| p.to_str()).unwrap_or("<stdin>");

            for occ in smartlinks::scan::occurrences(&input, &patterns, cfg.mode) {
                println!(
                    "{}:{}:{} {} -> {}",
                    file_name, occ.line, occ.column, occ.trigger, occ.href
                );
            }
            Ok(())
        }
        Commands::Check => {
            let cfg = load_config(cli.config.as_deref(), &None)?;
            let (patterns, dropped) = cfg.build_patterns();

            if dropped.is_empty() {
                println!("All {} rule(s) are valid", patterns.len());
                return Ok(());
            }

            for err in &dropped {
                let rule = &cfg.patterns[err.index];
                println!(
                    "\x1b[31merror\x1b[0m[rule-{}]: {} (detect = {:?})",
                    err.index, err.error, rule.detect
                );
            }
            println!(
                "\n{} of {} rule(s) will be skipped",
                dropped.len(),
                cfg.patterns.len()
            );
            std::process::exit(1);
        }
        #[cfg(feature = "lsp")]
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async { smartlinks::lsp::run().await })?;
            Ok(())
        }
        #[cfg(not(feature = "lsp"))]
        Commands::Lsp => {
            eprintln!("Error: smartlinks was built without the `lsp` feature");
            std::process::exit(1);
        }
    }
}
