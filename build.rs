use clap::CommandFactory;
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

#[path = "src/cli.rs"]
mod cli;

use cli::Cli;

fn generate_completions(outdir: &Path) -> Result<()> {
    let mut cmd = Cli::command();

    for shell in [
        Shell::Bash,
        Shell::Fish,
        Shell::Zsh,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        generate_to(shell, &mut cmd, "smartlinks", outdir)?;
    }

    Ok(())
}

/// One page for the binary plus `smartlinks-<subcommand>.1` for each subcommand.
fn generate_man_pages() -> Result<()> {
    let out_dir = PathBuf::from("target/man");
    fs::create_dir_all(&out_dir)?;

    let cmd = Cli::command();

    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(out_dir.join("smartlinks.1"), buffer)?;

    for subcommand in cmd.get_subcommands() {
        let subcommand_name = subcommand.get_name();
        if subcommand_name == "help" {
            continue;
        }

        let name = format!("smartlinks-{subcommand_name}");
        let mut buffer = Vec::new();
        Man::new(subcommand.clone())
            .title(&name)
            .render(&mut buffer)?;

        // Synopsis lines should show the full invocation
        let content = String::from_utf8_lossy(&buffer).replace(
            &format!("\\fB{subcommand_name}\\fR"),
            &format!("\\fBsmartlinks {subcommand_name}\\fR"),
        );
        fs::write(out_dir.join(format!("{name}.1")), content.as_bytes())?;
    }

    Ok(())
}

fn main() -> Result<()> {
    if let Some(outdir) = env::var_os("OUT_DIR") {
        generate_completions(Path::new(&outdir))?;
    }

    generate_man_pages()?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
