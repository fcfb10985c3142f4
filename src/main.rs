//! grubpick - GRUB default kernel chooser
//!
//! A CLI for choosing which installed kernel a GRUB-based bootloader
//! boots by default.
//!
//! Features:
//! - Enumerate boot entries from the generated grub.cfg
//! - Pick one interactively or with --index
//! - Rewrite GRUB_DEFAULT in /etc/default/grub, preserving every
//!   other line and backing the file up first
//! - Run update-grub (or the detected equivalent) afterwards
//!
//! Usage: grubpick [OPTIONS]

mod app;
mod config;
mod grub;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::{App, RunMode};
use config::{CliArgs, Config};

fn main() {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let cli = match CliArgs::parse(&args[1..]) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run grubpick --help for usage");
            std::process::exit(2);
        }
    };

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("grubpick {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Run the application
    if let Err(e) = run_app(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"grubpick - GRUB default kernel chooser

USAGE:
    grubpick [OPTIONS]

OPTIONS:
    --grub-cfg <PATH>           Grub config file to parse (default: auto-detect)
    --defaults <PATH>           Defaults file to rewrite (default: /etc/default/grub)
    --index <N>                 Select entry N without prompting
    -l, --list                  List boot entries and exit
    --json                      With --list, print entries as JSON
    --shell <SHELL>             Shell the update program runs in (default: sh)
    --update-prg <PROG>         Program run to regenerate the config (default: auto-detect)
    --no-update                 Skip regenerating the config after rewriting
    --override-backup-failure   Keep going if backing up the defaults file fails
    -n, --dry-run               Show what would be done without executing
    -h, --help                  Print help information
    -v, --version               Print version information

SELECTION:
    Entries are numbered from 0 in the order they appear in grub.cfg.
    At the prompt, enter an index, or q / Esc to quit without changes.
    A * marks the entry currently set as GRUB_DEFAULT.

CONFIG:
    ~/.config/grubpick/config.toml
"#
    );
}

fn run_app(cli: CliArgs) -> Result<()> {
    let config = Config::load()
        .context("Failed to load configuration")?
        .merge_args(&cli);

    let app = App::new(config, cli.dry_run).context("Failed to initialize application")?;

    let mode = if cli.list {
        RunMode::List { json: cli.json }
    } else {
        RunMode::Select { index: cli.index }
    };

    app.run(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }
}
