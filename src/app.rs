//! Application orchestration
//!
//! Sequences a run end to end: read the generated configuration,
//! extract boot entries, resolve the operator's selection, back up
//! and rewrite the defaults file, then optionally regenerate the
//! configuration. The order is fixed; nothing mutates before the
//! selection is validated.

use crate::config::Config;
use crate::grub::{self, GrubEnv, RegenCommand};
use crate::types::{self, BootEntry};
use crate::ui::{self, Theme};
use anyhow::{bail, Context, Result};
use std::fs;

/// What a run should do once the entries are loaded
#[derive(Debug, Clone, Copy)]
pub enum RunMode {
    /// Print the entries and stop
    List { json: bool },
    /// Pick an entry (interactively unless an index is given) and
    /// write it as the default
    Select { index: Option<usize> },
}

/// Main application state
pub struct App {
    pub config: Config,
    pub env: GrubEnv,
    pub entries: Vec<BootEntry>,
    pub dry_run: bool,
}

impl App {
    /// Read the generated configuration and extract the entries.
    ///
    /// Fails before anything else happens when the configuration is
    /// unreadable or contains no entries.
    pub fn new(config: Config, dry_run: bool) -> Result<Self> {
        let env = grub::detect(
            config.paths.grub_cfg.as_deref(),
            config.update.program.as_deref(),
            &config.paths.defaults,
        );

        let text = fs::read_to_string(&env.config_path)
            .with_context(|| format!("failed to read GRUB config {:?}", env.config_path))?;

        let entries = grub::extract(&text);
        if entries.is_empty() {
            bail!("no boot entries found in {:?}", env.config_path);
        }

        Ok(Self {
            config,
            env,
            entries,
            dry_run,
        })
    }

    pub fn run(&self, mode: RunMode) -> Result<()> {
        match mode {
            RunMode::List { json } => self.list(json),
            RunMode::Select { index } => self.select_and_apply(index),
        }
    }

    /// Entry listing for scripts and curious operators; touches nothing
    fn list(&self, json: bool) -> Result<()> {
        if json {
            let text = serde_json::to_string_pretty(&self.entries)
                .context("failed to serialize entries")?;
            println!("{}", text);
            return Ok(());
        }

        let theme = Theme::from_name(self.config.theme);
        self.print_header();
        ui::print_listing(&self.entries, self.env.current_default.as_deref(), &theme);

        Ok(())
    }

    fn print_header(&self) {
        let generated = types::file_mtime(&self.env.config_path)
            .map(|mtime| format!(", generated {}", mtime))
            .unwrap_or_default();

        eprintln!(
            "{} entries in {:?}{}",
            self.entries.len(),
            self.env.config_path,
            generated
        );
    }

    fn select_and_apply(&self, index: Option<usize>) -> Result<()> {
        let entry = match index {
            Some(index) => self.resolve_index(index)?,
            None => {
                let theme = Theme::from_name(self.config.theme);
                self.print_header();

                match ui::select_entry(
                    &self.entries,
                    self.env.current_default.as_deref(),
                    &theme,
                    &self.config.prompt,
                )? {
                    Some(index) => &self.entries[index],
                    None => {
                        eprintln!("Selection cancelled, no changes made");
                        return Ok(());
                    }
                }
            }
        };

        self.apply(entry)
    }

    /// Bounds-check a non-interactive index; fatal before any mutation
    fn resolve_index(&self, index: usize) -> Result<&BootEntry> {
        self.entries.get(index).with_context(|| {
            format!(
                "index {} is out of range, pick 0 through {}",
                index,
                self.entries.len() - 1
            )
        })
    }

    /// Backup, rewrite, regenerate, in that order
    fn apply(&self, entry: &BootEntry) -> Result<()> {
        let defaults = &self.config.paths.defaults;
        let regen = RegenCommand::new(&self.config.update.shell, &self.env.update_program);

        eprintln!("Selected {}", entry.display_label());

        if self.dry_run {
            eprintln!(
                "Dry run: would back up {:?} to {:?}",
                defaults,
                grub::defaults::backup_path(defaults)
            );
            eprintln!(
                "Dry run: would set {}={} in {:?}",
                grub::GRUB_DEFAULT_KEY,
                entry.id,
                defaults
            );
            if self.config.update.run {
                eprintln!("{}", regen.run(true)?.message);
            }
            return Ok(());
        }

        match grub::backup(defaults) {
            Ok(dest) => eprintln!("Backed up {:?} to {:?}", defaults, dest),
            Err(e) if self.config.backup.override_failure => {
                eprintln!("Warning: backup failed, continuing: {:#}", e);
            }
            Err(e) => {
                return Err(e.context(
                    "backup failed; pass --override-backup-failure to proceed without one",
                ))
            }
        }

        grub::rewrite_default(defaults, &entry.id)
            .context("failed to write the new default (are you root?)")?;
        eprintln!(
            "Set {}={} in {:?}",
            grub::GRUB_DEFAULT_KEY,
            entry.id,
            defaults
        );

        if self.config.update.run {
            let result = regen.run(false)?;
            if result.success {
                eprintln!("{}", result.message);
            } else {
                eprintln!("{} (rerun manually: {})", result.message, result.command);
            }
        }

        Ok(())
    }
}
