//! Configuration management for grubpick
//!
//! Handles the config file, command-line flags, and their merge into
//! one value handed to the orchestrator.
//! Config file location: ~/.config/grubpick/config.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub paths: PathOptions,
    pub update: UpdateOptions,
    pub backup: BackupOptions,
    pub prompt: PromptOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Auto,
            paths: PathOptions::default(),
            update: UpdateOptions::default(),
            backup: BackupOptions::default(),
            prompt: PromptOptions::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("grubpick");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Fold command-line flags over the file configuration.
    ///
    /// Flags win; unset flags leave the file values alone. The result
    /// is the single configuration value the rest of the program sees.
    pub fn merge_args(mut self, args: &CliArgs) -> Self {
        if let Some(path) = &args.grub_cfg {
            self.paths.grub_cfg = Some(path.clone());
        }
        if let Some(path) = &args.defaults {
            self.paths.defaults = path.clone();
        }
        if let Some(shell) = &args.shell {
            self.update.shell = shell.clone();
        }
        if let Some(program) = &args.update_program {
            self.update.program = Some(program.clone());
        }
        if args.no_update {
            self.update.run = false;
        }
        if args.override_backup_failure {
            self.backup.override_failure = true;
        }
        self
    }
}

/// File locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Generated configuration to parse; unset means auto-detect
    pub grub_cfg: Option<PathBuf>,
    /// Defaults file the selection is written to
    pub defaults: PathBuf,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            grub_cfg: None,
            defaults: PathBuf::from("/etc/default/grub"),
        }
    }
}

/// Regeneration behavior after the defaults file changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    pub run: bool,
    pub shell: String,
    /// Program to run; unset means auto-detect
    pub program: Option<String>,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            run: true,
            shell: "sh".to_string(),
            program: None,
        }
    }
}

/// Backup failure policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupOptions {
    /// Keep going when the pre-mutation backup cannot be written
    pub override_failure: bool,
}

/// Interactive prompt bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptOptions {
    /// Invalid inputs tolerated before the run fails
    pub max_attempts: u32,
    /// Seconds to wait for input before cancelling; 0 waits forever
    pub timeout_secs: u64,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            timeout_secs: 0,
        }
    }
}

/// Output styling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Auto,
    Color,
    Plain,
}

/// Parsed command-line flags
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub grub_cfg: Option<PathBuf>,
    pub defaults: Option<PathBuf>,
    pub shell: Option<String>,
    pub update_program: Option<String>,
    pub no_update: bool,
    pub override_backup_failure: bool,
    pub index: Option<usize>,
    pub list: bool,
    pub json: bool,
    pub dry_run: bool,
    pub help: bool,
    pub version: bool,
}

impl CliArgs {
    /// Parse flags from the argument list (without the program name)
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--grub-cfg" => parsed.grub_cfg = Some(PathBuf::from(value_of(arg, &mut iter)?)),
                "--defaults" => parsed.defaults = Some(PathBuf::from(value_of(arg, &mut iter)?)),
                "--shell" => parsed.shell = Some(value_of(arg, &mut iter)?),
                "--update-prg" => parsed.update_program = Some(value_of(arg, &mut iter)?),
                "--index" => {
                    let raw = value_of(arg, &mut iter)?;
                    let index = raw
                        .parse()
                        .with_context(|| format!("{:?} is not a valid index for --index", raw))?;
                    parsed.index = Some(index);
                }
                "--no-update" => parsed.no_update = true,
                "--override-backup-failure" => parsed.override_backup_failure = true,
                "--list" | "-l" => parsed.list = true,
                "--json" => parsed.json = true,
                "--dry-run" | "-n" => parsed.dry_run = true,
                "--help" | "-h" => parsed.help = true,
                "--version" | "-v" => parsed.version = true,
                other => bail!("unknown flag {:?}", other),
            }
        }

        Ok(parsed)
    }
}

/// Next argument as the value of a flag that requires one
fn value_of(flag: &str, iter: &mut std::slice::Iter<'_, String>) -> Result<String> {
    iter.next()
        .map(|value| value.to_string())
        .with_context(|| format!("{} requires a value", flag))
}
