//! Environment detection for GRUB installs
//!
//! Detects:
//! - Where the generated grub.cfg lives (distros disagree)
//! - Which regeneration program is available on PATH
//! - The value currently set for GRUB_DEFAULT, for display

use crate::grub::commands::command_exists;
use crate::grub::defaults::GRUB_DEFAULT_KEY;
use std::path::{Path, PathBuf};

/// Well-known locations of the generated configuration
const CONFIG_CANDIDATES: &[&str] = &[
    "/boot/grub/grub.cfg",
    "/boot/grub2/grub.cfg",
    "/boot/efi/EFI/grub/grub.cfg",
];

/// Regeneration programs shipped by the common distros
const UPDATE_CANDIDATES: &[&str] = &[
    "update-grub",
    "update-grub2",
    "grub-mkconfig",
    "grub2-mkconfig",
];

/// Detected (or operator-pinned) GRUB environment
#[derive(Debug, Clone)]
pub struct GrubEnv {
    pub config_path: PathBuf,
    pub update_program: String,
    /// Current GRUB_DEFAULT value from the defaults file, quotes
    /// trimmed, if one is set
    pub current_default: Option<String>,
}

/// Resolve the environment, honoring explicit overrides first.
///
/// Unset fields fall back to probing well-known locations; when
/// nothing probes successfully the first candidate is used so the
/// later file read produces a concrete diagnostic.
pub fn detect(
    config_override: Option<&Path>,
    program_override: Option<&str>,
    defaults_path: &Path,
) -> GrubEnv {
    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => find_config_path(),
    };

    let update_program = match program_override {
        Some(program) => program.to_string(),
        None => find_update_program(),
    };

    let current_default = std::fs::read_to_string(defaults_path)
        .ok()
        .and_then(|text| current_default_from(&text));

    GrubEnv {
        config_path,
        update_program,
        current_default,
    }
}

/// First existing candidate, or the conventional location
fn find_config_path() -> PathBuf {
    CONFIG_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(CONFIG_CANDIDATES[0]))
}

/// First candidate present on PATH, or the conventional name
fn find_update_program() -> String {
    UPDATE_CANDIDATES
        .iter()
        .find(|cmd| command_exists(cmd))
        .unwrap_or(&UPDATE_CANDIDATES[0])
        .to_string()
}

/// Value of the last GRUB_DEFAULT= line, quotes trimmed
fn current_default_from(text: &str) -> Option<String> {
    let prefix = format!("{}=", GRUB_DEFAULT_KEY);

    text.lines()
        .filter_map(|line| line.strip_prefix(&prefix))
        .last()
        .map(|value| value.trim().trim_matches('"').trim_matches('\'').to_string())
}
