//! Defaults file rewriting and backup
//!
//! The defaults file (`/etc/default/grub`) is hand-edited KEY=value
//! text, so the rewrite touches exactly one key and keeps every other
//! non-blank line byte-for-byte in its original order. A `.bak` copy
//! is taken before any mutation; there is no transactional rollback,
//! the operator restores from the backup if a write goes wrong.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings key this tool rewrites
pub const GRUB_DEFAULT_KEY: &str = "GRUB_DEFAULT";

/// Suffix appended to the defaults path for the pre-mutation copy
pub const BACKUP_SUFFIX: &str = ".bak";

/// Split the defaults text into lines, dropping exactly-empty ones.
///
/// This also drops the trailing blank produced by a final newline.
pub fn load(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove every `key=` line, then append exactly one `key=value` line.
///
/// The relative order of all untouched lines is preserved; the
/// rewritten key always ends up last. `value` is written as-is.
pub fn upsert(lines: Vec<String>, key: &str, value: &str) -> Vec<String> {
    let prefix = format!("{}=", key);

    let mut kept: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.starts_with(&prefix))
        .collect();

    kept.push(format!("{}{}", prefix, value));
    kept
}

/// Join lines with newlines, with one trailing newline
pub fn serialize(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Path of the backup copy next to the defaults file
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy the current defaults file to its `.bak` sibling.
///
/// Overwrites any previous backup: this is a single-generation copy,
/// not a history. Must run strictly before any mutation; whether a
/// failure here aborts the run is the caller's policy.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let dest = backup_path(path);

    fs::copy(path, &dest)
        .with_context(|| format!("failed to back up {:?} to {:?}", path, dest))?;

    Ok(dest)
}

/// Rewrite the defaults file so `GRUB_DEFAULT` is set to `entry_id`.
///
/// Read-modify-write: any failure leaves the file in whatever state
/// the last successful write achieved, and the diagnostic points at
/// the `.bak` copy for manual recovery.
pub fn rewrite_default(path: &Path, entry_id: &str) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read defaults file {:?}", path))?;

    let lines = upsert(load(&text), GRUB_DEFAULT_KEY, entry_id);

    fs::write(path, serialize(&lines)).with_context(|| {
        format!(
            "failed to write defaults file {:?}; restore it from {:?} if it was left incomplete",
            path,
            backup_path(path)
        )
    })?;

    Ok(())
}
