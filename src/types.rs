//! Core data types for grubpick
//!
//! This module defines the shared data structures used throughout the application.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

/// A bootable menu entry extracted from the generated GRUB configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootEntry {
    /// Stable identifier GRUB uses to address this entry.
    ///
    /// Stored exactly as it is written after `GRUB_DEFAULT=`, including
    /// the surrounding double quotes (converted from the single quotes
    /// used in grub.cfg).
    pub id: String,
    /// Human-readable menu title, when one could be read off the line
    pub title: Option<String>,
}

impl BootEntry {
    /// Identifier without the surrounding quotes, for comparisons
    /// against the value currently set in the defaults file
    pub fn bare_id(&self) -> &str {
        self.id.trim_matches('"')
    }

    /// Unstyled label for plain listings
    pub fn display_label(&self) -> String {
        match &self.title {
            Some(title) => format!("{}  {}", title, self.id),
            None => self.id.clone(),
        }
    }
}

/// Format a file's modification time for display
pub fn file_mtime(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let dt: DateTime<Local> = modified.into();
    Some(dt.format("%d.%m.%y %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_label_with_title() {
        let entry = BootEntry {
            id: "\"gnulinux-simple\"".to_string(),
            title: Some("Ubuntu".to_string()),
        };
        assert_eq!(entry.display_label(), "Ubuntu  \"gnulinux-simple\"");
    }

    #[test]
    fn test_display_label_without_title() {
        let entry = BootEntry {
            id: "\"gnulinux-simple\"".to_string(),
            title: None,
        };
        assert_eq!(entry.display_label(), "\"gnulinux-simple\"");
    }

    #[test]
    fn test_bare_id_strips_quotes() {
        let entry = BootEntry {
            id: "\"gnulinux-simple\"".to_string(),
            title: None,
        };
        assert_eq!(entry.bare_id(), "gnulinux-simple");
    }

    #[test]
    fn test_file_mtime_missing_path() {
        let path = PathBuf::from("/nonexistent/grubpick-mtime-test");
        assert_eq!(file_mtime(&path), None);
    }
}
