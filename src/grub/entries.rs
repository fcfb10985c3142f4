//! Boot entry extraction from grub.cfg
//!
//! Scans the generated GRUB configuration for menu entries and pulls
//! out their stable identifiers. Identifiers are opaque tokens; the
//! only surgery applied is converting the shell single quotes around
//! them into the double quotes expected in the defaults file.

use crate::types::BootEntry;
use anyhow::{Context, Result};

/// Marker preceding every boot entry identifier in grub.cfg.
///
/// The trailing space is significant: the token is a shell variable
/// reference followed by a literal space, appearing exactly once per
/// menu entry in the generated file.
pub const ENTRY_MARKER: &str = "$menuentry_id_option ";

/// A well-formed entry line ends with the identifier followed by the
/// menu block opener.
const BLOCK_OPEN: &str = " {";

/// Extract all boot entry identifiers from the configuration text.
///
/// Entries are returned in file order, duplicates preserved. A line
/// that carries the marker but not the expected shape is reported to
/// stderr and skipped; the scan continues. Empty input yields an
/// empty list.
pub fn extract(config_text: &str) -> Vec<BootEntry> {
    let mut entries = Vec::new();

    for line in config_text.split('\n') {
        if !line.contains(ENTRY_MARKER) {
            continue;
        }

        match extract_id(line) {
            Ok(id) => entries.push(BootEntry {
                id: id.replace('\'', "\""),
                title: extract_title(line),
            }),
            Err(e) => eprintln!("Skipping malformed menu entry line {:?}: {:#}", line, e),
        }
    }

    entries
}

/// Pull the raw identifier out of a single marker-bearing line
fn extract_id(line: &str) -> Result<&str> {
    cut_rear(cut_front(line)?)
}

/// Everything strictly after the marker
fn cut_front(line: &str) -> Result<&str> {
    let idx = line
        .find(ENTRY_MARKER)
        .with_context(|| format!("{:?} not found in {:?}", ENTRY_MARKER, line))?;

    Ok(&line[idx + ENTRY_MARKER.len()..])
}

/// Strip the trailing block opener; its absence signals an unexpected
/// line shape
fn cut_rear(rest: &str) -> Result<&str> {
    rest.strip_suffix(BLOCK_OPEN)
        .with_context(|| format!("{:?} does not end with {:?}", rest, BLOCK_OPEN))
}

/// Menu title from the same line: the text between the first pair of
/// single quotes. Best effort, never an error.
fn extract_title(line: &str) -> Option<String> {
    let start = line.find('\'')? + 1;
    let end = line[start..].find('\'')? + start;
    let title = &line[start..end];

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY_LINE: &str = "152:menuentry 'Ubuntu, with Linux 5.11.0' --class ubuntu --class gnu-linux --class gnu --class os $menuentry_id_option 'gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03' {";

    #[test]
    fn test_cut_front() {
        let expected =
            "'gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03' {";
        assert_eq!(cut_front(ENTRY_LINE).unwrap(), expected);

        assert!(cut_front("").is_err());
    }

    #[test]
    fn test_cut_rear() {
        let expected = "152:menuentry 'Ubuntu, with Linux 5.11.0' --class ubuntu --class gnu-linux --class gnu --class os $menuentry_id_option 'gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03'";
        assert_eq!(cut_rear(ENTRY_LINE).unwrap(), expected);

        assert!(cut_rear("").is_err());
    }

    #[test]
    fn test_extract_id() {
        let expected = "'gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03'";
        assert_eq!(extract_id(ENTRY_LINE).unwrap(), expected);
    }

    #[test]
    fn test_extract_three_stanzas_in_order() {
        let config = r#"set timeout=5
menuentry 'Ubuntu, with Linux 5.11.0' --class ubuntu $menuentry_id_option 'gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03' {
    linux /vmlinuz-5.11.0
}
menuentry 'Ubuntu, with Linux 5.11.0 (recovery mode)' --class ubuntu $menuentry_id_option 'gnulinux-5.11.0-recovery-b70cb823-9505-4ab6-bc0a-ca359515bf03' {
    linux /vmlinuz-5.11.0 recovery
}
menuentry 'Ubuntu, with Linux 5.8.0.old' --class ubuntu $menuentry_id_option 'gnulinux-5.8.0.old-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03' {
    linux /vmlinuz-5.8.0
}
"#;
        let entries = extract(config);
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].id,
            "\"gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03\""
        );
        assert_eq!(
            entries[1].id,
            "\"gnulinux-5.11.0-recovery-b70cb823-9505-4ab6-bc0a-ca359515bf03\""
        );
        assert_eq!(
            entries[2].id,
            "\"gnulinux-5.8.0.old-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03\""
        );
    }

    #[test]
    fn test_extract_converts_quotes_only() {
        let entries = extract(ENTRY_LINE);
        assert_eq!(entries.len(), 1);
        // Single quotes become double quotes, nothing else changes
        assert_eq!(
            entries[0].id,
            "\"gnulinux-5.11.0-advanced-b70cb823-9505-4ab6-bc0a-ca359515bf03\""
        );
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extract_no_marker() {
        let config = "set timeout=5\nmenuentry 'Plain entry' {\n}\n";
        assert!(extract(config).is_empty());
    }

    #[test]
    fn test_extract_skips_malformed_line() {
        // Second line has the marker but no block opener: skipped, scan continues
        let config = "menuentry 'A' $menuentry_id_option 'id-a' {\n\
                      menuentry 'B' $menuentry_id_option 'id-b'\n\
                      menuentry 'C' $menuentry_id_option 'id-c' {\n";
        let entries = extract(config);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "\"id-a\"");
        assert_eq!(entries[1].id, "\"id-c\"");
    }

    #[test]
    fn test_extract_preserves_duplicates() {
        let line = "menuentry 'A' $menuentry_id_option 'same-id' {\n";
        let entries = extract(&format!("{}{}", line, line));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title(ENTRY_LINE),
            Some("Ubuntu, with Linux 5.11.0".to_string())
        );
        assert_eq!(extract_title("no quotes here"), None);
    }

    #[test]
    fn test_submenu_lines_are_extracted() {
        let config = "submenu 'Advanced options for Ubuntu' $menuentry_id_option 'gnulinux-advanced-b70cb823' {\n";
        let entries = extract(config);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "\"gnulinux-advanced-b70cb823\"");
        assert_eq!(
            entries[0].title,
            Some("Advanced options for Ubuntu".to_string())
        );
    }
}
