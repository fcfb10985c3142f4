//! Interactive kernel selection
//!
//! Presents the extracted boot entries and maps operator input to an
//! index into the list. The input loop is bounded and cancellable:
//! - invalid input re-prompts, up to a configured attempt budget
//! - q, quit, Esc, end-of-input, or an optional timeout cancel the
//!   run without touching anything

use crate::config::PromptOptions;
use crate::types::BootEntry;
use crate::ui::theme::Theme;
use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

/// How one input line maps onto the entry list
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedInput {
    Index(usize),
    Cancel,
    Invalid(String),
}

/// Print the numbered entry listing
pub fn print_listing(entries: &[BootEntry], current_default: Option<&str>, theme: &Theme) {
    for (i, entry) in entries.iter().enumerate() {
        let is_current = current_default == Some(entry.bare_id());
        let marker = if is_current {
            theme.current("*")
        } else {
            " ".to_string()
        };
        let index = theme.index(&format!("{:>3}.", i));

        match &entry.title {
            Some(title) => println!(
                "{} {} {}  {}",
                marker,
                index,
                theme.title(title),
                theme.id(&entry.id)
            ),
            None => println!("{} {} {}", marker, index, theme.id(&entry.id)),
        }
    }
}

/// Ask the operator to pick an entry.
///
/// Returns the selected index, or None when the operator cancelled.
/// Exhausting the attempt budget on invalid input is an error.
pub fn select_entry(
    entries: &[BootEntry],
    current_default: Option<&str>,
    theme: &Theme,
    opts: &PromptOptions,
) -> Result<Option<usize>> {
    println!(
        "{}",
        theme.prompt("Select the kernel to make the GRUB default (q to quit):")
    );
    print_listing(entries, current_default, theme);

    let mut attempts = 0;
    while attempts < opts.max_attempts {
        print!("{}", theme.prompt("Index: "));
        io::stdout().flush().context("failed to flush stdout")?;

        let line = match read_input_line(opts.timeout_secs)? {
            Some(line) => line,
            None => return Ok(None),
        };

        match parse_selection(&line, entries.len()) {
            ParsedInput::Index(index) => return Ok(Some(index)),
            ParsedInput::Cancel => return Ok(None),
            ParsedInput::Invalid(reason) => {
                attempts += 1;
                eprintln!("{}", theme.warning(&format!("{}, try again", reason)));
            }
        }
    }

    bail!("no valid selection after {} attempts", opts.max_attempts)
}

/// Map a raw input line to a selection
fn parse_selection(input: &str, entry_count: usize) -> ParsedInput {
    let trimmed = input.trim();

    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return ParsedInput::Cancel;
    }

    match trimmed.parse::<usize>() {
        Ok(index) if index < entry_count => ParsedInput::Index(index),
        Ok(index) => ParsedInput::Invalid(format!(
            "index {} is out of range, pick 0 through {}",
            index,
            entry_count.saturating_sub(1)
        )),
        Err(_) => ParsedInput::Invalid(format!("{:?} is not an index", trimmed)),
    }
}

/// Read one line of operator input.
///
/// On a terminal this runs a raw-mode loop so Esc, Ctrl-C, and the
/// configured timeout can cancel mid-line; scripted input falls back
/// to a plain line read, with end-of-input as cancellation.
fn read_input_line(timeout_secs: u64) -> Result<Option<String>> {
    if !io::stdin().is_tty() {
        return read_plain_line();
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = read_raw_line(timeout_secs);
    disable_raw_mode().context("failed to disable raw mode")?;
    println!();

    result
}

fn read_plain_line() -> Result<Option<String>> {
    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;

    if bytes == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

fn read_raw_line(timeout_secs: u64) -> Result<Option<String>> {
    let deadline =
        (timeout_secs > 0).then(|| Instant::now() + Duration::from_secs(timeout_secs));
    let mut line = String::new();

    loop {
        // Poll in short slices so an expired deadline is noticed even
        // while no keys arrive
        let wait = match deadline {
            Some(deadline) => match deadline.checked_duration_since(Instant::now()) {
                Some(remaining) => remaining.min(Duration::from_millis(250)),
                None => return Ok(None),
            },
            None => Duration::from_millis(250),
        };

        if !event::poll(wait).context("failed to poll for input")? {
            continue;
        }

        if let Event::Key(key) = event::read().context("failed to read input")? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Enter => return Ok(Some(line)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        print!("\x08 \x08");
                        io::stdout().flush().context("failed to flush stdout")?;
                    }
                }
                KeyCode::Char(c) => {
                    line.push(c);
                    print!("{}", c);
                    io::stdout().flush().context("failed to flush stdout")?;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_index() {
        assert_eq!(parse_selection("2", 3), ParsedInput::Index(2));
        assert_eq!(parse_selection("  0 \n", 3), ParsedInput::Index(0));
    }

    #[test]
    fn test_parse_out_of_range() {
        match parse_selection("7", 3) {
            ParsedInput::Invalid(reason) => assert!(reason.contains("out of range")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        // Boundary: the count itself is already out of range
        assert!(matches!(parse_selection("3", 3), ParsedInput::Invalid(_)));
    }

    #[test]
    fn test_parse_non_integer() {
        assert!(matches!(parse_selection("abc", 3), ParsedInput::Invalid(_)));
        assert!(matches!(parse_selection("", 3), ParsedInput::Invalid(_)));
        assert!(matches!(parse_selection("-1", 3), ParsedInput::Invalid(_)));
        assert!(matches!(parse_selection("1.5", 3), ParsedInput::Invalid(_)));
    }

    #[test]
    fn test_parse_cancel_words() {
        assert_eq!(parse_selection("q", 3), ParsedInput::Cancel);
        assert_eq!(parse_selection("Q", 3), ParsedInput::Cancel);
        assert_eq!(parse_selection("quit\n", 3), ParsedInput::Cancel);
    }
}
