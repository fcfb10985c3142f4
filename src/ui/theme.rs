//! Output styling for grubpick
//!
//! Wraps crossterm's styling behind named roles so the rest of the
//! code never hardcodes colors. Plain mode keeps output free of
//! escape sequences for pipes and dumb terminals.

use crate::config::ThemeName;
use crossterm::style::{Attribute, Color, Stylize};
use crossterm::tty::IsTty;

/// Styled-output helper; one instance per run
#[derive(Debug, Clone)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Create a theme from the configured name
    pub fn from_name(name: ThemeName) -> Self {
        let colored = match name {
            ThemeName::Color => true,
            ThemeName::Plain => false,
            ThemeName::Auto => std::io::stdout().is_tty(),
        };
        Self { colored }
    }

    /// Entry index in the listing
    pub fn index(&self, text: &str) -> String {
        self.paint(text, Color::Cyan)
    }

    /// Menu title of an entry
    pub fn title(&self, text: &str) -> String {
        self.bold(text)
    }

    /// The raw identifier, kept visually quiet next to the title
    pub fn id(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey)
    }

    /// Marker for the entry currently set as default
    pub fn current(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    /// Recoverable complaints (invalid input, skipped lines)
    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    /// The prompt line itself
    pub fn prompt(&self, text: &str) -> String {
        self.bold(text)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.colored {
            text.attribute(Attribute::Bold).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_passes_text_through() {
        let theme = Theme::from_name(ThemeName::Plain);
        assert_eq!(theme.index("0."), "0.");
        assert_eq!(theme.warning("careful"), "careful");
        assert_eq!(theme.prompt("Index: "), "Index: ");
    }

    #[test]
    fn test_color_theme_wraps_text() {
        let theme = Theme::from_name(ThemeName::Color);
        let painted = theme.index("0.");
        assert!(painted.contains("0."));
        assert_ne!(painted, "0.");
    }
}
