//! Terminal layer
//!
//! This module owns everything the operator sees:
//! - Styled output (theme)
//! - The selection prompt and its bounded input loop

pub mod prompt;
pub mod theme;

pub use prompt::{print_listing, select_entry};
pub use theme::Theme;
