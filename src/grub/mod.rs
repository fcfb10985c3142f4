//! GRUB interaction layer
//!
//! This module handles everything that touches the GRUB installation:
//! - Boot entry extraction from the generated grub.cfg
//! - Defaults file rewriting and pre-mutation backup
//! - Environment detection (config location, regeneration program)
//! - Regeneration command execution

pub mod commands;
pub mod defaults;
pub mod detect;
pub mod entries;

pub use commands::{CommandResult, RegenCommand};
pub use defaults::{backup, rewrite_default, GRUB_DEFAULT_KEY};
pub use detect::{detect, GrubEnv};
pub use entries::extract;
