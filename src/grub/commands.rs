//! External command execution for configuration regeneration
//!
//! After the defaults file changes, GRUB's generated configuration is
//! rebuilt by an external program (update-grub and friends). The
//! command runs with the operator's terminal streams; its exit status
//! is reported but never treated as a failure of this tool.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Option passed to the shell to run a command string
const SHELL_OPT: &str = "-c";

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub command: String,
}

/// The regeneration command, run as `<shell> -c <program>`
#[derive(Debug, Clone)]
pub struct RegenCommand {
    pub shell: String,
    pub program: String,
}

impl RegenCommand {
    pub fn new(shell: &str, program: &str) -> Self {
        Self {
            shell: shell.to_string(),
            program: program.to_string(),
        }
    }

    /// The exact invocation, for previews and reporting
    pub fn command_line(&self) -> String {
        format!("{} {} {}", self.shell, SHELL_OPT, self.program)
    }

    /// Run the regeneration program with inherited terminal streams.
    ///
    /// Dry run returns before anything is spawned, so tests never
    /// start a real process.
    pub fn run(&self, dry_run: bool) -> Result<CommandResult> {
        let command = self.command_line();

        if dry_run {
            return Ok(CommandResult {
                success: true,
                message: format!("Dry run: would execute {}", command),
                command,
            });
        }

        let status = Command::new(&self.shell)
            .arg(SHELL_OPT)
            .arg(&self.program)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("failed to execute {}", command))?;

        let message = if status.success() {
            format!("{} finished successfully", self.program)
        } else {
            format!(
                "{} exited with status {:?}; the new default is written either way",
                self.program,
                status.code()
            )
        };

        Ok(CommandResult {
            success: status.success(),
            message,
            command,
        })
    }
}

/// Check if a command exists in PATH
pub(crate) fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let cmd = RegenCommand::new("sh", "update-grub");
        assert_eq!(cmd.command_line(), "sh -c update-grub");
    }

    #[test]
    fn test_dry_run_does_not_spawn() {
        let cmd = RegenCommand::new("sh", "update-grub");
        let result = cmd.run(true).unwrap();
        assert!(result.success);
        assert!(result.message.contains("Dry run"));
        assert_eq!(result.command, "sh -c update-grub");
    }
}
