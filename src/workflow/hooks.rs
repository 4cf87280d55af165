//! Configured pre-commit commands.

use std::io;
use std::process::{Command, Output};

use tracing::debug;

use crate::config::PreCommitPolicy;
use crate::error::WorkflowError;
use crate::ui;

use super::{Mode, Workflow};

/// Run `command` through the platform shell, capturing its output.
pub fn run_shell_command(command: &str) -> io::Result<Output> {
    if cfg!(windows) {
        Command::new("cmd").args(["/C", command]).output()
    } else {
        Command::new("sh").args(["-c", command]).output()
    }
}

impl Workflow<'_> {
    /// Run the selected pre-commit commands in order.
    ///
    /// Under the advisory policy a failure is reported and the next command
    /// runs; under the gating policy the first failure aborts.
    pub(super) fn run_pre_commit_hooks(&self) -> Result<(), WorkflowError> {
        let commands = &self.config.pre_commit_commands;
        if commands.is_empty() {
            return Ok(());
        }

        let selected: Vec<&String> = match self.mode {
            Mode::AutoConfirm => commands.iter().collect(),
            Mode::Interactive => {
                let checked = vec![true; commands.len()];
                self.prompter
                    .multi_select("Select the pre-commit commands to run", commands, &checked)?
                    .into_iter()
                    .filter_map(|i| commands.get(i))
                    .collect()
            }
        };
        if selected.is_empty() {
            return Ok(());
        }

        ui::info("Running pre-commit commands...");
        for command in selected {
            ui::warn(&format!("  - {command}"));
            let passed = match run_shell_command(command) {
                Ok(output) => {
                    debug!(
                        status = ?output.status.code(),
                        stderr = %String::from_utf8_lossy(&output.stderr),
                        "pre-commit command finished"
                    );
                    output.status.success()
                }
                Err(e) => {
                    debug!("Failed to spawn '{}': {}", command, e);
                    false
                }
            };

            if passed {
                ui::success(&format!("{command} passed"));
                continue;
            }

            ui::error(&format!("{command} failed"));
            if self.config.pre_commit_policy == PreCommitPolicy::Gating {
                return Err(WorkflowError::HookFailed(command.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_shell_command_status() {
        assert!(run_shell_command("true").unwrap().status.success());
        assert!(!run_shell_command("exit 3").unwrap().status.success());
    }

    #[test]
    fn test_run_shell_command_captures_output() {
        let output = run_shell_command("echo hello").unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }
}
