//! Execution of the system `git` binary.
//!
//! All repository access shells out to `git`, inheriting the user's git
//! config, SSH agent, and credential store.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use crate::error::GitError;

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Convert a non-zero exit into [`GitError::CommandFailed`].
    pub fn into_result(self, args: &[&str]) -> Result<GitOutput, GitError> {
        if self.success {
            Ok(self)
        } else {
            Err(GitError::CommandFailed {
                command: args.join(" "),
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs git with the given arguments.
///
/// `Err` means git could not be spawned; a non-zero exit is reported
/// through [`GitOutput::success`].
pub trait GitRunner: Send + Sync {
    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError>;
}

impl<T: GitRunner + ?Sized> GitRunner for Arc<T> {
    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        (**self).run(args)
    }
}

/// Runs the `git` found on PATH.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    workdir: Option<PathBuf>,
}

impl SystemGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `workdir` instead of the process working directory.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        debug!("git {}", args.join(" "));

        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| GitError::SpawnFailed {
            command: args.join(" "),
            source,
        })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Check that a `git` executable is on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_git_version_succeeds() {
        let output = SystemGit::new().run(&["--version"]).unwrap();
        assert!(output.success);
        assert!(output.stdout.starts_with("git version"));
    }

    #[test]
    fn test_system_git_invalid_command_reports_failure() {
        let output = SystemGit::new().run(&["not-a-real-command"]).unwrap();
        assert!(!output.success);
        assert!(output.into_result(&["not-a-real-command"]).is_err());
    }

    #[test]
    fn test_check_git_installed() {
        assert!(check_git_installed().is_ok());
    }
}
