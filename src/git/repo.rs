//! Repository adapter: the git queries and mutations gch needs.
//!
//! Queries with a safe fallback return `Option`/empty values and log the
//! failure. Mutations without a safe continuation return `GitError`.

use std::io::Write;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::GitError;

use super::runner::{GitOutput, GitRunner, SystemGit};
use super::status::parse_porcelain;

/// A local branch as listed by `git branch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    pub name: String,
    pub is_current: bool,
}

/// How a push reached the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// The first attempt failed and `--set-upstream origin <branch>` succeeded.
    UpstreamSet,
}

/// Git operations over a [`GitRunner`].
pub struct GitRepo {
    runner: Box<dyn GitRunner>,
}

impl GitRepo {
    pub fn new(runner: Box<dyn GitRunner>) -> Self {
        Self { runner }
    }

    /// Repository in the process working directory.
    pub fn system() -> Self {
        Self::new(Box::new(SystemGit::new()))
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        self.runner.run(args)
    }

    /// Run and require a zero exit.
    fn run_checked(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        self.run(args)?.into_result(args)
    }

    /// Stdout of a query, or `None` (logged) on any failure.
    fn query(&self, args: &[&str]) -> Option<String> {
        match self.run_checked(args) {
            Ok(output) => Some(output.stdout),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Staged (`--cached`) or unstaged diff.
    ///
    /// `None` means git failed; `Some("")` means no changes.
    pub fn diff(&self, staged: bool) -> Option<String> {
        if staged {
            self.query(&["diff", "--cached"])
        } else {
            self.query(&["diff"])
        }
    }

    /// Modified, deleted, and untracked (not ignored) files in status order.
    ///
    /// Changes already fully staged are not listed. Failure is logged and yields an empty list.
    pub fn modified_files(&self) -> Vec<String> {
        self.query(&["status", "--porcelain=v1", "--untracked-files=all"])
            .map(|out| parse_porcelain(&out))
            .unwrap_or_default()
    }

    /// Unstaged diff restricted to `paths`.
    ///
    /// An empty path set gives `Some("")` without running git.
    pub fn diff_for_files(&self, paths: &[String]) -> Option<String> {
        if paths.is_empty() {
            return Some(String::new());
        }
        let mut args = vec!["diff", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.query(&args)
    }

    pub fn current_branch(&self) -> Result<String, GitError> {
        let output = self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .map_err(|e| GitError::CannotDetermineBranch(e.to_string()))?;
        let name = output.stdout.trim();
        if !output.success || name.is_empty() {
            return Err(GitError::CannotDetermineBranch(
                output.stderr.trim().to_string(),
            ));
        }
        Ok(name.to_string())
    }

    /// Create `branch` from HEAD and switch to it.
    pub fn create_branch(&self, branch: &str) -> Result<(), GitError> {
        let output = self.run(&["checkout", "-b", branch])?;
        if !output.success {
            return Err(GitError::BranchCreationFailed {
                branch: branch.to_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    pub fn stage_files(&self, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run_checked(&args).map(|_| ())
    }

    /// Commit the index with `message`.
    ///
    /// The message goes through a temporary file, removed on every path.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        let mut file = NamedTempFile::new().map_err(GitError::MessageFile)?;
        file.write_all(message.as_bytes())
            .and_then(|_| file.flush())
            .map_err(GitError::MessageFile)?;

        let path = file.path().to_string_lossy().into_owned();
        self.run_checked(&["commit", "-F", &path]).map(|_| ())
    }

    /// Push `branch`, setting the upstream on `origin` if the plain push fails.
    pub fn push(&self, branch: &str) -> Result<PushOutcome, GitError> {
        let first = self.run(&["push"])?;
        if first.success {
            return Ok(PushOutcome::Pushed);
        }
        debug!("Plain push failed, retrying with upstream: {}", first.stderr.trim());

        let second = self.run(&["push", "--set-upstream", "origin", branch])?;
        if second.success {
            Ok(PushOutcome::UpstreamSet)
        } else {
            Err(GitError::PushFailed(second.stderr.trim().to_string()))
        }
    }

    pub fn rebase(&self, branch: &str) -> Result<(), GitError> {
        self.run_checked(&["rebase", branch]).map(|_| ())
    }

    /// Soft-reset one commit, keeping its changes staged.
    pub fn undo_last_commit(&self) -> Result<(), GitError> {
        self.run_checked(&["reset", "--soft", "HEAD~1"]).map(|_| ())
    }

    pub fn checkout_branch(&self, branch: &str) -> Result<(), GitError> {
        self.run_checked(&["checkout", branch]).map(|_| ())
    }

    /// Whether HEAD equals its upstream. No upstream counts as not pushed.
    pub fn is_last_commit_pushed(&self) -> bool {
        let local = self.rev_parse("HEAD");
        let remote = self.rev_parse("@{u}");
        match (local, remote) {
            (Some(local), Some(remote)) => local == remote,
            _ => false,
        }
    }

    /// Whether the current branch has commits its upstream lacks.
    ///
    /// Without an upstream any commit counts.
    pub fn has_commits_to_push(&self) -> bool {
        if self.rev_parse("@{u}").is_none() {
            return self.rev_parse("HEAD").is_some();
        }
        self.query(&["rev-list", "--count", "@{u}..HEAD"])
            .and_then(|count| count.trim().parse::<u64>().ok())
            .is_some_and(|count| count > 0)
    }

    fn rev_parse(&self, rev: &str) -> Option<String> {
        let output = self.run(&["rev-parse", "--verify", "--quiet", rev]).ok()?;
        let id = output.stdout.trim();
        (output.success && !id.is_empty()).then(|| id.to_string())
    }

    /// The last five commits, one per line.
    pub fn latest_logs(&self) -> Option<String> {
        self.query(&["log", "-5", "--oneline", "--decorate"])
    }

    pub fn branch_graph(&self) -> Option<String> {
        self.query(&["log", "--all", "--decorate", "--oneline", "--graph"])
    }

    pub fn local_branches(&self) -> Result<Vec<LocalBranch>, GitError> {
        let output = self.run_checked(&["branch", "--list", "--no-color"])?;
        Ok(output
            .stdout
            .lines()
            .filter_map(|line| {
                let is_current = line.starts_with('*');
                let name = line.get(2..)?.trim();
                // Detached HEAD shows as "* (HEAD detached at ...)".
                (!name.is_empty() && !name.starts_with('(')).then(|| LocalBranch {
                    name: name.to_string(),
                    is_current,
                })
            })
            .collect())
    }
}
