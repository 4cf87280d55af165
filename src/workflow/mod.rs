//! The commit workflow state machine and the single-operation commands.
//!
//! Full run: branch check, staging, pre-commit commands, review, subject
//! generation and validation, optional body, commit, push. Each command
//! runs the subset of these steps it needs. Steps return outcomes and
//! errors; only `main` turns them into an exit code.

mod branch;
mod commit;
mod hooks;
pub mod prompter;
mod push;
mod review;
mod staging;


use tracing::debug;

use crate::ai::{AiGateway, Translator};
use crate::config::Config;
use crate::error::{PromptError, WorkflowError};
use crate::git::{GitRepo, LocalBranch};
use crate::session::Session;
use crate::ui;

pub use hooks::run_shell_command;
pub use prompter::{Prompter, TerminalPrompter};
pub use review::parse_review_score;

/// Whether gated steps ask the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    /// Every confirmation is answered "yes" without prompting.
    AutoConfirm,
}

/// How a run ended without error. All map to exit code 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// No changes, no commits, or no branches to act on.
    NothingToDo,
    /// The operator declined a confirmation, or a step stopped cleanly.
    Declined,
}

/// Exit status for a finished run.
///
/// Every outcome and a user interrupt exit 0; any other error exits 1.
pub fn exit_status(result: &Result<Outcome, WorkflowError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) if e.is_interrupt() => 0,
        Err(_) => 1,
    }
}

/// Entry points selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Full,
    Review,
    Commit,
    Branch,
    Push,
    Log,
    Adog,
    Rebase,
    Undo,
    Checkout,
}

/// Everything a run needs, borrowed for its duration.
pub struct Workflow<'a> {
    config: &'a Config,
    session: &'a Session,
    repo: &'a GitRepo,
    gateway: &'a AiGateway,
    prompter: &'a dyn Prompter,
    mode: Mode,
}

impl<'a> Workflow<'a> {
    pub fn new(
        config: &'a Config,
        session: &'a Session,
        repo: &'a GitRepo,
        gateway: &'a AiGateway,
        prompter: &'a dyn Prompter,
        mode: Mode,
    ) -> Self {
        Self {
            config,
            session,
            repo,
            gateway,
            prompter,
            mode,
        }
    }

    pub async fn run(&self, command: Command) -> Result<Outcome, WorkflowError> {
        debug!(?command, mode = ?self.mode, provider = %self.session.provider, "Starting");
        match command {
            Command::Full => self.run_full().await,
            Command::Review => self.run_review().await,
            Command::Commit => self.run_commit().await,
            Command::Branch => self.check_branch().await,
            Command::Push => self.push_changes(),
            Command::Log => Ok(self.show_log()),
            Command::Adog => Ok(self.show_graph()),
            Command::Rebase => self.rebase(),
            Command::Undo => self.undo(),
            Command::Checkout => self.checkout(),
        }
    }

    async fn run_full(&self) -> Result<Outcome, WorkflowError> {
        self.check_branch().await?;

        if self.stage_changes()?.is_none() {
            return Ok(Outcome::NothingToDo);
        }

        self.run_pre_commit_hooks()?;
        self.review_gate().await?;

        match self.compose_and_commit().await? {
            Outcome::Completed => self.push_changes(),
            other => Ok(other),
        }
    }

    async fn run_review(&self) -> Result<Outcome, WorkflowError> {
        if self.stage_changes()?.is_none() {
            return Ok(Outcome::NothingToDo);
        }
        let review = self.fetch_review().await?;
        if let Some(score) = parse_review_score(&review) {
            ui::info(&format!("Review score: {score}/10"));
        }
        Ok(Outcome::Completed)
    }

    async fn run_commit(&self) -> Result<Outcome, WorkflowError> {
        if self.stage_changes()?.is_none() {
            return Ok(Outcome::NothingToDo);
        }
        self.compose_and_commit().await
    }

    /// A confirmation that auto-confirm mode answers with "yes".
    fn gate(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        match self.mode {
            Mode::AutoConfirm => Ok(true),
            Mode::Interactive => self.prompter.confirm(prompt, default),
        }
    }

    fn translator(&self) -> Translator<'_> {
        Translator::new(self.gateway, &self.session.locale)
    }

    fn show_log(&self) -> Outcome {
        match self.repo.latest_logs().filter(|l| !l.trim().is_empty()) {
            Some(logs) => {
                ui::info("Last 5 commits:");
                ui::block(&logs);
                Outcome::Completed
            }
            None => {
                ui::warn("No commits to show.");
                Outcome::NothingToDo
            }
        }
    }

    fn show_graph(&self) -> Outcome {
        match self.repo.branch_graph().filter(|g| !g.trim().is_empty()) {
            Some(graph) => {
                ui::info("Branch graph:");
                ui::block(&graph);
                Outcome::Completed
            }
            None => {
                ui::warn("No history to show.");
                Outcome::NothingToDo
            }
        }
    }

    /// Pick one of the branches other than the current one.
    fn pick_other_branch(&self, prompt: &str) -> Result<Option<String>, WorkflowError> {
        let branches: Vec<String> = self
            .repo
            .local_branches()?
            .into_iter()
            .filter(|b| !b.is_current)
            .map(|LocalBranch { name, .. }| name)
            .collect();

        if branches.is_empty() {
            ui::warn("No other local branches.");
            return Ok(None);
        }

        let index = self.prompter.select(prompt, &branches, 0)?;
        Ok(branches.into_iter().nth(index))
    }

    fn rebase(&self) -> Result<Outcome, WorkflowError> {
        let Some(target) = self.pick_other_branch("Select the branch to rebase onto")? else {
            return Ok(Outcome::NothingToDo);
        };
        self.repo.rebase(&target)?;
        ui::success(&format!("Rebased onto {target}"));
        Ok(Outcome::Completed)
    }

    fn checkout(&self) -> Result<Outcome, WorkflowError> {
        let Some(target) = self.pick_other_branch("Select the branch to check out")? else {
            return Ok(Outcome::NothingToDo);
        };
        self.repo.checkout_branch(&target)?;
        ui::success(&format!("Switched to {target}"));
        Ok(Outcome::Completed)
    }

    fn undo(&self) -> Result<Outcome, WorkflowError> {
        if self.repo.is_last_commit_pushed() {
            ui::warn("The last commit is already pushed. Nothing to undo.");
            return Ok(Outcome::NothingToDo);
        }
        self.repo.undo_last_commit()?;
        ui::success("Last commit undone. Its changes are still staged.");
        Ok(Outcome::Completed)
    }
}
