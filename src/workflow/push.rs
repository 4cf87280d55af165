//! Pushing the current branch.

use crate::error::WorkflowError;
use crate::git::PushOutcome;
use crate::ui;

use super::{Outcome, Workflow};

impl Workflow<'_> {
    pub(super) fn push_changes(&self) -> Result<Outcome, WorkflowError> {
        if !self.repo.has_commits_to_push() {
            ui::warn("Nothing to push.");
            return Ok(Outcome::NothingToDo);
        }

        if !self.gate("Do you want to push your commits?", true)? {
            ui::warn("Push cancelled.");
            return Ok(Outcome::Declined);
        }

        let branch = self.repo.current_branch()?;
        match self.repo.push(&branch)? {
            PushOutcome::Pushed => ui::success(&format!("Pushed {branch}.")),
            PushOutcome::UpstreamSet => {
                ui::success(&format!("Pushed {branch} and set upstream to origin/{branch}."))
            }
        }
        ui::goodbye();
        Ok(Outcome::Completed)
    }
}
