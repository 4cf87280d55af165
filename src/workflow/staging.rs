//! Choosing and staging the files for this run.

use crate::error::WorkflowError;
use crate::ui;

use super::{Mode, Workflow};

impl Workflow<'_> {
    /// Stage the operator's selection of modified files.
    ///
    /// `None` stops the command cleanly: nothing modified, nothing
    /// selected, or the selection's diff is too large or unreadable.
    pub(super) fn stage_changes(&self) -> Result<Option<Vec<String>>, WorkflowError> {
        let modified = self.repo.modified_files();
        if modified.is_empty() {
            ui::warn("No modified files.");
            return Ok(None);
        }

        let selected = self.select_files(modified)?;
        if selected.is_empty() {
            ui::warn("No files selected.");
            return Ok(None);
        }

        if !self.diff_within_limit(&selected) {
            return Ok(None);
        }

        self.repo.stage_files(&selected)?;
        ui::success("Files added to the staging area.");
        Ok(Some(selected))
    }

    fn select_files(&self, modified: Vec<String>) -> Result<Vec<String>, WorkflowError> {
        if self.mode == Mode::AutoConfirm || modified.len() == 1 {
            return Ok(modified);
        }

        let checked = vec![true; modified.len()];
        let chosen = self
            .prompter
            .multi_select("Select the files to stage", &modified, &checked)?;
        Ok(modified
            .into_iter()
            .enumerate()
            .filter(|(i, _)| chosen.contains(i))
            .map(|(_, file)| file)
            .collect())
    }

    /// Check the selection against `maxDiffLines` (0 = unlimited).
    fn diff_within_limit(&self, selected: &[String]) -> bool {
        let max = self.config.max_diff_lines;
        if max == 0 {
            return true;
        }

        let Some(diff) = self.repo.diff_for_files(selected) else {
            ui::error("Could not compute the diff for the selected files.");
            return false;
        };

        let lines = diff.lines().count();
        if lines > max {
            ui::error(&format!(
                "The diff is too large ({lines} lines, maximum {max}). Select fewer files."
            ));
            return false;
        }
        true
    }
}
