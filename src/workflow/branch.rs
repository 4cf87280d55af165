//! Moving work off protected branches.

use crate::error::WorkflowError;
use crate::ui;

use super::{Mode, Outcome, Workflow};

/// Branches that never receive commits directly.
pub const PROTECTED_BRANCHES: [&str; 3] = ["main", "master", "dev"];

/// Allowed characters: letters, digits, `_`, `/`, `-`.
pub fn validate_branch_name(name: &str) -> Result<(), String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '-'));
    if valid {
        Ok(())
    } else {
        Err("Use only letters, numbers, '_', '/' and '-'".to_string())
    }
}

impl Workflow<'_> {
    /// Create and switch to a new branch when on a protected one.
    ///
    /// Auto-confirm takes the AI suggestion and fails without one;
    /// interactive mode asks for a name, pre-filled with the suggestion.
    pub(super) async fn check_branch(&self) -> Result<Outcome, WorkflowError> {
        let current = self.repo.current_branch()?;
        if !PROTECTED_BRANCHES.contains(&current.as_str()) {
            ui::info(&format!("Current branch: {current}"));
            return Ok(Outcome::NothingToDo);
        }

        ui::warn(&format!(
            "You are on '{current}'. Commits should go to a separate branch."
        ));
        let suggestion = self
            .gateway
            .ask_for_branch_name(self.config, self.repo)
            .await?
            .filter(|name| validate_branch_name(name).is_ok());

        let name = match self.mode {
            Mode::AutoConfirm => suggestion.ok_or(WorkflowError::BranchNameUnavailable)?,
            Mode::Interactive => self.prompter.input(
                "New branch name",
                suggestion.as_deref(),
                &validate_branch_name,
            )?,
        };

        self.repo.create_branch(&name)?;
        ui::success(&format!("Created and switched to branch '{name}'"));
        Ok(Outcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_branch_name() {
        assert!(validate_branch_name("feat/login-page_2").is_ok());
        assert!(validate_branch_name("").is_err());
        assert!(validate_branch_name("feat login").is_err());
        assert!(validate_branch_name("fix:bug").is_err());
        assert!(validate_branch_name("café").is_err());
    }
}
