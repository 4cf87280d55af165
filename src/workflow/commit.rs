//! Subject generation, validation with one edit attempt, body, and commit.

use tracing::debug;

use crate::commit::message::subject_description;
use crate::commit::{CommitMessage, CommitType, clean_generated_subject, validate_message};
use crate::error::WorkflowError;
use crate::ui;

use super::{Mode, Outcome, Workflow};

impl Workflow<'_> {
    /// Generate, validate (editing once if needed), preview, and commit.
    ///
    /// No generated message stops the step with [`Outcome::Declined`].
    pub(super) async fn compose_and_commit(&self) -> Result<Outcome, WorkflowError> {
        ui::info("Generating the commit message...");
        let Some(raw) = self
            .gateway
            .ask_for_commit_message(self.config, self.repo)
            .await?
        else {
            ui::warn(&format!(
                "Commit message unavailable - {}",
                self.session.provider
            ));
            return Ok(Outcome::Declined);
        };
        let raw = self.translator().translate_if_needed(raw).await?;
        let subject = clean_generated_subject(&raw);
        debug!(subject = %subject, "Generated subject");

        let (subject, generated) = match validate_message(&subject, self.config) {
            Ok(()) => (subject, true),
            Err(reason) => {
                ui::error(&reason.to_string());
                ui::error(&format!("The generated message '{subject}' is not valid."));
                if self.mode == Mode::AutoConfirm {
                    return Err(WorkflowError::InvalidCommitMessage {
                        message: subject,
                        reason,
                    });
                }
                if !self.prompter.confirm("Do you want to edit the commit message?", true)? {
                    return Err(WorkflowError::EditDeclined);
                }
                (self.edit_subject(&subject)?, false)
            }
        };

        let body = if self.gate("Do you want to generate a commit body?", true)? {
            ui::info("Generating the commit body...");
            match self
                .gateway
                .ask_for_commit_body(self.config, self.repo)
                .await?
            {
                Some(body) => Some(self.translator().translate_if_needed(body).await?),
                None => {
                    ui::warn("Commit body unavailable, continuing without it.");
                    None
                }
            }
        } else {
            None
        };

        let message = CommitMessage::new(subject).with_body(body).format();
        ui::commit_preview(&message, generated);

        if !self.gate("Do you want to commit with this message?", true)? {
            ui::warn("Commit cancelled.");
            return Ok(Outcome::Declined);
        }

        self.repo.commit(&message)?;
        ui::success("Commit created.");
        Ok(Outcome::Completed)
    }

    /// Ask for a type and description and compose `"<type>: <description>"`.
    fn edit_subject(&self, rejected: &str) -> Result<String, WorkflowError> {
        ui::info("Edit the commit message");

        let items: Vec<String> = CommitType::ALL
            .iter()
            .map(|t| format!("{:<16} {}", t.as_str(), t.description()))
            .collect();
        let preferred = self.config.default_commit_type.parse::<CommitType>().ok();
        let default = CommitType::ALL
            .iter()
            .position(|t| Some(*t) == preferred)
            .unwrap_or(0);
        let index = self
            .prompter
            .select("Select the commit type", &items, default)?;
        let commit_type = CommitType::ALL.get(index).copied().unwrap_or(CommitType::Feat);

        let check = |value: &str| -> Result<(), String> {
            if value.trim().is_empty() {
                Err("The description cannot be empty".to_string())
            } else {
                Ok(())
            }
        };
        let description = self.prompter.input(
            "Commit description",
            subject_description(rejected),
            &check,
        )?;

        Ok(format!("{}: {}", commit_type.as_str(), description.trim()))
    }
}
