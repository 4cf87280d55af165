//! The four AI capabilities: review, commit subject, commit body, branch name.
//!
//! Each capability reads the relevant diff, fills the provider's template,
//! trims the prompt to the character budget, and makes exactly one backend
//! call. Backend failures are logged and surface as `None`.

use tracing::{debug, warn};

use crate::commit::CommitType;
use crate::config::{Config, ProviderKind};
use crate::error::CapabilityError;
use crate::git::GitRepo;

use super::backend::TextBackend;
use super::prompt::{self, PromptStore};

pub struct AiGateway {
    backend: Box<dyn TextBackend>,
    prompts: PromptStore,
    max_prompt_chars: usize,
}

impl AiGateway {
    pub fn new(backend: Box<dyn TextBackend>, prompts: PromptStore, max_prompt_chars: usize) -> Self {
        Self {
            backend,
            prompts,
            max_prompt_chars,
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.backend.kind()
    }

    /// Review of the staged diff.
    ///
    /// No staged changes (or an unreadable diff) is an error.
    pub async fn ask_for_review(
        &self,
        config: &Config,
        repo: &GitRepo,
    ) -> Result<Option<String>, CapabilityError> {
        let diff = required_diff(repo)?;
        let min_score = config.min_review_score.to_string();
        self.complete_template(
            prompt::REVIEW,
            &[("minReviewScore", &min_score), ("diff", &diff)],
        )
        .await
    }

    /// Raw commit subject for the staged diff.
    pub async fn ask_for_commit_message(
        &self,
        config: &Config,
        repo: &GitRepo,
    ) -> Result<Option<String>, CapabilityError> {
        let diff = required_diff(repo)?;
        let max_len = config.max_subject_length.to_string();
        let types = CommitType::tags().join(", ");
        self.complete_template(
            prompt::COMMIT,
            &[
                ("maxSubjectLength", &max_len),
                ("commitTypes", &types),
                ("diff", &diff),
            ],
        )
        .await
    }

    /// Commit body for the staged diff; `None` when there is nothing staged.
    pub async fn ask_for_commit_body(
        &self,
        _config: &Config,
        repo: &GitRepo,
    ) -> Result<Option<String>, CapabilityError> {
        let Some(diff) = optional_diff(repo, true) else {
            return Ok(None);
        };
        self.complete_template(prompt::COMMIT_BODY, &[("diff", &diff)])
            .await
    }

    /// Normalized branch name for the unstaged diff.
    pub async fn ask_for_branch_name(
        &self,
        _config: &Config,
        repo: &GitRepo,
    ) -> Result<Option<String>, CapabilityError> {
        let Some(diff) = optional_diff(repo, false) else {
            return Ok(None);
        };
        let raw = self
            .complete_template(prompt::BRANCH, &[("diff", &diff)])
            .await?;
        Ok(raw.map(|name| normalize_branch_name(&name)).filter(|n| !n.is_empty()))
    }

    /// Fill `name` for this provider and send it to the backend.
    pub(crate) async fn complete_template(
        &self,
        name: &str,
        vars: &[(&str, &str)],
    ) -> Result<Option<String>, CapabilityError> {
        let template = self.prompts.get(self.provider(), name)?;
        let filled = prompt::fill(&template, vars);
        let request = truncate_chars(&filled, self.max_prompt_chars);
        debug!(
            template = name,
            prompt_len = request.len(),
            truncated = request.len() < filled.len(),
            "Calling {}",
            self.provider()
        );

        match self.backend.complete(request).await {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                warn!("{} request for '{}' failed: {}", self.provider(), name, e);
                Ok(None)
            }
        }
    }
}

fn required_diff(repo: &GitRepo) -> Result<String, CapabilityError> {
    match repo.diff(true) {
        Some(diff) if !diff.trim().is_empty() => Ok(diff),
        _ => Err(CapabilityError::NoStagedChanges),
    }
}

fn optional_diff(repo: &GitRepo, staged: bool) -> Option<String> {
    repo.diff(staged).filter(|d| !d.trim().is_empty())
}

/// At most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Trim, join whitespace runs with `-`, lowercase.
pub fn normalize_branch_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
