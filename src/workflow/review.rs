//! The AI review step and its score gate.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::WorkflowError;
use crate::ui;

use super::Workflow;

static SCORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Score:\s*(\d+)/10").expect("score pattern is valid"));

/// Score from the last `Score: X/10` marker in a review.
///
/// `None` when there is no marker or the value is above 10.
pub fn parse_review_score(review: &str) -> Option<u8> {
    SCORE_PATTERN
        .captures_iter(review)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .filter(|score| *score <= 10)
}

impl Workflow<'_> {
    /// Ask for a review, translate it, and print it.
    pub(super) async fn fetch_review(&self) -> Result<String, WorkflowError> {
        ui::info("Analyzing your changes...");
        let review = self
            .gateway
            .ask_for_review(self.config, self.repo)
            .await?
            .ok_or(WorkflowError::ReviewUnavailable)?;
        let review = self.translator().translate_if_needed(review).await?;

        ui::info("Code review:");
        ui::block(&review);
        Ok(review)
    }

    /// Review step of the full workflow.
    ///
    /// Skipped when disabled in config or declined. A missing score aborts;
    /// a score under the minimum needs confirmation to continue.
    pub(super) async fn review_gate(&self) -> Result<(), WorkflowError> {
        if !self.config.ai_review_enabled {
            return Ok(());
        }
        let prompt = format!(
            "Do you want a review of your changes from {}?",
            self.session.provider
        );
        if !self.gate(&prompt, true)? {
            return Ok(());
        }

        let review = self.fetch_review().await?;
        let score = parse_review_score(&review).ok_or(WorkflowError::ReviewScoreMissing)?;
        let minimum = self.config.min_review_score;

        if score >= minimum {
            ui::success(&format!("Review score {score}/10. Moving on."));
            return Ok(());
        }

        ui::warn(&format!("Review score {score}/10 is below {minimum}/10."));
        if self.gate("Do you want to proceed anyway?", false)? {
            Ok(())
        } else {
            Err(WorkflowError::ReviewRejected { score, minimum })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_review_score("Fine.\nScore: 8/10"), Some(8));
        assert_eq!(parse_review_score("score:7/10"), Some(7));
        assert_eq!(parse_review_score("SCORE:   10/10"), Some(10));
    }

    #[test]
    fn test_parse_score_uses_trailing_marker() {
        let review = "Last time this was Score: 3/10.\n...\nScore: 9/10";
        assert_eq!(parse_review_score(review), Some(9));
    }

    #[test]
    fn test_parse_score_unparseable() {
        assert_eq!(parse_review_score("Looks good to me"), None);
        assert_eq!(parse_review_score("Score: 8 / 10"), None);
        assert_eq!(parse_review_score("Score: 11/10"), None);
        assert_eq!(parse_review_score("Score: 999999999999/10"), None);
    }
}
