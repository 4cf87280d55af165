//! Commit message composition and cleanup of generated subjects.

/// A commit subject plus optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: Option<String>,
}

impl CommitMessage {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: None,
        }
    }

    /// Attach a body; blank bodies are dropped.
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        self
    }

    /// Format for git: subject, blank line, body.
    ///
    /// ```text
    /// feat(auth): add login endpoint
    ///
    /// Body text explaining why.
    /// ```
    pub fn format(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.subject.trim(), body),
            None => self.subject.trim().to_string(),
        }
    }
}

/// Reduce raw model output to a single-line subject.
///
/// Removes code-fence markers and line breaks.
pub fn clean_generated_subject(raw: &str) -> String {
    raw.replace("```", "")
        .replace(['\r', '\n'], "")
        .trim()
        .to_string()
}

/// Description part of a subject (text after the first `:`), if any.
pub fn subject_description(subject: &str) -> Option<&str> {
    subject
        .split_once(':')
        .map(|(_, desc)| desc.trim())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_subject_only() {
        let msg = CommitMessage::new("feat(auth): add login endpoint");
        assert_eq!(msg.format(), "feat(auth): add login endpoint");
    }

    #[test]
    fn test_format_with_body() {
        let msg = CommitMessage::new("fix(parser): resolve memory leak").with_body(Some(
            "The parser was holding references to\nalready-freed buffers.\n".to_string(),
        ));
        assert_eq!(
            msg.format(),
            "fix(parser): resolve memory leak\n\nThe parser was holding references to\nalready-freed buffers."
        );
    }

    #[test]
    fn test_blank_body_dropped() {
        let msg = CommitMessage::new("chore: bump deps").with_body(Some("  \n".to_string()));
        assert!(msg.body.is_none());
        assert_eq!(msg.format(), "chore: bump deps");
    }

    #[test]
    fn test_clean_strips_fences_and_newlines() {
        let raw = "```\nfeat: add login\n```\n";
        assert_eq!(clean_generated_subject(raw), "feat: add login");
    }

    #[test]
    fn test_clean_joins_multiline_output() {
        assert_eq!(clean_generated_subject("fix: a\r\nb"), "fix: ab");
    }

    #[test]
    fn test_subject_description() {
        assert_eq!(subject_description("feat(ui): add button"), Some("add button"));
        assert_eq!(subject_description("no colon"), None);
        assert_eq!(subject_description("feat:   "), None);
    }
}
