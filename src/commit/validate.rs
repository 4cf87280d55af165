//! Commit subject validation.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::config::Config;
use crate::error::ValidationError;

use super::types::CommitType;

/// `<type>[(scope)][!]: <description>` over the enumerated types.
static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let types = CommitType::tags()
        .iter()
        .map(|t| regex_lite::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"^(?:{types})(?:\([^()\r\n]+\))?!?: \S");
    Regex::new(&pattern).expect("commit subject pattern is valid")
});

/// Check a commit message against the configured rules.
///
/// Length is checked first on the trimmed message, then the shape.
/// A message starting with `BREAKING CHANGE:` is always accepted in shape.
pub fn validate_message(message: &str, config: &Config) -> Result<(), ValidationError> {
    let subject = message.trim();
    let len = subject.chars().count();

    if len > config.max_subject_length {
        debug!(len, max = config.max_subject_length, "subject too long");
        return Err(ValidationError::SubjectTooLong {
            max: config.max_subject_length,
            len,
        });
    }

    if subject.starts_with("BREAKING CHANGE:") || SUBJECT_PATTERN.is_match(subject) {
        Ok(())
    } else {
        debug!(subject, "subject does not match conventional format");
        Err(ValidationError::InvalidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: usize) -> Config {
        Config {
            max_subject_length: max,
            ..Config::default()
        }
    }

    #[test]
    fn test_accepts_plain_type() {
        assert!(validate_message("feat: add login", &config(50)).is_ok());
    }

    #[test]
    fn test_accepts_scope_and_bang() {
        assert!(validate_message("fix(parser): handle eof", &config(50)).is_ok());
        assert!(validate_message("refactor!: drop legacy api", &config(50)).is_ok());
        assert!(validate_message("perf(db)!: batch writes", &config(50)).is_ok());
    }

    #[test]
    fn test_accepts_breaking_forms() {
        assert!(validate_message("breaking: new storage format", &config(50)).is_ok());
        assert!(validate_message("BREAKING CHANGE: new storage format", &config(50)).is_ok());
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert_eq!(
            validate_message("feature: add login", &config(50)),
            Err(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn test_rejects_uppercase_type() {
        assert_eq!(
            validate_message("Feat: add login", &config(50)),
            Err(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn test_rejects_missing_space_or_description() {
        assert!(validate_message("feat:add login", &config(50)).is_err());
        assert!(validate_message("feat: ", &config(50)).is_err());
        assert!(validate_message("feat", &config(50)).is_err());
    }

    #[test]
    fn test_rejects_empty_scope() {
        assert!(validate_message("feat(): add login", &config(50)).is_err());
    }

    #[test]
    fn test_length_checked_on_trimmed_subject() {
        let msg = "  feat: abcdef  ";
        assert!(validate_message(msg, &config(12)).is_ok());
        assert_eq!(
            validate_message(msg, &config(11)),
            Err(ValidationError::SubjectTooLong { max: 11, len: 12 })
        );
    }

    #[test]
    fn test_length_rule_applies_before_format() {
        let msg = "not a conventional subject at all";
        assert!(matches!(
            validate_message(msg, &config(5)),
            Err(ValidationError::SubjectTooLong { .. })
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(validate_message("fix: café", &config(9)).is_ok());
    }
}
