//! Error types for gch modules using thiserror.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Configuration file not found.\n\n\
             Create gch.config.json in your project or ~/.gch.config.json, e.g. with:\n  \
             gch init            (project)\n  \
             gch init --global   (user)"
    )]
    NotFound,

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("{}", no_provider_message(*api_key_missing, *model_missing))]
    NoProvider {
        api_key_missing: bool,
        model_missing: bool,
    },

    #[error("Failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not determine the home directory for the global config")]
    HomeDirUnavailable,
}

fn no_provider_message(api_key_missing: bool, model_missing: bool) -> String {
    let mut lines = Vec::new();
    if api_key_missing {
        lines.push(
            "No AI API key configured. Set geminiApiKey or openaiApiKey (or use ollamaModel for local inference).",
        );
    }
    if model_missing {
        lines.push("No AI model configured. Set geminiModel, openaiModel or ollamaModel.");
    }
    if lines.is_empty() {
        lines.push(
            "No AI provider is fully configured. Each provider needs both an API key and a model.",
        );
    }
    lines.join("\n")
}

/// Errors from git command execution.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("Failed to spawn `git {command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Cannot determine the current branch: {0}")]
    CannotDetermineBranch(String),

    #[error("Failed to create branch '{branch}': {stderr}")]
    BranchCreationFailed { branch: String, stderr: String },

    #[error("Push failed: {0}")]
    PushFailed(String),

    #[error("Failed to write commit message file: {0}")]
    MessageFile(#[source] io::Error),
}

/// Errors from an AI backend call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed with HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

/// Errors from the prompt template store.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Prompt template '{name}' is missing for provider '{provider}' and its fallback")]
    Missing { provider: String, name: String },

    #[error("Failed to read prompt template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from an AI capability (review, commit message, body, branch name).
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("No staged changes found. Stage your files before asking the AI")]
    NoStagedChanges,

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Errors from interactive terminal prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt interrupted by user")]
    Interrupted,

    #[error("Prompt could not be rendered: {0}")]
    Terminal(String),
}

/// Reasons a commit message fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Subject is too long ({len} characters, maximum {max})")]
    SubjectTooLong { max: usize, len: usize },

    #[error(
        "Subject does not follow Conventional Commits: expected `type(scope)?!?: description`"
    )]
    InvalidFormat,
}

/// Errors that end a workflow run with exit code 1 (or 0 for interrupts).
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("AI review is unavailable. Check your provider configuration and network")]
    ReviewUnavailable,

    #[error("The AI review did not contain a `Score: X/10` marker")]
    ReviewScoreMissing,

    #[error("Review score {score}/10 is below the minimum of {minimum}/10")]
    ReviewRejected { score: u8, minimum: u8 },

    #[error("Generated commit message '{message}' is invalid: {reason}")]
    InvalidCommitMessage {
        message: String,
        #[source]
        reason: ValidationError,
    },

    #[error("Commit message was not valid and editing was declined")]
    EditDeclined,

    #[error("Could not get a valid branch name suggestion from the AI")]
    BranchNameUnavailable,

    #[error("Pre-commit command failed: {0}")]
    HookFailed(String),
}

impl WorkflowError {
    /// Whether this error is a user-initiated interrupt of a prompt.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, WorkflowError::Prompt(PromptError::Interrupted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_provider_message_lists_both_problems() {
        let err = ConfigError::NoProvider {
            api_key_missing: true,
            model_missing: true,
        };
        let msg = err.to_string();
        assert!(msg.contains("No AI API key configured"));
        assert!(msg.contains("No AI model configured"));
    }

    #[test]
    fn test_no_provider_message_incomplete_pairs() {
        let err = ConfigError::NoProvider {
            api_key_missing: false,
            model_missing: false,
        };
        assert!(err.to_string().contains("both an API key and a model"));
    }

    #[test]
    fn test_interrupt_is_distinguished() {
        assert!(WorkflowError::Prompt(PromptError::Interrupted).is_interrupt());
        assert!(!WorkflowError::Prompt(PromptError::Terminal("tty".into())).is_interrupt());
        assert!(!WorkflowError::EditDeclined.is_interrupt());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::SubjectTooLong { max: 50, len: 72 };
        assert_eq!(
            err.to_string(),
            "Subject is too long (72 characters, maximum 50)"
        );
    }
}
