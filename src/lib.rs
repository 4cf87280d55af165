//! gch - an interactive git helper that writes commit messages, reviews
//! changes, and names branches with an AI provider.
//!
//! # Overview
//!
//! gch stages the files you pick, asks Gemini, OpenAI, or a local Ollama
//! model to review the staged diff and propose a Conventional Commits
//! subject, validates it, commits, and pushes. Every step that changes the
//! repository asks first unless auto-confirm mode is on.

pub mod ai;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod session;
pub mod ui;
pub mod workflow;

// Re-export commonly used types
pub use ai::{AiGateway, PromptStore, TextBackend, Translator};
pub use commit::{CommitMessage, CommitType, validate_message};
pub use config::{Config, PreCommitPolicy, ProviderKind};
pub use error::{
    CapabilityError, ConfigError, GitError, PromptError, ProviderError, TemplateError,
    ValidationError, WorkflowError,
};
pub use git::{GitRepo, GitRunner, SystemGit};
pub use session::{Locale, Session};
pub use workflow::{Command, Mode, Outcome, Workflow, exit_status};
