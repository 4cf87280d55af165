//! Operator configuration: loading, defaults, validation, and provider selection.

pub mod init;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::commit::types::CommitType;
use crate::error::ConfigError;

/// Project-local configuration file name.
pub const CONFIG_FILE_NAME: &str = "gch.config.json";

/// User-global configuration file name (in the home directory).
pub const GLOBAL_CONFIG_FILE_NAME: &str = ".gch.config.json";

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Default prompt budget in tokens.
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 900_000;

/// Approximate characters per token used to size the prompt budget.
pub const CHARS_PER_TOKEN: usize = 4;

/// Text-generation backend selected from the configured credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Ollama,
}

impl ProviderKind {
    /// Directory/identifier name used by prompt templates and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when a pre-commit command fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreCommitPolicy {
    /// Report the failure and continue with the next command.
    #[default]
    Advisory,
    /// Abort the workflow on the first failure.
    Gating,
}

/// Operator configuration, loaded once per invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub ollama_model: Option<String>,
    pub ollama_host: Option<String>,
    pub default_commit_type: String,
    pub max_subject_length: usize,
    /// 0 means unlimited.
    pub max_diff_lines: usize,
    pub min_review_score: u8,
    pub ai_review_enabled: bool,
    pub pre_commit_commands: Vec<String>,
    pub pre_commit_policy: PreCommitPolicy,
    pub locale: Option<String>,
    pub max_input_tokens: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: None,
            openai_api_key: None,
            openai_model: None,
            ollama_model: None,
            ollama_host: None,
            default_commit_type: "feat".to_string(),
            max_subject_length: 50,
            max_diff_lines: 0,
            min_review_score: 6,
            ai_review_enabled: true,
            pre_commit_commands: Vec::new(),
            pre_commit_policy: PreCommitPolicy::Advisory,
            locale: None,
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
        }
    }
}

/// Treat missing and whitespace-only values the same.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Load the first configuration found in the standard locations.
    ///
    /// Searches `./gch.config.json`, then `~/.gch.config.json`.
    /// Returns `Ok(None)` when neither exists.
    pub fn load() -> Result<Option<Config>, ConfigError> {
        Self::load_from_candidates(&candidate_paths())
    }

    /// Load the first existing file among `candidates`.
    pub fn load_from_candidates(candidates: &[PathBuf]) -> Result<Option<Config>, ConfigError> {
        for path in candidates {
            if path.is_file() {
                debug!("Loading configuration from {}", path.display());
                return Self::load_from_path(path).map(Some);
            }
        }
        Ok(None)
    }

    /// Parse and validate a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_subject_length == 0 {
            return Err(ConfigError::Invalid(
                "maxSubjectLength must be greater than 0".into(),
            ));
        }
        if self.min_review_score > 10 {
            return Err(ConfigError::Invalid(format!(
                "minReviewScore must be between 0 and 10, got {}",
                self.min_review_score
            )));
        }
        if self.default_commit_type.parse::<CommitType>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "defaultCommitType '{}' is not one of: {}",
                self.default_commit_type,
                CommitType::tags().join(", ")
            )));
        }
        Ok(())
    }

    /// Pick the backend from whichever credential set is complete.
    ///
    /// Gemini wins over OpenAI, which wins over Ollama (model name only).
    pub fn select_provider(&self) -> Option<ProviderKind> {
        if non_empty(&self.gemini_api_key).is_some() && non_empty(&self.gemini_model).is_some() {
            Some(ProviderKind::Gemini)
        } else if non_empty(&self.openai_api_key).is_some()
            && non_empty(&self.openai_model).is_some()
        {
            Some(ProviderKind::OpenAi)
        } else if non_empty(&self.ollama_model).is_some() {
            Some(ProviderKind::Ollama)
        } else {
            None
        }
    }

    /// Like [`select_provider`](Self::select_provider), but a missing provider
    /// is an error describing which half of the credentials is absent.
    pub fn require_provider(&self) -> Result<ProviderKind, ConfigError> {
        self.select_provider().ok_or_else(|| ConfigError::NoProvider {
            api_key_missing: non_empty(&self.gemini_api_key).is_none()
                && non_empty(&self.openai_api_key).is_none(),
            model_missing: non_empty(&self.gemini_model).is_none()
                && non_empty(&self.openai_model).is_none()
                && non_empty(&self.ollama_model).is_none(),
        })
    }

    pub fn gemini_credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.gemini_api_key)?, non_empty(&self.gemini_model)?))
    }

    pub fn openai_credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.openai_api_key)?, non_empty(&self.openai_model)?))
    }

    pub fn ollama_model(&self) -> Option<&str> {
        non_empty(&self.ollama_model)
    }

    pub fn ollama_host(&self) -> &str {
        non_empty(&self.ollama_host).unwrap_or(DEFAULT_OLLAMA_HOST)
    }

    /// Prompt budget in characters.
    pub fn max_prompt_chars(&self) -> usize {
        self.max_input_tokens.saturating_mul(CHARS_PER_TOKEN)
    }
}

/// Standard configuration locations, most specific first.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(GLOBAL_CONFIG_FILE_NAME));
    }
    paths
}

/// Load the configuration and make sure a provider is usable.
///
/// Missing file and missing credentials are both errors here.
pub fn initialize() -> Result<(Config, ProviderKind), ConfigError> {
    let config = Config::load()?.ok_or(ConfigError::NotFound)?;
    let provider = config.require_provider()?;
    debug!("Selected provider: {}", provider);
    Ok((config, provider))
}
