//! `gch init`: write a starter configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::error::ConfigError;

use super::{CONFIG_FILE_NAME, DEFAULT_OLLAMA_HOST, GLOBAL_CONFIG_FILE_NAME};

/// Result of writing the template.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Starter configuration with placeholder Gemini credentials.
pub fn template() -> serde_json::Value {
    json!({
        "geminiApiKey": "YOUR_GEMINI_API_KEY",
        "geminiModel": "gemini-2.0-flash",
        "openaiApiKey": "",
        "openaiModel": "",
        "ollamaModel": "",
        "ollamaHost": DEFAULT_OLLAMA_HOST,
        "defaultCommitType": "feat",
        "maxSubjectLength": 50,
        "maxDiffLines": 0,
        "minReviewScore": 6,
        "aiReviewEnabled": true,
        "preCommitCommands": ["npm run lint", "npm test"],
        "preCommitPolicy": "advisory"
    })
}

/// Path that `init` writes to.
pub fn target_path(global: bool) -> Result<PathBuf, ConfigError> {
    if global {
        dirs::home_dir()
            .map(|home| home.join(GLOBAL_CONFIG_FILE_NAME))
            .ok_or(ConfigError::HomeDirUnavailable)
    } else {
        Ok(PathBuf::from(CONFIG_FILE_NAME))
    }
}

/// Write the template to `path` unless a file is already there.
pub fn write_template(path: &Path) -> Result<InitOutcome, ConfigError> {
    if path.exists() {
        return Ok(InitOutcome::AlreadyExists(path.to_path_buf()));
    }

    let mut content = serde_json::to_string_pretty(&template()).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    content.push('\n');

    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(InitOutcome::Created(path.to_path_buf()))
}
