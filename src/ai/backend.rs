//! The text-completion backend trait and shared HTTP setup.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::config::{Config, ProviderKind};
use crate::error::{ConfigError, ProviderError, WorkflowError};

use super::gemini::GeminiClient;
use super::ollama::OllamaClient;
use super::openai::OpenAiClient;

/// Default timeout for AI HTTP requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "GCH_HTTP_TIMEOUT";

/// A backend that turns a prompt into text.
///
/// One call per request; retries are not performed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextBackend: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Request timeout from `GCH_HTTP_TIMEOUT` (seconds), default 300.
///
/// Invalid values are logged and ignored.
pub(crate) fn http_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

pub(crate) fn http_client() -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(http_timeout())
        .build()
        .map_err(|e| ProviderError::ClientBuild(e.to_string()))
}

/// Build the backend for `kind` from the configured credentials.
pub fn backend_for(
    config: &Config,
    kind: ProviderKind,
) -> Result<Box<dyn TextBackend>, WorkflowError> {
    let client = http_client()?;
    let missing = || ConfigError::NoProvider {
        api_key_missing: true,
        model_missing: true,
    };

    let backend: Box<dyn TextBackend> = match kind {
        ProviderKind::Gemini => {
            let (key, model) = config.gemini_credentials().ok_or_else(missing)?;
            Box::new(GeminiClient::new(client, key, model))
        }
        ProviderKind::OpenAi => {
            let (key, model) = config.openai_credentials().ok_or_else(missing)?;
            Box::new(OpenAiClient::new(client, key, model))
        }
        ProviderKind::Ollama => {
            let model = config.ollama_model().ok_or_else(missing)?;
            Box::new(OllamaClient::new(client, model).with_base_url(config.ollama_host()))
        }
    };
    Ok(backend)
}

/// Strip a trailing slash so endpoint paths can be appended.
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
