//! Local Ollama `/api/generate` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_OLLAMA_HOST, ProviderKind};
use crate::error::ProviderError;

use super::backend::{TextBackend, trim_base_url};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    response: Option<String>,
}

pub struct OllamaClient {
    client: Client,
    model: String,
    base_url: String,
}

impl OllamaClient {
    pub fn new(client: Client, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            base_url: DEFAULT_OLLAMA_HOST.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = trim_base_url(base_url);
        self
    }
}

#[async_trait]
impl TextBackend for OllamaClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        debug!(url = %url, model = %self.model, prompt_len = prompt.len(), "Sending Ollama request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .response
            .filter(|t| !t.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
