//! Re-expressing AI output in the operator's language.

use tracing::debug;

use crate::error::CapabilityError;
use crate::session::Locale;

use super::gateway::AiGateway;
use super::prompt;

/// Translates text through the same backend used for generation.
pub struct Translator<'a> {
    gateway: &'a AiGateway,
    target: Option<&'static str>,
}

impl<'a> Translator<'a> {
    pub fn new(gateway: &'a AiGateway, locale: &Locale) -> Self {
        Self {
            gateway,
            target: locale.translation_target(),
        }
    }

    /// Translate `text` when the locale has a target language.
    ///
    /// Empty text and English locales pass through untouched. A failed or
    /// empty translation returns the original text.
    pub async fn translate_if_needed(&self, text: String) -> Result<String, CapabilityError> {
        let Some(language) = self.target else {
            return Ok(text);
        };
        if text.trim().is_empty() {
            return Ok(text);
        }

        debug!("Translating {} chars to {}", text.len(), language);
        let translated = self
            .gateway
            .complete_template(prompt::TRANSLATE, &[("language", language), ("text", &text)])
            .await?;

        Ok(translated.filter(|t| !t.trim().is_empty()).unwrap_or(text))
    }
}
