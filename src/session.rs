//! Per-run context: display locale and selected provider.

use std::env;

use crate::config::{Config, ProviderKind};

/// Languages the translator targets. Everything else is shown in English.
const TRANSLATION_TARGETS: &[(&str, &str)] = &[
    ("it", "Italian"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("pt", "Portuguese"),
];

/// Display language, e.g. `en` or `it`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: String,
}

impl Locale {
    pub fn english() -> Self {
        Self {
            language: "en".to_string(),
        }
    }

    /// Parse the language part of `it_IT.UTF-8`, `pt-BR`, `de`, ...
    ///
    /// `C`, `POSIX` and empty values mean English.
    pub fn parse(value: &str) -> Self {
        let language = value
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        match language.as_str() {
            "" | "c" | "posix" => Self::english(),
            _ => Self { language },
        }
    }

    /// Resolve from an explicit override, else `LC_ALL`, `LC_MESSAGES`, `LANG`.
    pub fn detect(override_value: Option<&str>) -> Self {
        if let Some(value) = override_value.map(str::trim).filter(|v| !v.is_empty()) {
            return Self::parse(value);
        }
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|v| !v.trim().is_empty())
            .map(|v| Self::parse(&v))
            .unwrap_or_else(Self::english)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// English name of the translation target, if this locale has one.
    pub fn translation_target(&self) -> Option<&'static str> {
        TRANSLATION_TARGETS
            .iter()
            .find(|(code, _)| *code == self.language)
            .map(|(_, name)| *name)
    }
}

/// Immutable context created once at startup and passed down.
#[derive(Debug, Clone)]
pub struct Session {
    pub locale: Locale,
    pub provider: ProviderKind,
}

impl Session {
    pub fn new(config: &Config, provider: ProviderKind) -> Self {
        Self {
            locale: Locale::detect(config.locale.as_deref()),
            provider,
        }
    }
}
