//! Prompt templates per provider and capability, with placeholder filling.
//!
//! Templates ship under `prompts/<provider>/<name>.txt` and are embedded in
//! the binary. Gemini is the fallback provider and has every template.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::config::ProviderKind;
use crate::error::TemplateError;

/// Provider whose templates are used when another provider lacks one.
pub const FALLBACK_PROVIDER: ProviderKind = ProviderKind::Gemini;

pub const REVIEW: &str = "review";
pub const COMMIT: &str = "commit";
pub const COMMIT_BODY: &str = "commit-body";
pub const BRANCH: &str = "branch";
pub const TRANSLATE: &str = "translate";

/// `(provider, name, text)` for every shipped template.
const EMBEDDED: &[(&str, &str, &str)] = &[
    ("gemini", REVIEW, include_str!("../../prompts/gemini/review.txt")),
    ("gemini", COMMIT, include_str!("../../prompts/gemini/commit.txt")),
    ("gemini", COMMIT_BODY, include_str!("../../prompts/gemini/commit-body.txt")),
    ("gemini", BRANCH, include_str!("../../prompts/gemini/branch.txt")),
    ("gemini", TRANSLATE, include_str!("../../prompts/gemini/translate.txt")),
    ("openai", REVIEW, include_str!("../../prompts/openai/review.txt")),
    ("openai", COMMIT, include_str!("../../prompts/openai/commit.txt")),
    ("ollama", REVIEW, include_str!("../../prompts/ollama/review.txt")),
    ("ollama", COMMIT, include_str!("../../prompts/ollama/commit.txt")),
];

#[derive(Debug, Clone)]
enum Source {
    Embedded,
    Directory(PathBuf),
}

/// Resolves templates by provider and capability name.
#[derive(Debug, Clone)]
pub struct PromptStore {
    source: Source,
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PromptStore {
    /// Templates compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Templates read from `<root>/<provider>/<name>.txt`.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(root.into()),
        }
    }

    /// The provider's template, or the fallback provider's.
    pub fn get(&self, provider: ProviderKind, name: &str) -> Result<String, TemplateError> {
        if let Some(text) = self.lookup(provider, name)? {
            return Ok(text);
        }
        debug!(
            "No '{}' template for {}, using {}",
            name, provider, FALLBACK_PROVIDER
        );
        self.lookup(FALLBACK_PROVIDER, name)?
            .ok_or_else(|| TemplateError::Missing {
                provider: provider.to_string(),
                name: name.to_string(),
            })
    }

    fn lookup(&self, provider: ProviderKind, name: &str) -> Result<Option<String>, TemplateError> {
        match &self.source {
            Source::Embedded => Ok(EMBEDDED
                .iter()
                .find(|(p, n, _)| *p == provider.as_str() && *n == name)
                .map(|(_, _, text)| text.to_string())),
            Source::Directory(root) => {
                let path = root.join(provider.as_str()).join(format!("{name}.txt"));
                match fs::read_to_string(&path) {
                    Ok(text) => Ok(Some(text)),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                    Err(source) => Err(TemplateError::Read { path, source }),
                }
            }
        }
    }
}

/// Replace `{key}` placeholders in one pass.
///
/// Substituted values are never re-scanned, so a diff containing `{text}`
/// stays intact. Unknown placeholders are left as written.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replacement = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });
        match replacement {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_provider_specific_template() {
        let store = PromptStore::embedded();
        let openai = store.get(ProviderKind::OpenAi, REVIEW).unwrap();
        let gemini = store.get(ProviderKind::Gemini, REVIEW).unwrap();
        assert_ne!(openai, gemini);
    }

    #[test]
    fn test_embedded_falls_back_to_gemini() {
        let store = PromptStore::embedded();
        for provider in [ProviderKind::OpenAi, ProviderKind::Ollama] {
            for name in [COMMIT_BODY, BRANCH, TRANSLATE] {
                assert_eq!(
                    store.get(provider, name).unwrap(),
                    store.get(ProviderKind::Gemini, name).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_embedded_missing_everywhere() {
        let err = PromptStore::embedded()
            .get(ProviderKind::Ollama, "haiku")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Missing { .. }));
    }

    #[test]
    fn test_shipped_templates_have_placeholders() {
        let store = PromptStore::embedded();
        for provider in [ProviderKind::Gemini, ProviderKind::OpenAi, ProviderKind::Ollama] {
            assert!(store.get(provider, REVIEW).unwrap().contains("{minReviewScore}"));
            assert!(store.get(provider, REVIEW).unwrap().contains("{diff}"));
            assert!(store.get(provider, COMMIT).unwrap().contains("{commitTypes}"));
        }
        assert!(store.get(ProviderKind::Gemini, TRANSLATE).unwrap().contains("{text}"));
    }

    #[test]
    fn test_directory_store_with_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("gemini")).unwrap();
        fs::create_dir_all(dir.path().join("ollama")).unwrap();
        fs::write(dir.path().join("gemini/review.txt"), "gemini review").unwrap();
        fs::write(dir.path().join("ollama/review.txt"), "ollama review").unwrap();
        fs::write(dir.path().join("gemini/branch.txt"), "gemini branch").unwrap();

        let store = PromptStore::from_dir(dir.path());
        assert_eq!(store.get(ProviderKind::Ollama, REVIEW).unwrap(), "ollama review");
        assert_eq!(store.get(ProviderKind::Ollama, BRANCH).unwrap(), "gemini branch");
        assert!(matches!(
            store.get(ProviderKind::Ollama, COMMIT),
            Err(TemplateError::Missing { .. })
        ));
    }

    #[test]
    fn test_fill_replaces_known_placeholders() {
        let out = fill(
            "Score at least {minReviewScore}.\n{diff}",
            &[("minReviewScore", "6"), ("diff", "+ line")],
        );
        assert_eq!(out, "Score at least 6.\n+ line");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("{text}", &[("text", "fn f() { {language} }"), ("language", "Italian")]);
        assert_eq!(out, "fn f() { {language} }");
    }

    #[test]
    fn test_fill_leaves_unknown_and_unbalanced_braces() {
        let out = fill("{unknown} { {diff", &[("diff", "x")]);
        assert_eq!(out, "{unknown} { {diff");
    }

    #[test]
    fn test_fill_repeated_placeholder() {
        assert_eq!(fill("{a}-{a}", &[("a", "x")]), "x-x");
    }
}
