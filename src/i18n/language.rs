//! Language type and active-language detection.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use crate::storage::{PreferenceStore, PREFERRED_LANGUAGE_KEY};
use anyhow::{bail, Result};
use tracing::warn;

/// A language validated against the registry.
///
/// Only supported, enabled languages can be constructed. Note that the
/// *detected* language (see [`detect`]) is deliberately not validated, so it
/// is carried as a plain code string; `Language` is for the places that need
/// the supported set, such as the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a code string, validating it against the
    /// registry.
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The site's fallback language.
    pub fn fallback() -> Language {
        let config = LanguageRegistry::get().fallback();
        Language { code: config.code }
    }

    /// ISO 639-1 language code (e.g., "en", "es").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a properly constructed Language.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }
}

/// Resolve the active language for a page render.
///
/// A persisted preference wins and is returned verbatim, without validation
/// against the supported set; an unknown stored code simply means dictionary
/// lookups miss and marked-up text stays unchanged. With no preference, a
/// `system_locale` beginning with `es` selects Spanish; anything else,
/// including an absent locale or a store read failure, falls through to the
/// registry fallback. Never fails, performs no writes.
pub fn detect(store: &dyn PreferenceStore, system_locale: Option<&str>) -> String {
    match store.get(PREFERRED_LANGUAGE_KEY) {
        Ok(Some(saved)) => return saved,
        Ok(None) => {}
        Err(e) => warn!("Failed to read language preference: {}", e),
    }

    match system_locale {
        Some(locale) if locale.starts_with("es") => "es".to_string(),
        _ => LanguageRegistry::get().fallback().code.to_string(),
    }
}
