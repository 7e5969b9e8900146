//! The translation dictionary fetched from `translations.json`.

use serde::Deserialize;
use std::collections::HashMap;

/// Language-keyed table of string lookups.
///
/// Fetched once per page render and passed explicitly into each render call;
/// the document shape is `{ "<lang>": { "<key>": "<text>" } }`. Missing
/// languages or keys are not errors — lookups return `None` and the caller
/// leaves the original text in place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TranslationDictionary {
    languages: HashMap<String, HashMap<String, String>>,
}

impl TranslationDictionary {
    /// Look up `key` in `language`.
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    /// Look up `key` in `language`, falling back to the raw key when the
    /// language or key is absent. Used for detail labels, where the original
    /// label is an acceptable stand-in for an untranslated one.
    pub fn get_or_key<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        self.get(language, key).unwrap_or(key)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    #[cfg(test)]
    pub fn from_entries(entries: &[(&str, &str, &str)]) -> Self {
        let mut languages: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (lang, key, text) in entries {
            languages
                .entry(lang.to_string())
                .or_default()
                .insert(key.to_string(), text.to_string());
        }
        Self { languages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationDictionary {
        serde_json::from_str(
            r#"{
                "en": { "nav_men": "Men", "detail_height": "Height" },
                "es": { "nav_men": "Hombres", "detail_height": "Altura" }
            }"#,
        )
        .expect("parse dictionary")
    }

    #[test]
    fn test_get_present_key() {
        let dict = sample();
        assert_eq!(dict.get("en", "nav_men"), Some("Men"));
        assert_eq!(dict.get("es", "nav_men"), Some("Hombres"));
    }

    #[test]
    fn test_get_missing_key() {
        let dict = sample();
        assert_eq!(dict.get("en", "nav_women"), None);
    }

    #[test]
    fn test_get_missing_language() {
        let dict = sample();
        assert_eq!(dict.get("fr", "nav_men"), None);
    }

    #[test]
    fn test_get_or_key_falls_back_to_raw_key() {
        let dict = sample();
        assert_eq!(dict.get_or_key("en", "detail_shoes"), "detail_shoes");
        assert_eq!(dict.get_or_key("es", "detail_height"), "Altura");
    }

    #[test]
    fn test_has_language() {
        let dict = sample();
        assert!(dict.has_language("en"));
        assert!(!dict.has_language("fr"));
    }

    #[test]
    fn test_empty_document_parses() {
        let dict: TranslationDictionary = serde_json::from_str("{}").expect("parse");
        assert_eq!(dict.get("en", "anything"), None);
    }
}
