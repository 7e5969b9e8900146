//! Internationalization (i18n) module for the site's two languages.
//!
//! All language-related logic lives here: the supported-language registry,
//! the detection of the active language, the translation dictionary fetched
//! from `translations.json`, and the applier that rewrites marked-up
//! elements.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported languages and metadata
//! - `language`: validated Language type plus active-language detection
//! - `dictionary`: the language → key → text table from `translations.json`
//! - `applier`: rewrites element trees and keeps the selector in sync

mod applier;
mod dictionary;
mod language;
mod registry;

pub use applier::{apply, language_selector, TRANSLATE_ATTR};
pub use dictionary::TranslationDictionary;
pub use language::{detect, Language};
pub use registry::{LanguageConfig, LanguageRegistry};
