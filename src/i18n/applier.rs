//! Rewrites marked-up elements to the active language.
//!
//! Two mechanisms coexist and must both be preserved:
//!
//! 1. Static markup carries a `data-translate="key"` attribute and is
//!    rewritten from the dictionary; a missing language or key leaves the
//!    element's original text unchanged.
//! 2. Dynamically injected markup (the events page) carries pre-baked
//!    per-language literal attribute pairs (`data-translate-<field>-en` /
//!    `data-translate-<field>-es`) stapled on at creation time; applying a
//!    language selects between the two attributes without consulting the
//!    dictionary, so the missing-key fallback never applies to it.

use crate::dom::Element;
use crate::i18n::{LanguageRegistry, TranslationDictionary};
use crate::storage::{PreferenceStore, PREFERRED_LANGUAGE_KEY};
use anyhow::Result;
use tracing::debug;

/// Attribute marking an element as dictionary-translated.
pub const TRANSLATE_ATTR: &str = "data-translate";

/// Prefix of the pre-baked per-language attribute pairs.
const BAKED_PREFIX: &str = "data-translate-";

/// Apply `language` to every marked-up element under `root`, update the
/// language selector's active state, and persist the choice.
///
/// Idempotent: applying the same language twice produces the same tree.
pub fn apply(
    dict: &TranslationDictionary,
    language: &str,
    store: &dyn PreferenceStore,
    root: &mut Element,
) -> Result<()> {
    if !dict.has_language(language) {
        debug!("No dictionary entries for language '{}'", language);
    }

    let baked_suffix = if language == "en" { "-en" } else { "-es" };

    root.for_each_element_mut(&mut |el| {
        // Dictionary-driven rewrite for static markup.
        if let Some(key) = el.attr(TRANSLATE_ATTR).map(str::to_string) {
            if let Some(text) = dict.get(language, &key).map(str::to_string) {
                el.set_text(text);
            }
        }

        // Attribute-pair selection for injected markup.
        let baked = el
            .attrs()
            .find(|(name, _)| name.starts_with(BAKED_PREFIX) && name.ends_with(baked_suffix))
            .map(|(_, value)| value.to_string());
        if let Some(text) = baked {
            el.set_text(text);
        }

        // Exactly the selected language's button carries the active marker.
        let selector_code = el
            .attr("id")
            .and_then(|id| id.strip_prefix("lang-"))
            .map(str::to_string);
        if let Some(code) = selector_code {
            el.toggle_class("active", code == language);
        }
    });

    store.set(PREFERRED_LANGUAGE_KEY, language)?;
    Ok(())
}

/// Build the language selector: one button per enabled language, labeled
/// with its native name. `apply` marks the active one.
pub fn language_selector() -> Element {
    let mut selector = Element::new("div").with_class("language-selector");
    for lang in LanguageRegistry::get().list_enabled() {
        selector.push(
            Element::new("button")
                .with_attr("id", format!("lang-{}", lang.code))
                .with_text(lang.native_name),
        );
    }
    selector
}
