//! Events listing loader.
//!
//! Event records carry parallel English/Spanish variants for every text
//! field. Each rendered block staples both variants onto the element as
//! attribute pairs, then translation is re-applied so the injected nodes
//! reflect the current language immediately.

use crate::config::Config;
use crate::dom::Element;
use crate::fetch::{fetch_json, EVENTS_PATH, TRANSLATIONS_PATH};
use crate::i18n::{self, TranslationDictionary};
use crate::storage::PreferenceStore;
use serde::Deserialize;
use tracing::{error, info, warn};

/// Message shown in place of the listing when the fetch fails.
pub const EVENTS_ERROR_MESSAGE: &str = "Error loading events. Please try again later.";

/// One event record from `events.json`. Read-only, externally owned.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub image: String,
    pub title_en: String,
    pub title_es: String,
    pub date_en: String,
    pub date_es: String,
    pub description_en: String,
    pub description_es: String,
}

/// Render the events page.
pub async fn render(
    client: &reqwest::Client,
    config: &Config,
    store: &dyn PreferenceStore,
) -> Element {
    let mut container = Element::new("div")
        .with_class("events-container")
        .with_child(Element::new("p").with_class("loader").with_text("Loading..."));

    let events: Vec<EventRecord> =
        match fetch_json(client, &config.data_url, EVENTS_PATH).await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to load events: {:#}", e);
                container.clear();
                container.push(Element::new("p").with_text(EVENTS_ERROR_MESSAGE));
                return container;
            }
        };

    info!("Rendering {} events", events.len());
    container.clear();
    for event in &events {
        container.push(event_block(event));
    }

    // Re-apply translation so the injected blocks reflect the current
    // language. A dictionary failure is not fatal here: the baked attribute
    // pairs carry their own literals.
    let language = i18n::detect(store, config.system_locale.as_deref());
    let dict: TranslationDictionary =
        match fetch_json(client, &config.data_url, TRANSLATIONS_PATH).await {
            Ok(dict) => dict,
            Err(e) => {
                warn!("Failed to load translations for events page: {:#}", e);
                TranslationDictionary::default()
            }
        };
    if let Err(e) = i18n::apply(&dict, &language, store, &mut container) {
        warn!("Failed to apply translation to events page: {:#}", e);
    }

    container
}

/// One event block. English variants are the initial text; both variants
/// ride along as attributes for later language switches.
fn event_block(event: &EventRecord) -> Element {
    Element::new("div")
        .with_class("event-item")
        .with_child(
            Element::new("img")
                .with_attr("src", &event.image)
                .with_attr("alt", &event.title_en)
                .with_attr("loading", "lazy"),
        )
        .with_child(
            Element::new("h2")
                .with_attr("data-translate-title-en", &event.title_en)
                .with_attr("data-translate-title-es", &event.title_es)
                .with_text(&event.title_en),
        )
        .with_child(
            Element::new("p")
                .with_class("event-date")
                .with_attr("data-translate-date-en", &event.date_en)
                .with_attr("data-translate-date-es", &event.date_es)
                .with_text(&event.date_en),
        )
        .with_child(
            Element::new("p")
                .with_attr("data-translate-description-en", &event.description_en)
                .with_attr("data-translate-description-es", &event.description_es)
                .with_text(&event.description_en),
        )
}
