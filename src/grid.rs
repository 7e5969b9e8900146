//! Category grid loader for the men/women pages.

use crate::catalog::{Category, DetailValue, ModelCollection, ModelRecord};
use crate::config::Config;
use crate::dom::Element;
use crate::fetch::{fetch_json, MODELS_PATH, TRANSLATIONS_PATH};
use crate::i18n::{self, TranslationDictionary};
use crate::storage::PreferenceStore;
use anyhow::Result;
use tracing::{error, info};

/// Message shown in place of the grid when anything fails.
pub const GRID_ERROR_MESSAGE: &str = "Error loading models. Please try again later.";

/// Render the grid page for one category.
///
/// Fetches the model collection and the translation dictionary concurrently;
/// if either fails, the grid container holds exactly one error paragraph and
/// no partial cards.
pub async fn render(
    client: &reqwest::Client,
    config: &Config,
    store: &dyn PreferenceStore,
    category: Category,
) -> Element {
    let mut page = Element::new("main").with_class("grid-page");
    let mut title = Element::new("h1").with_class("site-title");
    let mut grid = container();

    match build(client, config, store, category).await {
        Ok(built) => {
            info!(
                "Rendering {} grid: {} models",
                category.as_str(),
                built.cards.len()
            );
            title.set_text(built.title);
            grid.clear();
            for card in built.cards {
                grid.push(card);
            }
        }
        Err(e) => {
            error!("Failed to load {} grid: {:#}", category.as_str(), e);
            title.set_text(default_title(category));
            grid.clear();
            grid.push(Element::new("p").with_text(GRID_ERROR_MESSAGE));
        }
    }

    page.push(title);
    page.push(grid);
    page
}

struct BuiltGrid {
    title: String,
    cards: Vec<Element>,
}

async fn build(
    client: &reqwest::Client,
    config: &Config,
    store: &dyn PreferenceStore,
    category: Category,
) -> Result<BuiltGrid> {
    let (collection, dict): (ModelCollection, TranslationDictionary) = tokio::try_join!(
        fetch_json(client, &config.data_url, MODELS_PATH),
        fetch_json(client, &config.data_url, TRANSLATIONS_PATH),
    )?;

    let language = i18n::detect(store, config.system_locale.as_deref());

    let title = dict
        .get(&language, &format!("nav_{}", category.as_str()))
        .unwrap_or(default_title(category))
        .to_string();

    // Filter order over the source collection is the render order.
    let cards = collection
        .models
        .iter()
        .filter(|model| model.category == category)
        .map(|model| model_card(model, &dict, &language))
        .collect();

    Ok(BuiltGrid { title, cards })
}

/// The grid container as the page ships it: a loading placeholder that is
/// cleared exactly once before population.
fn container() -> Element {
    Element::new("div")
        .with_attr("id", "model-grid")
        .with_child(Element::new("p").with_class("loader").with_text("Loading..."))
}

fn default_title(category: Category) -> &'static str {
    match category {
        Category::Men => "Men",
        Category::Women => "Women",
    }
}

/// One clickable card linking to the portfolio page.
fn model_card(model: &ModelRecord, dict: &TranslationDictionary, language: &str) -> Element {
    let mut details = Element::new("div").with_class("model-details");
    for (label, value) in model.detail_lines() {
        let translation_key = format!("detail_{}", label.to_lowercase());
        let translated = dict.get_or_key(language, &translation_key);
        let line = format!(
            "{}: {}",
            translated.to_uppercase(),
            DetailValue::parse(value).display()
        );
        details.push(Element::new("p").with_text(line));
    }

    let wrapper = Element::new("div")
        .with_class("model-image-wrapper")
        .with_child(
            Element::new("img")
                .with_attr("src", &model.thumbnail_url)
                .with_attr("alt", &model.name)
                .with_attr("loading", "lazy"),
        )
        .with_child(
            Element::new("div")
                .with_class("model-card-overlay")
                .with_child(details),
        );

    Element::new("a")
        .with_class("model-card")
        .with_attr("href", format!("portfolio.html?id={}", model.id))
        .with_child(wrapper)
        .with_child(
            Element::new("span")
                .with_class("model-card-name")
                .with_text(&model.name),
        )
}
