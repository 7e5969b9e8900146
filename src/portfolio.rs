//! Portfolio loader for the individual model page.
//!
//! The page is selected by the `id` query parameter and distinguishes three
//! failure modes with three separate messages: id missing (no fetch is even
//! attempted), id unknown, and fetch failure.

use crate::catalog::{DetailValue, ModelCollection, ModelRecord};
use crate::config::Config;
use crate::dom::Element;
use crate::fetch::{fetch_json, MODELS_PATH, TRANSLATIONS_PATH};
use crate::i18n::{self, TranslationDictionary};
use crate::storage::PreferenceStore;
use thiserror::Error;
use tracing::{error, info, warn};

/// Default document title for pages that fail before a model is known.
const SITE_TITLE: &str = "Contacto Basico";

/// The three user-visible portfolio failures. The display text is exactly
/// what the page shows.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Model not specified.")]
    NotSpecified,

    #[error("Model not found.")]
    NotFound,

    #[error("Error loading portfolio. Please try again later.")]
    Fetch(anyhow::Error),
}

/// A rendered portfolio page: the document title plus the main subtree.
#[derive(Debug)]
pub struct PortfolioPage {
    pub document_title: String,
    pub content: Element,
}

/// Extract the `id` parameter from a page query string.
pub fn model_id_from_query(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == "id")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Render the portfolio page for the given query string.
pub async fn render(
    client: &reqwest::Client,
    config: &Config,
    store: &dyn PreferenceStore,
    query: &str,
) -> PortfolioPage {
    let mut main = Element::new("main").with_attr("id", "portfolio-main");

    match build(client, config, store, query).await {
        Ok((title, children)) => {
            for child in children {
                main.push(child);
            }
            PortfolioPage {
                document_title: title,
                content: main,
            }
        }
        Err(e) => {
            match &e {
                PortfolioError::Fetch(source) => {
                    error!("Failed to load portfolio: {:#}", source)
                }
                PortfolioError::NotSpecified => warn!("Portfolio requested without an id"),
                PortfolioError::NotFound => {
                    warn!("Portfolio requested for an unknown model id")
                }
            }
            main.push(Element::new("h1").with_text(e.to_string()));
            PortfolioPage {
                document_title: SITE_TITLE.to_string(),
                content: main,
            }
        }
    }
}

async fn build(
    client: &reqwest::Client,
    config: &Config,
    store: &dyn PreferenceStore,
    query: &str,
) -> Result<(String, Vec<Element>), PortfolioError> {
    // No id, no fetch.
    let id = model_id_from_query(query).ok_or(PortfolioError::NotSpecified)?;

    let (collection, dict): (ModelCollection, TranslationDictionary) = tokio::try_join!(
        fetch_json(client, &config.data_url, MODELS_PATH),
        fetch_json(client, &config.data_url, TRANSLATIONS_PATH),
    )
    .map_err(PortfolioError::Fetch)?;

    let model = collection.find(&id).ok_or(PortfolioError::NotFound)?;
    let language = i18n::detect(store, config.system_locale.as_deref());

    info!("Rendering portfolio for model '{}'", model.id);

    let mut children = vec![
        Element::new("h1")
            .with_class("modelNameBook")
            .with_text(&model.name),
        measurement_list(model, &dict, &language),
        carousel_block(model),
    ];

    let tabs = SectionTabs::for_model(model);
    if !tabs.sections().is_empty() {
        let (mut nav, mut sections) = tabs.build(model);
        tabs.apply(&mut nav, &mut sections);
        children.push(nav);
        children.push(sections);
    }

    Ok((format!("{} - {}", SITE_TITLE, model.name), children))
}

// ==================== Measurements ====================

/// Marker attribute tracking which unit system a measurement shows.
const UNIT_SYSTEM_ATTR: &str = "data-unit-system";

fn measurement_list(
    model: &ModelRecord,
    dict: &TranslationDictionary,
    language: &str,
) -> Element {
    let mut list = Element::new("div").with_class("modelBookMeasurements");
    for (label, value) in model.detail_lines() {
        list.push(measurement_item(label, value, dict, language));
    }
    list
}

fn measurement_item(
    label: &str,
    value: &str,
    dict: &TranslationDictionary,
    language: &str,
) -> Element {
    let translation_key = format!("detail_{}", label.to_lowercase());
    let translated = dict.get_or_key(language, &translation_key);

    let name_span = Element::new("span")
        .with_class("measurementName")
        .with_text(format!("{}: ", translated));

    let mut item = Element::new("div").with_class("measurement-item");

    match DetailValue::parse(value) {
        DetailValue::Dual { metric, imperial } => {
            item.set_attr("data-metric", metric);
            item.set_attr("data-imperial", imperial);
            item.set_attr(UNIT_SYSTEM_ATTR, "metric");
            item.push(name_span);
            item.push(
                Element::new("span")
                    .with_class("measurements")
                    .with_text(metric),
            );
        }
        DetailValue::Plain(plain) => {
            item.add_class("non-convertible");
            item.push(name_span);
            item.push(
                Element::new("span")
                    .with_class("measurements")
                    .with_text(plain),
            );
        }
    }
    item
}

/// Swap a dual-valued measurement between its metric and imperial
/// representations. Non-convertible items are left untouched. The unit
/// marker persists only for the page's lifetime.
pub fn toggle_measurement(item: &mut Element) {
    let metric = item.attr("data-metric").map(str::to_string);
    let imperial = item.attr("data-imperial").map(str::to_string);
    let (Some(metric), Some(imperial)) = (metric, imperial) else {
        return;
    };

    let showing_metric = item.attr(UNIT_SYSTEM_ATTR) == Some("metric");
    let (next_text, next_system) = if showing_metric {
        (imperial, "imperial")
    } else {
        (metric, "metric")
    };

    if let Some(span) = item.find_mut(&|el| el.has_class("measurements")) {
        span.set_text(next_text);
    }
    item.set_attr(UNIT_SYSTEM_ATTR, next_system);
}

// ==================== Carousel ====================

/// Cyclic navigation state over the portfolio images.
///
/// Navigation recomputes the full three-state halo (`active`,
/// `prev-active`, `next-active`) on every step; the three markers are
/// mutually exclusive per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    /// # Panics
    /// Panics if `len` is 0; the carousel block is only built for a
    /// non-empty image list.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "Carousel requires at least one image");
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Recompute the halo classes on the images container.
    pub fn apply(&self, images: &mut Element) {
        let len = self.len;
        let prev = (self.index + len - 1) % len;
        let next = (self.index + 1) % len;

        for (i, img) in images.child_elements_mut().enumerate() {
            img.remove_class("active");
            img.remove_class("prev-active");
            img.remove_class("next-active");
            if i == self.index {
                img.add_class("active");
            } else if i == prev {
                img.add_class("prev-active");
            } else if i == next {
                img.add_class("next-active");
            }
        }
    }
}

/// The carousel block: images plus previous/next buttons, image 0 active.
fn carousel_block(model: &ModelRecord) -> Element {
    let mut block = Element::new("div").with_class("carousel");

    if model.portfolio_images.is_empty() {
        block.push(
            Element::new("div")
                .with_class("carousel-images")
                .with_child(Element::new("p").with_text("No portfolio images available.")),
        );
        return block;
    }

    let mut images = Element::new("div").with_class("carousel-images");
    for (index, url) in model.portfolio_images.iter().enumerate() {
        images.push(
            Element::new("img")
                .with_class("carousel-image")
                .with_attr("src", url)
                .with_attr("alt", format!("{} {}", model.name, index + 1)),
        );
    }

    Carousel::new(model.portfolio_images.len()).apply(&mut images);

    block.push(
        Element::new("button")
            .with_class("carousel-button")
            .with_class("prev")
            .with_text("‹"),
    );
    block.push(images);
    block.push(
        Element::new("button")
            .with_class("carousel-button")
            .with_class("next")
            .with_text("›"),
    );
    block
}

// ==================== Content sections ====================

/// The named portfolio content sections, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Portfolio,
    Polaroids,
    Video,
    Runway,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Portfolio => "portfolio",
            Section::Polaroids => "polaroids",
            Section::Video => "video",
            Section::Runway => "runway",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Section::Portfolio => "Portfolio",
            Section::Polaroids => "Polaroids",
            Section::Video => "Video",
            Section::Runway => "Runway",
        }
    }

    fn backing<'a>(&self, model: &'a ModelRecord) -> &'a [String] {
        match self {
            Section::Portfolio => &model.portfolio_images,
            Section::Polaroids => &model.polaroid_images,
            Section::Video => &model.videos,
            Section::Runway => &model.runways,
        }
    }
}

/// Tab navigation over the sections a model actually has content for.
///
/// Exactly one section and its tab are active at a time; activating a tab
/// deactivates every other pair first.
#[derive(Debug, Clone)]
pub struct SectionTabs {
    sections: Vec<Section>,
    active: usize,
}

impl SectionTabs {
    /// Sections whose backing collections are non-empty, in tab order.
    pub fn for_model(model: &ModelRecord) -> Self {
        let sections = [
            Section::Portfolio,
            Section::Polaroids,
            Section::Video,
            Section::Runway,
        ]
        .into_iter()
        .filter(|section| !section.backing(model).is_empty())
        .collect();
        Self {
            sections,
            active: 0,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> Option<Section> {
        self.sections.get(self.active).copied()
    }

    /// Make `section` the active pair. Unknown sections are ignored.
    pub fn activate(&mut self, section: Section) {
        if let Some(index) = self.sections.iter().position(|s| *s == section) {
            self.active = index;
        }
    }

    /// Build the tab nav and the stacked section blocks.
    pub fn build(&self, model: &ModelRecord) -> (Element, Element) {
        let mut nav = Element::new("nav").with_class("section-tabs");
        let mut blocks = Element::new("div").with_class("portfolio-sections");

        for section in &self.sections {
            nav.push(
                Element::new("button")
                    .with_class("tab")
                    .with_attr("data-section", section.as_str())
                    .with_text(section.label()),
            );

            let mut block = Element::new("section")
                .with_class("portfolio-section")
                .with_attr("data-section", section.as_str());
            for url in section.backing(model) {
                let child = match section {
                    Section::Video => Element::new("video")
                        .with_attr("src", url)
                        .with_attr("controls", "controls"),
                    _ => Element::new("img")
                        .with_attr("src", url)
                        .with_attr("alt", &model.name)
                        .with_attr("loading", "lazy"),
                };
                block.push(child);
            }
            blocks.push(block);
        }

        (nav, blocks)
    }

    /// Recompute the active markers: all pairs deactivated, then the
    /// selected pair activated.
    pub fn apply(&self, nav: &mut Element, blocks: &mut Element) {
        let active = self.active().map(|s| s.as_str());
        for tab in nav.child_elements_mut() {
            tab.toggle_class("active", tab.attr("data-section") == active);
        }
        for block in blocks.child_elements_mut() {
            block.toggle_class("active", block.attr("data-section") == active);
        }
    }
}
