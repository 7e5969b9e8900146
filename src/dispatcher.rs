//! Page dispatch: resolve the page identity from the request path and
//! invoke exactly one loader, plus the scroll-driven header behavior every
//! page shares.

use crate::catalog::{Category, ModelCollection};
use crate::config::Config;
use crate::dom::Element;
use crate::fetch::{fetch_json, MODELS_PATH, TRANSLATIONS_PATH};
use crate::i18n::{self, TranslationDictionary};
use crate::mosaic::MosaicAnimator;
use crate::storage::PreferenceStore;
use crate::{events, grid, portfolio};
use tracing::warn;

const SITE_TITLE: &str = "Contacto Basico";

/// Number of columns the homepage mosaic lays thumbnails into.
const MOSAIC_COLUMNS: usize = 3;

/// The site's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Grid(Category),
    Portfolio,
    Events,
}

impl Page {
    /// File name of the rendered page.
    pub fn file_name(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Grid(Category::Men) => "men.html",
            Page::Grid(Category::Women) => "women.html",
            Page::Portfolio => "portfolio.html",
            Page::Events => "events.html",
        }
    }
}

/// Resolve the page identity from a request path's final segment.
///
/// Exact-match only; unknown segments dispatch nothing. The empty final
/// segment (site root) is the homepage.
pub fn identify(path: &str) -> Option<Page> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment {
        "" | "index.html" => Some(Page::Home),
        "men.html" => Some(Page::Grid(Category::Men)),
        "women.html" => Some(Page::Grid(Category::Women)),
        "portfolio.html" => Some(Page::Portfolio),
        "events.html" => Some(Page::Events),
        _ => None,
    }
}

/// A fully rendered page document.
#[derive(Debug)]
pub struct RenderedPage {
    pub document_title: String,
    pub body: Element,
}

impl RenderedPage {
    pub fn to_html(&self) -> String {
        let html = Element::new("html")
            .with_child(
                Element::new("head")
                    .with_child(Element::new("title").with_text(&self.document_title)),
            )
            .with_child(self.body.clone());
        format!("<!DOCTYPE html>\n{}", html.to_html())
    }
}

/// Render one page: shared chrome, the page's loader, then translation of
/// the static markup.
pub async fn render(
    client: &reqwest::Client,
    config: &Config,
    store: &dyn PreferenceStore,
    page: Page,
    query: &str,
) -> RenderedPage {
    let mut body = Element::new("body");
    body.push(chrome_header());

    let mut document_title = SITE_TITLE.to_string();
    match page {
        Page::Home => body.push(homepage_mosaic(client, config).await),
        Page::Grid(category) => body.push(grid::render(client, config, store, category).await),
        Page::Portfolio => {
            let rendered = portfolio::render(client, config, store, query).await;
            document_title = rendered.document_title;
            body.push(rendered.content);
        }
        Page::Events => body.push(events::render(client, config, store).await),
    }

    // An explicit override counts as a language switch. Switches only come
    // from the selector, so the override is validated against the supported
    // set; detection, by contrast, returns stored codes verbatim.
    let language = match &config.language_override {
        Some(code) => match i18n::Language::from_code(code) {
            Ok(language) => language.code().to_string(),
            Err(e) => {
                warn!("Ignoring language override: {}", e);
                i18n::detect(store, config.system_locale.as_deref())
            }
        },
        None => i18n::detect(store, config.system_locale.as_deref()),
    };

    let dict: TranslationDictionary =
        match fetch_json(client, &config.data_url, TRANSLATIONS_PATH).await {
            Ok(dict) => dict,
            Err(e) => {
                warn!("Failed to load translations for page chrome: {:#}", e);
                TranslationDictionary::default()
            }
        };
    if let Err(e) = i18n::apply(&dict, &language, store, &mut body) {
        warn!("Failed to apply translation: {:#}", e);
    }

    RenderedPage {
        document_title,
        body,
    }
}

/// The fixed header every page carries: home link, section navigation with
/// translation markers, and the language selector.
fn chrome_header() -> Element {
    let nav = Element::new("nav")
        .with_child(
            Element::new("a")
                .with_attr("href", "men.html")
                .with_attr(i18n::TRANSLATE_ATTR, "nav_men")
                .with_text("Men"),
        )
        .with_child(
            Element::new("a")
                .with_attr("href", "women.html")
                .with_attr(i18n::TRANSLATE_ATTR, "nav_women")
                .with_text("Women"),
        )
        .with_child(
            Element::new("a")
                .with_attr("href", "events.html")
                .with_attr(i18n::TRANSLATE_ATTR, "nav_events")
                .with_text("Events"),
        );

    Element::new("header")
        .with_class("main-header")
        .with_child(
            Element::new("a")
                .with_class("home-link")
                .with_attr("href", "index.html")
                .with_text(SITE_TITLE),
        )
        .with_child(nav)
        .with_child(i18n::language_selector())
}

/// The homepage mosaic in its initial state, columns filled round-robin
/// from the model thumbnails. A failed fetch leaves the mosaic empty — the
/// homepage carries no error container.
async fn homepage_mosaic(client: &reqwest::Client, config: &Config) -> Element {
    let collection: ModelCollection =
        match fetch_json(client, &config.data_url, MODELS_PATH).await {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Failed to load models for the homepage mosaic: {:#}", e);
                return MosaicAnimator::new(Vec::new()).build();
            }
        };

    MosaicAnimator::new(mosaic_columns(&collection)).build()
}

fn mosaic_columns(collection: &ModelCollection) -> Vec<Vec<String>> {
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); MOSAIC_COLUMNS];
    for (i, model) in collection.models.iter().enumerate() {
        columns[i % MOSAIC_COLUMNS].push(model.thumbnail_url.clone());
    }
    columns
}

/// Scroll-direction state for the auto-hiding header.
///
/// The header hides when scrolling down past its own height and shows
/// again on any upward scroll. The last offset is clamped to zero so
/// overscroll bounce cannot invert the direction test.
#[derive(Debug, Clone)]
pub struct HeaderScrollState {
    header_height: f64,
    last_offset: f64,
    hidden: bool,
}

impl HeaderScrollState {
    pub fn new(header_height: f64) -> Self {
        Self {
            header_height,
            last_offset: 0.0,
            hidden: false,
        }
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Feed one scroll offset through the direction test.
    pub fn on_scroll(&mut self, offset: f64) {
        self.hidden = offset > self.last_offset && offset > self.header_height;
        self.last_offset = offset.max(0.0);
    }

    /// Reflect the state on the header element.
    pub fn apply(&self, header: &mut Element) {
        header.toggle_class("header-hidden", self.hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Page Identity Tests ====================

    #[test]
    fn test_identify_exact_matches() {
        assert_eq!(identify("/site/men.html"), Some(Page::Grid(Category::Men)));
        assert_eq!(
            identify("/site/women.html"),
            Some(Page::Grid(Category::Women))
        );
        assert_eq!(identify("/portfolio.html"), Some(Page::Portfolio));
        assert_eq!(identify("/events.html"), Some(Page::Events));
        assert_eq!(identify("/index.html"), Some(Page::Home));
    }

    #[test]
    fn test_identify_site_root_is_home() {
        assert_eq!(identify("/"), Some(Page::Home));
        assert_eq!(identify(""), Some(Page::Home));
    }

    #[test]
    fn test_identify_unknown_segment_dispatches_nothing() {
        assert_eq!(identify("/about.html"), None);
        assert_eq!(identify("/men"), None);
        assert_eq!(identify("/MEN.HTML"), None);
    }

    #[test]
    fn test_page_file_names() {
        assert_eq!(Page::Home.file_name(), "index.html");
        assert_eq!(Page::Grid(Category::Women).file_name(), "women.html");
    }

    // ==================== Chrome Tests ====================

    #[test]
    fn test_chrome_header_carries_translation_markers() {
        let header = chrome_header();
        let marked: Vec<_> = [("nav_men", "men.html"), ("nav_women", "women.html")]
            .iter()
            .filter_map(|(key, href)| {
                header.find(&|el| {
                    el.attr(i18n::TRANSLATE_ATTR) == Some(*key) && el.attr("href") == Some(*href)
                })
            })
            .collect();
        assert_eq!(marked.len(), 2);
        assert!(header
            .find(&|el| el.attr("id") == Some("lang-es"))
            .is_some());
    }

    #[test]
    fn test_mosaic_columns_distribute_round_robin() {
        let collection: ModelCollection = serde_json::from_str(
            r#"{"models":[
                {"id":"a","name":"A","category":"men","thumbnailUrl":"a.jpg","portfolioImages":[]},
                {"id":"b","name":"B","category":"men","thumbnailUrl":"b.jpg","portfolioImages":[]},
                {"id":"c","name":"C","category":"men","thumbnailUrl":"c.jpg","portfolioImages":[]},
                {"id":"d","name":"D","category":"men","thumbnailUrl":"d.jpg","portfolioImages":[]}
            ]}"#,
        )
        .expect("parse");
        let columns = mosaic_columns(&collection);
        assert_eq!(columns[0], vec!["a.jpg", "d.jpg"]);
        assert_eq!(columns[1], vec!["b.jpg"]);
        assert_eq!(columns[2], vec!["c.jpg"]);
    }

    // ==================== Header Scroll Tests ====================

    #[test]
    fn test_scrolling_down_past_header_hides_it() {
        let mut state = HeaderScrollState::new(80.0);
        state.on_scroll(50.0);
        assert!(!state.hidden());
        state.on_scroll(120.0);
        assert!(state.hidden());
    }

    #[test]
    fn test_scrolling_up_reveals_header() {
        let mut state = HeaderScrollState::new(80.0);
        state.on_scroll(200.0);
        assert!(state.hidden());
        state.on_scroll(150.0);
        assert!(!state.hidden());
    }

    #[test]
    fn test_scrolling_down_within_header_height_keeps_it_visible() {
        let mut state = HeaderScrollState::new(80.0);
        state.on_scroll(40.0);
        assert!(!state.hidden());
    }

    #[test]
    fn test_negative_offset_clamps_to_zero() {
        let mut state = HeaderScrollState::new(80.0);
        state.on_scroll(-30.0);
        assert!(!state.hidden());
        // After the clamp, a bounce back to 0 is not "scrolling down".
        state.on_scroll(0.0);
        assert!(!state.hidden());
    }

    #[test]
    fn test_apply_toggles_header_hidden_class() {
        let mut header = chrome_header();
        let mut state = HeaderScrollState::new(80.0);
        state.on_scroll(300.0);
        state.apply(&mut header);
        assert!(header.has_class("header-hidden"));
        state.on_scroll(100.0);
        state.apply(&mut header);
        assert!(!header.has_class("header-hidden"));
    }
}
