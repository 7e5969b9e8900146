//! Model records, as published in `models.json`.

use serde::Deserialize;
use serde_json::Value;

/// Category discriminator for the two grid pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
        }
    }
}

/// One model record. Read-only; the collection is externally owned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub thumbnail_url: String,

    /// Detail label → value, in publication order (the grid and the
    /// measurement list render lines in this order). Values may encode a
    /// dual metric/imperial form as `"<metric> - <imperial>"`.
    #[serde(default)]
    pub details: serde_json::Map<String, Value>,

    pub portfolio_images: Vec<String>,

    #[serde(default)]
    pub polaroid_images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub runways: Vec<String>,
}

impl ModelRecord {
    /// Detail lines in publication order. Non-string values are skipped.
    pub fn detail_lines(&self) -> impl Iterator<Item = (&str, &str)> {
        self.details
            .iter()
            .filter_map(|(label, value)| value.as_str().map(|v| (label.as_str(), v)))
    }
}

/// The `models.json` document.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelCollection {
    pub models: Vec<ModelRecord>,
}

impl ModelCollection {
    pub fn find(&self, id: &str) -> Option<&ModelRecord> {
        self.models.iter().find(|model| model.id == id)
    }
}

/// A detail value, split into its dual form when it encodes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailValue<'a> {
    /// `"<metric> - <imperial>"`, both sides trimmed.
    Dual { metric: &'a str, imperial: &'a str },
    Plain(&'a str),
}

impl<'a> DetailValue<'a> {
    pub fn parse(value: &'a str) -> Self {
        match value.split_once(" - ") {
            Some((metric, imperial)) => DetailValue::Dual {
                metric: metric.trim(),
                imperial: imperial.trim(),
            },
            None => DetailValue::Plain(value),
        }
    }

    /// The value the grid shows: the metric component of a dual form, or
    /// the value itself.
    pub fn display(&self) -> &'a str {
        match self {
            DetailValue::Dual { metric, .. } => metric,
            DetailValue::Plain(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_collection_json() -> &'static str {
        r#"{
            "models": [
                {
                    "id": "m1",
                    "name": "Ana Torres",
                    "category": "women",
                    "thumbnailUrl": "img/ana.jpg",
                    "details": { "Height": "178 - 5'10\"", "Shoes": "39" },
                    "portfolioImages": ["img/ana1.jpg", "img/ana2.jpg", "img/ana3.jpg"]
                },
                {
                    "id": "m2",
                    "name": "Luis Vega",
                    "category": "men",
                    "thumbnailUrl": "img/luis.jpg",
                    "details": { "Height": "188 - 6'2\"" },
                    "portfolioImages": ["img/luis1.jpg"],
                    "polaroidImages": ["img/luis_p1.jpg"]
                }
            ]
        }"#
    }

    // ==================== Deserialization Tests ====================

    #[test]
    fn test_collection_parses() {
        let collection: ModelCollection =
            serde_json::from_str(sample_collection_json()).expect("parse");
        assert_eq!(collection.models.len(), 2);
        assert_eq!(collection.models[0].category, Category::Women);
        assert_eq!(collection.models[1].polaroid_images.len(), 1);
        assert!(collection.models[0].videos.is_empty());
    }

    #[test]
    fn test_detail_lines_preserve_order() {
        let collection: ModelCollection =
            serde_json::from_str(sample_collection_json()).expect("parse");
        let labels: Vec<_> = collection.models[0]
            .detail_lines()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["Height", "Shoes"]);
    }

    #[test]
    fn test_find_by_id() {
        let collection: ModelCollection =
            serde_json::from_str(sample_collection_json()).expect("parse");
        assert_eq!(collection.find("m2").unwrap().name, "Luis Vega");
        assert!(collection.find("missing").is_none());
    }

    // ==================== Detail Value Tests ====================

    #[test]
    fn test_dual_value_splits_and_trims() {
        let value = DetailValue::parse("90 - 35in");
        assert_eq!(
            value,
            DetailValue::Dual {
                metric: "90",
                imperial: "35in"
            }
        );
        assert_eq!(value.display(), "90");
    }

    #[test]
    fn test_plain_value_passes_through() {
        let value = DetailValue::parse("39");
        assert_eq!(value, DetailValue::Plain("39"));
        assert_eq!(value.display(), "39");
    }

    #[test]
    fn test_hyphen_without_spaces_is_plain() {
        assert_eq!(DetailValue::parse("90-35in"), DetailValue::Plain("90-35in"));
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::Men.as_str(), "men");
        assert_eq!(Category::Women.as_str(), "women");
    }
}
