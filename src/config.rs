use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the static JSON documents are served from.
    pub data_url: String,

    /// Directory the rendered pages are written to.
    pub output_dir: String,

    /// Path of the SQLite preference store.
    pub store_path: String,

    /// Explicit language switch applied before rendering, if any.
    pub language_override: Option<String>,

    /// The environment's reported locale, consulted when no preference is
    /// stored.
    pub system_locale: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            data_url: std::env::var("SITE_DATA_URL").context("SITE_DATA_URL not set")?,

            output_dir: std::env::var("SITE_OUTPUT_DIR")
                .unwrap_or_else(|_| "site-out".to_string()),

            store_path: std::env::var("SITE_DB").unwrap_or_else(|_| "site.db".to_string()),

            language_override: std::env::var("SITE_LANGUAGE").ok(),

            system_locale: std::env::var("LANG").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_fields_are_plain_data() {
        let config = Config {
            data_url: "http://localhost:8080".to_string(),
            output_dir: "site-out".to_string(),
            store_path: "site.db".to_string(),
            language_override: None,
            system_locale: Some("es-PE".to_string()),
        };

        let cloned = config.clone();
        assert_eq!(cloned.data_url, config.data_url);
        assert_eq!(cloned.system_locale.as_deref(), Some("es-PE"));
    }
}
