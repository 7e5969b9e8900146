//! Fetching of the site's static JSON documents.
//!
//! Every loader goes through the one routine here: GET, status check,
//! deserialize. There is no retry and no timeout beyond the client's own —
//! a fetch either succeeds or fails the whole loader, which renders its
//! error paragraph.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Path of the model collection, relative to the data base URL.
pub const MODELS_PATH: &str = "models/models.json";

/// Path of the translation dictionary.
pub const TRANSLATIONS_PATH: &str = "translations.json";

/// Path of the event collection.
pub const EVENTS_PATH: &str = "data/events.json";

/// Fetch and deserialize one static JSON document.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> Result<T> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), path);
    debug!("Fetching {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .context(format!("Failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Fetch failed for {}: HTTP {}", url, status);
    }

    response
        .json::<T>()
        .await
        .context(format!("Failed to parse JSON from {}", url))
}
