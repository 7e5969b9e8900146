use agency_site_renderer::catalog::{Category, ModelCollection};
use agency_site_renderer::config::Config;
use agency_site_renderer::dispatcher::{self, Page, RenderedPage};
use agency_site_renderer::fetch::{fetch_json, MODELS_PATH};
use agency_site_renderer::storage::SqliteStore;
use anyhow::{Context, Result};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agency_site_renderer=info".parse()?),
        )
        .init();

    info!("Starting site render");

    // Load configuration from environment
    let config = Config::from_env()?;
    let store = SqliteStore::open(&config.store_path)?;
    let client = reqwest::Client::new();

    std::fs::create_dir_all(&config.output_dir)
        .context(format!("Failed to create {}", config.output_dir))?;

    // Static pages
    for page in [
        Page::Home,
        Page::Grid(Category::Men),
        Page::Grid(Category::Women),
        Page::Events,
    ] {
        let rendered = dispatcher::render(&client, &config, &store, page, "").await;
        write_page(&config.output_dir, page.file_name(), &rendered)?;
    }

    // One portfolio document per model id
    match fetch_json::<ModelCollection>(&client, &config.data_url, MODELS_PATH).await {
        Ok(collection) => {
            for model in &collection.models {
                let query = format!("id={}", model.id);
                let rendered =
                    dispatcher::render(&client, &config, &store, Page::Portfolio, &query).await;
                write_page(
                    &config.output_dir,
                    &format!("portfolio-{}.html", model.id),
                    &rendered,
                )?;
            }
        }
        Err(e) => warn!("Skipping portfolio pages: {:#}", e),
    }

    info!("✓ Site rendered to {}", config.output_dir);
    Ok(())
}

fn write_page(output_dir: &str, file_name: &str, rendered: &RenderedPage) -> Result<()> {
    let path = std::path::Path::new(output_dir).join(file_name);
    std::fs::write(&path, rendered.to_html())
        .context(format!("Failed to write {}", path.display()))?;
    info!("Rendered {}", path.display());
    Ok(())
}
