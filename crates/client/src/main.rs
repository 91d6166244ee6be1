//! `storefront`: load the catalog, apply persisted and overridden filters, print one page.

use std::sync::Arc;

use anyhow::Context;

use storefront_catalog::fixtures::seed_products;
use storefront_catalog::{FilterState, FilterStore};
use storefront_client::{
    ClientConfig, FILTERS_KEY, ProductLoader, RunOverrides, SqliteStore, StaticSource, load_or_default,
    save,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ClientConfig::from_env()?;
    let overrides = RunOverrides::from_env()?;
    tracing::info!(state_db = %config.state_db.display(), page_size = config.page_size, "starting storefront");

    let store = SqliteStore::open(&config.state_db)
        .await
        .with_context(|| format!("failed to open state database {}", config.state_db.display()))?;

    let persisted: FilterState = load_or_default(&store, FILTERS_KEY).await;

    let loader = ProductLoader::new(Arc::new(StaticSource::new(seed_products())));
    let catalog = loader.load().await.into_result().context("failed to load products")?;

    let mut view = FilterStore::new(catalog, config.page_size)?;
    view.set_filters(overrides.apply(&persisted));

    if let Some(page) = overrides.page {
        if !view.set_page(page) {
            tracing::warn!(page, total_pages = view.descriptor().total_pages, "requested page does not exist; staying on page 1");
        }
    }

    let output = view.current();
    println!("{}", serde_json::to_string_pretty(&output)?);

    // Overrides are per-run; only the loaded (and validated) filters go back.
    save(&store, FILTERS_KEY, &persisted)
        .await
        .context("failed to persist filters")?;

    Ok(())
}
