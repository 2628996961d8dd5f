//! The run loop: fetch, extract, download, persist
//!
//! Catalog URLs are processed strictly in order, each to completion
//! (including its image downloads) before the next fetch, with a fixed
//! delay in between. Catalog and image fetch failures propagate and abort
//! the run before any output is written; only per-card extraction failures
//! are isolated, inside the extractor.

use std::fs;
use std::thread;

use log::{debug, info};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extract::{self, ProductRecord, Selectors};
use crate::fetch;
use crate::images;

/// Run the whole pipeline and return the number of records written.
pub fn run(config: &ScrapeConfig) -> Result<usize, ScrapeError> {
    let selectors = Selectors::compile(&config.selectors)?;
    let agent = fetch::build_agent(config);
    let mut products: Vec<ProductRecord> = Vec::new();

    for catalog_url in &config.catalog_urls {
        info!("scraping {catalog_url}");
        let base = Url::parse(catalog_url).map_err(|source| ScrapeError::Url {
            url: catalog_url.clone(),
            source,
        })?;

        let html = fetch::fetch_page(&agent, catalog_url, config)?;
        let mut records = extract::extract_products(&html, &base, &selectors);

        for record in &mut records {
            let image_url = record.image_url.clone();
            if let Some(image_url) = image_url {
                record.image_path = Some(images::retrieve(&agent, &image_url, config)?);
            }
        }

        debug!("extracted {} products from {catalog_url}", records.len());
        products.extend(records);

        thread::sleep(config.request_delay);
    }

    let json = serde_json::to_string_pretty(&products)?;
    fs::write(&config.output_path, json)?;
    info!(
        "saved {} products to {}",
        products.len(),
        config.output_path.display()
    );

    Ok(products.len())
}
