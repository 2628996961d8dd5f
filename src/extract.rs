//! CSS selector-based product extraction
//!
//! Uses the scraper crate to select product cards and pull fields out of
//! each one. A sub-selector matching nothing is a `None` field, not an
//! error; the only per-card failure is a link or image URL that cannot be
//! resolved against the page URL, and that skips the offending card only.

use std::path::PathBuf;

use log::warn;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SelectorConfig;
use crate::error::ScrapeError;

/// One extracted catalog entry. Every field is optional: a selector that
/// matched nothing leaves the field null in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: Option<String>,
    pub price: Option<String>,
    /// Absolute image URL, resolved against the catalog page URL.
    pub image_url: Option<String>,
    /// Local path the image was saved to, filled in by the pipeline.
    pub image_path: Option<PathBuf>,
    /// Absolute product detail page URL.
    pub product_url: Option<String>,
}

/// Selector strings compiled once per run.
pub struct Selectors {
    pub card: Selector,
    pub name: Selector,
    pub price: Selector,
    pub image: Selector,
    pub link: Selector,
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            card: compile_one(&config.product_card)?,
            name: compile_one(&config.name)?,
            price: compile_one(&config.price)?,
            image: compile_one(&config.image)?,
            link: compile_one(&config.link)?,
        })
    }
}

fn compile_one(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Extract all product records from a catalog page, in document order.
///
/// Zero matching cards is not an error; the result is just empty. A card
/// whose image or link URL fails to resolve is logged and skipped without
/// affecting the remaining cards.
pub fn extract_products(html: &str, base: &Url, selectors: &Selectors) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for card in document.select(&selectors.card) {
        match extract_card(card, base, selectors) {
            Ok(record) => records.push(record),
            Err(e) => warn!("failed to parse product card: {e}"),
        }
    }

    records
}

fn extract_card(
    card: ElementRef<'_>,
    base: &Url,
    selectors: &Selectors,
) -> Result<ProductRecord, ScrapeError> {
    let name = first_text(card, &selectors.name);
    let price = first_text(card, &selectors.price);

    let image_url = first_attr(card, &selectors.image, "src")
        .map(|src| resolve(base, &src))
        .transpose()?;
    let product_url = first_attr(card, &selectors.link, "href")
        .map(|href| resolve(base, &href))
        .transpose()?;

    Ok(ProductRecord {
        name,
        price,
        image_url,
        image_path: None,
        product_url,
    })
}

/// First matching element's text, whitespace-trimmed.
fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// First matching element's attribute. An element without the attribute
/// counts as no match.
fn first_attr(card: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr).map(String::from))
}

/// Resolve a possibly-relative URL against the catalog page URL.
fn resolve(base: &Url, candidate: &str) -> Result<String, ScrapeError> {
    base.join(candidate)
        .map(|resolved| resolved.to_string())
        .map_err(|source| ScrapeError::Url {
            url: candidate.to_string(),
            source,
        })
}
