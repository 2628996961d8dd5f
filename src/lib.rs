//! Catalog product scraper
//!
//! Fetches a configured list of catalog pages, extracts product fields
//! (name, price, image URL, product URL) via CSS selectors, downloads the
//! product images, and writes all records to a single JSON file. One
//! sequential pass per invocation; the only cross-run state is the
//! file-existence check used as the image cache.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod images;
pub mod pipeline;

pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use extract::ProductRecord;
