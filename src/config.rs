//! Run configuration
//!
//! One immutable [`ScrapeConfig`] is built at startup and passed explicitly
//! to every stage. There are no CLI flags; the defaults below are the whole
//! operator surface, edited in place when the target site changes.

use std::path::PathBuf;
use std::time::Duration;

/// CSS selector strings, operator-edited if the site structure changes.
///
/// `product_card` defines the product boundary; the remaining selectors are
/// applied inside each card and only their first match is used.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub product_card: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product_card: ".product".to_string(),
            name: ".woocommerce-loop-product__title".to_string(),
            price: ".price".to_string(),
            image: "img".to_string(),
            link: "a".to_string(),
        }
    }
}

/// How downloaded images are named on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageNaming {
    /// Last path segment of the image URL, query string stripped. Distinct
    /// URLs sharing a basename collide; whichever file is on disk wins.
    UrlBasename,
    /// FNV-1a hash of the full image URL, original extension kept.
    /// Collision-free across distinct URLs but changes filenames relative
    /// to `UrlBasename`.
    UrlHash,
}

/// Immutable configuration for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Catalog page URLs, processed in order.
    pub catalog_urls: Vec<String>,
    /// User-Agent sent on every request.
    pub user_agent: String,
    /// Additional header pairs applied to every request.
    pub headers: Vec<(String, String)>,
    /// Output JSON file, overwritten unconditionally at the end of the run.
    pub output_path: PathBuf,
    /// Directory for downloaded images, created if absent.
    pub images_dir: PathBuf,
    /// Fixed sleep between catalog page fetches (not between image fetches).
    pub request_delay: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    pub selectors: SelectorConfig,
    pub image_naming: ImageNaming,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            catalog_urls: vec![
                "https://asclepiuswellness.com/product/wellness-product/".to_string(),
            ],
            user_agent: "Mozilla/5.0 (compatible; AWPLScraper/1.0)".to_string(),
            headers: Vec::new(),
            output_path: PathBuf::from("products.json"),
            images_dir: PathBuf::from("images"),
            request_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            selectors: SelectorConfig::default(),
            image_naming: ImageNaming::UrlBasename,
        }
    }
}
