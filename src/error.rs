//! Error types
//!
//! Expected absences (a sub-selector matching nothing inside a card) are
//! `Option`, never errors. Everything here is a genuine failure: the caller
//! decides whether to propagate or isolate it.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Non-2xx response to a catalog or image request.
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Transport or timeout failure during a request.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// A configured selector string did not parse. Detected before any
    /// network traffic.
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The image URL path has no usable final segment to name the file by.
    #[error("cannot derive an image filename from {url}")]
    ImageFilename { url: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
