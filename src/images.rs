//! Image retrieval with a filename-keyed cache
//!
//! The cache is nothing more than a file-existence check on the derived
//! filename: if the target file is already on disk the download is skipped
//! entirely. The filename policy is configurable; the default reproduces
//! the basename-of-URL behavior, collisions included.

use std::fs;
use std::hash::Hasher;
use std::path::PathBuf;

use fnv::FnvHasher;
use log::debug;
use ureq::Agent;
use url::Url;

use crate::config::{ImageNaming, ScrapeConfig};
use crate::error::ScrapeError;
use crate::fetch;

/// Download an image to the configured directory and return its local path.
///
/// Creates the directory if absent. If a file with the derived name already
/// exists, returns its path without touching the network.
pub fn retrieve(
    agent: &Agent,
    image_url: &str,
    config: &ScrapeConfig,
) -> Result<PathBuf, ScrapeError> {
    fs::create_dir_all(&config.images_dir)?;

    let filename = derive_filename(image_url, config.image_naming)?;
    let path = config.images_dir.join(filename);

    if path.exists() {
        debug!("image already cached: {}", path.display());
        return Ok(path);
    }

    let bytes = fetch::fetch_bytes(agent, image_url, config)?;
    fs::write(&path, bytes)?;
    debug!("saved image {image_url} to {}", path.display());

    Ok(path)
}

/// Derive the on-disk filename for an image URL.
fn derive_filename(image_url: &str, naming: ImageNaming) -> Result<String, ScrapeError> {
    let parsed = Url::parse(image_url).map_err(|source| ScrapeError::Url {
        url: image_url.to_string(),
        source,
    })?;

    // Query string is never part of the URL path, so "photo.jpg?v=2"
    // yields "photo.jpg".
    let basename = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("")
        .to_string();

    match naming {
        ImageNaming::UrlBasename => {
            if basename.is_empty() {
                return Err(ScrapeError::ImageFilename {
                    url: image_url.to_string(),
                });
            }
            Ok(basename)
        }
        ImageNaming::UrlHash => {
            let mut hasher = FnvHasher::default();
            hasher.write(image_url.as_bytes());
            let digest = hasher.finish();

            Ok(match basename.rsplit_once('.') {
                Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                    format!("{digest:016x}.{ext}")
                }
                _ => format!("{digest:016x}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn basename_strips_query_string() {
        let name =
            derive_filename("https://site.com/img/photo.jpg?v=2", ImageNaming::UrlBasename)
                .unwrap();
        assert_eq!(name, "photo.jpg");
    }

    #[test]
    fn basename_uses_last_path_segment() {
        let name =
            derive_filename("https://site.com/a/b/c.png", ImageNaming::UrlBasename).unwrap();
        assert_eq!(name, "c.png");
    }

    #[test]
    fn basename_rejects_trailing_slash() {
        match derive_filename("https://site.com/img/", ImageNaming::UrlBasename) {
            Err(ScrapeError::ImageFilename { .. }) => {}
            other => panic!("expected filename error, got {other:?}"),
        }
    }

    #[test]
    fn hash_naming_is_stable_and_keeps_extension() {
        let first = derive_filename("https://site.com/img/photo.jpg", ImageNaming::UrlHash).unwrap();
        let second =
            derive_filename("https://site.com/img/photo.jpg", ImageNaming::UrlHash).unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with(".jpg"));
    }

    #[test]
    fn hash_naming_separates_colliding_basenames() {
        let a = derive_filename("https://site.com/red/photo.jpg", ImageNaming::UrlHash).unwrap();
        let b = derive_filename("https://site.com/blue/photo.jpg", ImageNaming::UrlHash).unwrap();
        assert_ne!(a, b);

        // The legacy policy collides on purpose.
        let a = derive_filename("https://site.com/red/photo.jpg", ImageNaming::UrlBasename).unwrap();
        let b =
            derive_filename("https://site.com/blue/photo.jpg", ImageNaming::UrlBasename).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cached_image_is_returned_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            images_dir: dir.path().join("images"),
            timeout: Duration::from_secs(1),
            ..ScrapeConfig::default()
        };

        fs::create_dir_all(&config.images_dir).unwrap();
        let cached = config.images_dir.join("photo.jpg");
        fs::write(&cached, b"cached bytes").unwrap();

        // Nothing listens on port 1; any network attempt would fail the call.
        let agent = fetch::build_agent(&config);
        let path = retrieve(&agent, "http://127.0.0.1:1/img/photo.jpg", &config).unwrap();

        assert_eq!(path, cached);
        assert_eq!(fs::read(&path).unwrap(), b"cached bytes");
    }

    #[test]
    fn cache_miss_on_dead_endpoint_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            images_dir: dir.path().to_path_buf(),
            timeout: Duration::from_secs(1),
            ..ScrapeConfig::default()
        };

        let agent = fetch::build_agent(&config);
        let result = retrieve(&agent, "http://127.0.0.1:1/img/photo.jpg", &config);
        assert!(result.is_err());
    }
}
