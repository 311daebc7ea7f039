//! URL handling module for Resource-Scout
//!
//! Seed parsing, host and "top-level domain" extraction, and the small path
//! helpers used when naming discovered files.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

pub use domain::{extract_domain, top_level_domain};

/// Parses a seed URL and checks that it can be crawled
///
/// Only `http` and `https` URLs with a host are accepted.
///
/// # Examples
///
/// ```
/// use resource_scout::url::parse_seed;
///
/// assert!(parse_seed("http://data.gov.lt/page").is_ok());
/// assert!(parse_seed("ftp://data.gov.lt/file.csv").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns the last segment of the URL path, or an empty string for `/`
pub fn path_basename(url: &Url) -> String {
    url.path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Returns the robots.txt location for the host of `url`
pub fn robots_url(url: &Url) -> Option<Url> {
    url.host_str()?;
    url.join("/robots.txt").ok()
}
