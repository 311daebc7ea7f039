//! Crawler module for resource discovery
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching with the configured user agent and timeout
//! - HTML parsing and link extraction
//! - The per-seed link policy (scheme, domain, robots.txt, cache)
//! - Lazy discovery of the resources linked from a seed page

mod discovery;
mod fetcher;
mod parser;
mod policy;

pub use discovery::{Crawler, Discovery};
pub use fetcher::{build_http_client, fetch, user_agent_string};
pub use parser::extract_links;
pub use policy::{PolicyGate, Rejection};

use crate::config::Config;
use crate::storage::{Resource, ResourceCache};
use crate::ScoutError;

/// Discovers every resource of one seed page
///
/// Convenience wrapper that builds a [`Crawler`] and drains its
/// [`Discovery`].
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `cache` - Optional cache; links already cached for `base_url` are skipped
/// * `base_url` - The seed page, also used as the website key
///
/// # Returns
///
/// * `Ok(Vec<Resource>)` - The resources, in link order
/// * `Err(ScoutError)` - The HTTP client could not be built
pub async fn discover_resources(
    config: &Config,
    cache: Option<&dyn ResourceCache>,
    base_url: &str,
) -> Result<Vec<Resource>, ScoutError> {
    let crawler = Crawler::new(config)?;
    Ok(crawler.discover(cache, base_url).collect().await)
}
