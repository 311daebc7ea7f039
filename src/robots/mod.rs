//! Robots.txt handling module
//!
//! robots.txt is fetched once per seed host. A missing file means "allow all";
//! transport failures are reported to the caller, which treats them the same way.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::fetch;
use crate::url::robots_url;
use crate::ScoutError;
use reqwest::Client;
use url::Url;

/// Fetches robots.txt for the host of `base`
///
/// # Returns
///
/// * `Ok(Some(ParsedRobots))` - robots.txt was fetched and parsed
/// * `Ok(None)` - the host has no robots.txt (non-success status or no host)
/// * `Err(ScoutError)` - robots.txt could not be fetched
pub async fn fetch_robots(client: &Client, base: &Url) -> Result<Option<ParsedRobots>, ScoutError> {
    let Some(location) = robots_url(base) else {
        return Ok(None);
    };

    let response = match fetch(client, &location).await {
        Ok(response) => response,
        Err(ScoutError::Status { status, .. }) => {
            tracing::debug!("No robots.txt at {} (HTTP {})", location, status);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let body = response.text().await.map_err(|source| ScoutError::Http {
        url: location.to_string(),
        source,
    })?;

    Ok(Some(ParsedRobots::from_content(&body)))
}

/// Checks if a URL is allowed by robots.txt
pub fn is_allowed(robots: &ParsedRobots, url: &str, user_agent: &str) -> bool {
    robots.is_allowed(url, user_agent)
}
