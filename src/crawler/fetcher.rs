//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and extra headers
//! - GET requests with the configured per-request timeout
//! - Error classification (timeout, transport, HTTP status)

use crate::config::{Config, UserAgentConfig};
use crate::{ConfigError, ScoutError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Formats the User-Agent header value
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use resource_scout::config::Config;
/// use resource_scout::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, ScoutError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.crawler.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ConfigError::Validation(format!("Invalid header name '{}': {}", name, e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            ConfigError::Validation(format!("Invalid value for header '{}': {}", name, e))
        })?;
        headers.insert(name, value);
    }

    let client = Client::builder()
        .user_agent(user_agent_string(&config.user_agent))
        .default_headers(headers)
        .timeout(Duration::from_secs(config.crawler.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Sends a GET request and checks the response status
///
/// Only the status line and headers have been received when this returns;
/// the body is read (or discarded) by the caller. Dropping the response
/// releases the connection.
///
/// # Returns
///
/// * `Ok(Response)` - 2xx response
/// * `Err(ScoutError::Timeout)` - The request timed out
/// * `Err(ScoutError::Status)` - Non-success HTTP status
/// * `Err(ScoutError::Http)` - Any other transport failure
pub async fn fetch(client: &Client, url: &Url) -> Result<Response, ScoutError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScoutError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

fn classify_error(url: &Url, error: reqwest::Error) -> ScoutError {
    if error.is_timeout() {
        ScoutError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScoutError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
