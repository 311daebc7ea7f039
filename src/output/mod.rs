//! Output module for presenting cached resources
//!
//! This module handles:
//! - Mapping data entries to CKAN package resources
//! - Rendering entries as text lines or JSON
//! - Cache statistics

pub mod stats;

pub use stats::{load_statistics, print_statistics, CacheStatistics};

use crate::storage::{CacheEntry, ResourceCache};
use crate::ScoutError;
use serde::Serialize;

/// A resource entry as attached to a CKAN package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CkanResource {
    pub url: String,
    pub name: String,
    pub format: String,
}

impl From<&CacheEntry> for CkanResource {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            url: entry.url.clone(),
            name: entry.name.clone(),
            format: entry.file_type.clone(),
        }
    }
}

/// Gets the data resources of a website in CKAN form
///
/// # Returns
///
/// * `Ok(Vec<CkanResource>)` - One resource per data entry, in insertion order
/// * `Err(ScoutError)` - Failed to query the cache
pub fn ckan_resources(
    cache: &dyn ResourceCache,
    website: &str,
) -> Result<Vec<CkanResource>, ScoutError> {
    let entries = cache.query_data(website)?;
    Ok(entries.iter().map(CkanResource::from).collect())
}

/// Formats one entry as an aligned text line
pub fn format_resource_line(entry: &CacheEntry) -> String {
    format!("  {:<10}  {:<40}  {}", entry.file_type, entry.name, entry.url)
}

/// Renders CKAN resources as pretty-printed JSON
pub fn render_json(resources: &[CkanResource]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(resources)
}

/// Prints the data resources of a website to stdout
///
/// # Arguments
///
/// * `cache` - The cache to read from
/// * `website` - Website key
/// * `json` - Print a JSON array of CKAN resources instead of text lines
pub fn print_resources(
    cache: &dyn ResourceCache,
    website: &str,
    json: bool,
) -> Result<(), ScoutError> {
    if json {
        let resources = ckan_resources(cache, website)?;
        println!("{}", render_json(&resources)?);
    } else {
        for entry in cache.query_data(website)? {
            println!("{}", format_resource_line(&entry));
        }
    }
    Ok(())
}
