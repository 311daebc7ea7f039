//! Storage module for the resource cache
//!
//! This module persists every resource discovered from a seed page in the
//! SQLite table `data`, keyed by the (website, url) pair:
//! - deduplicated inserts (a seen pair is never written twice)
//! - lookups of the "data" resources of one website
//! - age-based eviction that spares entries cached forever

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteCache;
pub use traits::{ResourceCache, StorageError, StorageResult};

use crate::classify::Classification;
use crate::ScoutError;
use chrono::{DateTime, Utc};
use serde::Serialize;

use std::path::Path;

/// Opens (creating if needed) the resource cache database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteCache)` - Successfully opened cache
/// * `Err(ScoutError)` - Failed to open or initialize the database
pub fn open_cache(path: &Path) -> Result<SqliteCache, ScoutError> {
    SqliteCache::open(path)
}

/// A classified resource discovered from a seed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// The seed URL the resource was discovered from
    pub website: String,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub is_data: bool,
    pub cached_forever: bool,
}

impl Resource {
    /// Builds a resource from a classification outcome
    pub fn new(website: &str, url: &str, classification: Classification) -> Self {
        Self {
            website: website.to_string(),
            url: url.to_string(),
            name: classification.name,
            file_type: classification.file_type,
            is_data: classification.is_data,
            cached_forever: classification.cached_forever,
        }
    }
}

/// Represents a row of the `data` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry {
    pub id: i64,
    pub website: String,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub is_data: bool,
    pub cached_forever: bool,
    pub date_accessed: DateTime<Utc>,
}

impl From<CacheEntry> for Resource {
    fn from(entry: CacheEntry) -> Self {
        Self {
            website: entry.website,
            url: entry.url,
            name: entry.name,
            file_type: entry.file_type,
            is_data: entry.is_data,
            cached_forever: entry.cached_forever,
        }
    }
}
