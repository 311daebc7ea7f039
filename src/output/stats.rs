//! Statistics generation from the resource cache
//!
//! This module provides functionality for extracting and displaying
//! cache statistics from the storage layer.

use crate::classify::UNKNOWN_TYPE;
use crate::storage::{CacheEntry, ResourceCache};
use crate::ScoutError;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

/// Cache statistics summary
#[derive(Debug, Clone, Default)]
pub struct CacheStatistics {
    /// Total number of cached resources
    pub total_entries: u64,

    /// Resources flagged as data
    pub data_entries: u64,

    /// Resources exempt from eviction
    pub cached_forever: u64,

    /// Resources whose type could not be derived
    pub unknown_type: u64,

    /// Number of distinct websites
    pub websites: u64,

    /// Count of resources by type
    pub entries_by_type: HashMap<String, u64>,

    /// Oldest access date
    pub oldest: Option<DateTime<Utc>>,

    /// Newest access date
    pub newest: Option<DateTime<Utc>>,
}

impl CacheStatistics {
    /// Computes statistics over a set of cache entries
    pub fn from_entries(entries: &[CacheEntry]) -> Self {
        let mut stats = CacheStatistics::default();
        let mut websites = BTreeSet::new();

        for entry in entries {
            stats.total_entries += 1;
            if entry.is_data {
                stats.data_entries += 1;
            }
            if entry.cached_forever {
                stats.cached_forever += 1;
            }
            if entry.file_type == UNKNOWN_TYPE {
                stats.unknown_type += 1;
            }
            websites.insert(entry.website.as_str());
            *stats
                .entries_by_type
                .entry(entry.file_type.clone())
                .or_insert(0) += 1;

            stats.oldest = Some(match stats.oldest {
                Some(oldest) => oldest.min(entry.date_accessed),
                None => entry.date_accessed,
            });
            stats.newest = Some(match stats.newest {
                Some(newest) => newest.max(entry.date_accessed),
                None => entry.date_accessed,
            });
        }

        stats.websites = websites.len() as u64;
        stats
    }
}

/// Loads statistics from the cache
///
/// # Returns
///
/// * `Ok(CacheStatistics)` - Successfully loaded statistics
/// * `Err(ScoutError)` - Failed to query the cache
pub fn load_statistics(cache: &dyn ResourceCache) -> Result<CacheStatistics, ScoutError> {
    let entries = cache.query_all(None)?;
    Ok(CacheStatistics::from_entries(&entries))
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CacheStatistics) {
    println!("=== Cache Statistics ===\n");

    println!("Overview:");
    println!("  Total resources: {}", stats.total_entries);
    println!("  Websites: {}", stats.websites);
    println!("  Data resources: {}", stats.data_entries);
    println!("  Cached forever: {}", stats.cached_forever);
    println!("  Unknown type: {}", stats.unknown_type);
    println!();

    if !stats.entries_by_type.is_empty() {
        println!("Resources by Type:");
        // Sort types by count (descending), then name
        let mut type_counts: Vec<_> = stats.entries_by_type.iter().collect();
        type_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (file_type, count) in type_counts {
            let percentage = (*count as f64 / stats.total_entries as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", file_type, count, percentage);
        }
        println!();
    }

    if let (Some(oldest), Some(newest)) = (stats.oldest, stats.newest) {
        println!("Accessed between {} and {}", oldest, newest);
    }
}
