//! Storage traits and error types
//!
//! This module defines the trait interface for resource cache backends and
//! associated error types.

use crate::storage::{CacheEntry, Resource};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid timestamp in cache row {id}: {value}")]
    InvalidTimestamp { id: i64, value: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for resource cache implementations
///
/// The (website, url) pair is the natural key. Entries are never updated in
/// place: inserting a pair that is already present is a no-op.
pub trait ResourceCache {
    /// Returns true if an entry exists for the (website, url) pair
    ///
    /// Never fails. If the lookup itself cannot be performed, the pair is
    /// reported as seen so the crawler skips it.
    fn contains(&self, website: &str, url: &str) -> bool;

    /// Inserts a resource unless its (website, url) pair is already cached
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A new row was written, stamped with the current time
    /// * `Ok(false)` - The pair was already cached; nothing was written
    fn insert(&mut self, resource: &Resource) -> StorageResult<bool>;

    /// Deletes entries older than `retention_days` that are not cached forever
    ///
    /// # Returns
    ///
    /// The number of deleted entries
    fn evict(&mut self, retention_days: u32) -> StorageResult<usize>;

    /// Gets the data entries of one website, in insertion order
    fn query_data(&self, website: &str) -> StorageResult<Vec<CacheEntry>>;

    /// Gets all entries, optionally restricted to one website
    fn query_all(&self, website: Option<&str>) -> StorageResult<Vec<CacheEntry>>;

    /// Gets the data entries of every website, in insertion order
    fn query_all_data(&self) -> StorageResult<Vec<CacheEntry>>;
}
