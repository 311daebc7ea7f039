//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ResourceCache trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ResourceCache, StorageError, StorageResult};
use crate::storage::{CacheEntry, Resource};
use crate::ScoutError;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

const SELECT_COLUMNS: &str =
    "SELECT id, website, url, name, date_accessed, is_data, type, cached_forever FROM data";

/// SQLite resource cache
///
/// Owns its connection; crawler and updater borrow it for the duration of a
/// crawl.
pub struct SqliteCache {
    conn: Connection,
}

/// A `data` row before its timestamp is parsed
struct RawEntry {
    id: i64,
    website: String,
    url: String,
    name: String,
    date_accessed: String,
    is_data: bool,
    file_type: String,
    cached_forever: bool,
}

impl RawEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            website: row.get(1)?,
            url: row.get(2)?,
            name: row.get(3)?,
            date_accessed: row.get(4)?,
            is_data: row.get(5)?,
            file_type: row.get(6)?,
            cached_forever: row.get(7)?,
        })
    }

    fn into_entry(self) -> StorageResult<CacheEntry> {
        let date_accessed = DateTime::parse_from_rfc3339(&self.date_accessed)
            .map_err(|_| StorageError::InvalidTimestamp {
                id: self.id,
                value: self.date_accessed.clone(),
            })?
            .with_timezone(&Utc);

        Ok(CacheEntry {
            id: self.id,
            website: self.website,
            url: self.url,
            name: self.name,
            file_type: self.file_type,
            is_data: self.is_data,
            cached_forever: self.cached_forever,
            date_accessed,
        })
    }
}

/// Formats timestamps so that text order in SQLite matches time order
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl SqliteCache {
    /// Opens or creates the cache database at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteCache)` - Successfully opened/created database
    /// * `Err(ScoutError)` - Failed to open database
    pub fn open(path: &Path) -> Result<Self, ScoutError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened resource cache at {}", path.display());
        Ok(Self { conn })
    }

    /// Creates a throwaway in-memory cache
    pub fn open_in_memory() -> Result<Self, ScoutError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Inserts `resource` with an explicit access time
    fn insert_accessed_at(
        &mut self,
        resource: &Resource,
        accessed_at: DateTime<Utc>,
    ) -> StorageResult<bool> {
        if self.contains(&resource.website, &resource.url) {
            tracing::debug!("Already cached: {} ({})", resource.url, resource.website);
            return Ok(false);
        }

        self.conn.execute(
            "INSERT INTO data (website, url, name, date_accessed, is_data, type, cached_forever)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                resource.website,
                resource.url,
                resource.name,
                format_timestamp(accessed_at),
                resource.is_data,
                resource.file_type,
                resource.cached_forever,
            ],
        )?;

        Ok(true)
    }

    fn query_entries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StorageResult<Vec<CacheEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let raw = stmt
            .query_map(params, RawEntry::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter().map(RawEntry::into_entry).collect()
    }
}

impl ResourceCache for SqliteCache {
    fn contains(&self, website: &str, url: &str) -> bool {
        let mut stmt = match self
            .conn
            .prepare_cached("SELECT 1 FROM data WHERE website = ?1 AND url = ?2 LIMIT 1")
        {
            Ok(stmt) => stmt,
            Err(e) => {
                tracing::error!("Failed to prepare cache lookup, treating {} as seen: {}", url, e);
                return true;
            }
        };

        match stmt.exists(params![website, url]) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Cache lookup failed, treating {} as seen: {}", url, e);
                true
            }
        }
    }

    fn insert(&mut self, resource: &Resource) -> StorageResult<bool> {
        self.insert_accessed_at(resource, Utc::now())
    }

    fn evict(&mut self, retention_days: u32) -> StorageResult<usize> {
        let cutoff = Utc::now() - Duration::days(i64::from(retention_days));
        let removed = self.conn.execute(
            "DELETE FROM data WHERE date_accessed < ?1 AND cached_forever = 0",
            params![format_timestamp(cutoff)],
        )?;

        tracing::info!(
            "Evicted {} cache entries older than {} days",
            removed,
            retention_days
        );
        Ok(removed)
    }

    fn query_data(&self, website: &str) -> StorageResult<Vec<CacheEntry>> {
        self.query_entries(
            &format!("{} WHERE website = ?1 AND is_data = 1 ORDER BY id", SELECT_COLUMNS),
            params![website],
        )
    }

    fn query_all(&self, website: Option<&str>) -> StorageResult<Vec<CacheEntry>> {
        match website {
            Some(website) => self.query_entries(
                &format!("{} WHERE website = ?1 ORDER BY id", SELECT_COLUMNS),
                params![website],
            ),
            None => self.query_entries(&format!("{} ORDER BY id", SELECT_COLUMNS), []),
        }
    }

    fn query_all_data(&self) -> StorageResult<Vec<CacheEntry>> {
        self.query_entries(
            &format!("{} WHERE is_data = 1 ORDER BY id", SELECT_COLUMNS),
            [],
        )
    }
}
