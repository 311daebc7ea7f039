//! Database schema definitions
//!
//! This module contains the SQL schema of the resource cache.

use rusqlite::{params, Connection};

/// Name of the cache table
pub const DATA_TABLE: &str = "data";

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per resource discovered from a seed page
CREATE TABLE IF NOT EXISTS data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    website TEXT NOT NULL,
    url TEXT NOT NULL,
    name TEXT NOT NULL,
    date_accessed TEXT NOT NULL,
    is_data INTEGER NOT NULL DEFAULT 0,
    type TEXT NOT NULL,
    cached_forever INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_data_website_url ON data(website, url);
CREATE INDEX IF NOT EXISTS idx_data_date_accessed ON data(date_accessed);
"#;

/// Initializes the database schema
///
/// An existing `data` table is expected on every run after the first and is
/// left untouched.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    if table_exists(conn, DATA_TABLE)? {
        tracing::debug!("Table '{}' already exists", DATA_TABLE);
    }
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns true if a table with the given name exists
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, rusqlite::Error> {
    conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?
        .exists(params![name])
}
