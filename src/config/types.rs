use serde::Deserialize;
use std::collections::BTreeMap;

/// Extensions treated as downloadable data files
pub const DEFAULT_DATA_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "dot", "xlsx", "xls", "xlt", "xla", "zip", "csv", "docx", "ppt", "pot", "pps",
    "ppa", "pptx", "xlw", "ods",
];

/// URL substrings that disqualify a link from being data
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &["mailto", "aspx", "javascript", "_layouts", "Forms/AllItems"];

/// Main configuration structure for Resource-Scout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub cache: CacheConfig,
    pub classifier: ClassifierConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            headers: BTreeMap::new(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler, also used as the robots.txt product token
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "odgovlt-harvester".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://opendata.gov.lt/".to_string(),
            contact_email: "info@opendata.gov.lt".to_string(),
        }
    }
}

/// Resource cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Age in days after which non-permanent entries are evicted
    #[serde(rename = "retention-days")]
    pub retention_days: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database_path: "cache.db".to_string(),
            retention_days: 30,
        }
    }
}

/// Resource classification policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// File types that count as data
    #[serde(rename = "data-extensions")]
    pub data_extensions: Vec<String>,

    /// A URL containing any of these is never data
    #[serde(rename = "ignore-patterns")]
    pub ignore_patterns: Vec<String>,

    /// Keep entries with an unknown type eligible for eviction so they are
    /// classified again on a later crawl
    #[serde(rename = "retry-unknown")]
    pub retry_unknown: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            data_extensions: DEFAULT_DATA_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
            retry_unknown: true,
        }
    }
}
