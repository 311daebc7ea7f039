//! Configuration module for Resource-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the harvester defaults.
//!
//! # Example
//!
//! ```no_run
//! use resource_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, ClassifierConfig, Config, CrawlerConfig, UserAgentConfig,
    DEFAULT_DATA_EXTENSIONS, DEFAULT_IGNORE_PATTERNS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{is_valid_file_type, validate};
