//! Resource classification
//!
//! Given the requested URL and the response headers, decide what a linked
//! resource is called, what type of file it is, whether it counts as data for
//! the catalog, and whether its cache entry may live forever.
//!
//! | Derived type            | is_data | cached_forever        |
//! |-------------------------|---------|-----------------------|
//! | none                    | false   | false (retry later)   |
//! | data extension, allowed | true    | false (may change)    |
//! | anything else           | false   | true                  |

mod filename;
mod mime;

pub use filename::{derive_filename, disposition_filename, file_type};
pub use mime::{extension_for_mime, is_generic, is_html, mime_essence};

use crate::config::ClassifierConfig;
use reqwest::header::HeaderMap;
use std::collections::HashSet;
use url::Url;

/// Type recorded when no file type can be derived
pub const UNKNOWN_TYPE: &str = "Unknown extension";

/// Outcome of classifying one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub name: String,
    pub file_type: String,
    pub is_data: bool,
    pub cached_forever: bool,
}

/// Classifies fetched resources according to a [`ClassifierConfig`]
#[derive(Debug, Clone)]
pub struct Classifier {
    data_extensions: HashSet<String>,
    ignore_patterns: Vec<String>,
    retry_unknown: bool,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            data_extensions: config
                .data_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
            ignore_patterns: config
                .ignore_patterns
                .iter()
                .map(|pattern| pattern.to_lowercase())
                .collect(),
            retry_unknown: config.retry_unknown,
        }
    }

    /// Classifies a response for `url` from its headers
    pub fn classify(&self, url: &Url, headers: &HeaderMap) -> Classification {
        self.classify_name(url.as_str(), derive_filename(url, headers))
    }

    /// Classifies a resource whose filename is already known
    pub fn classify_name(&self, url: &str, name: String) -> Classification {
        let Some(file_type) = file_type(&name) else {
            return Classification {
                name,
                file_type: UNKNOWN_TYPE.to_string(),
                is_data: false,
                cached_forever: !self.retry_unknown,
            };
        };

        let is_data = self.data_extensions.contains(&file_type) && !self.is_ignored(url);

        Classification {
            name,
            file_type,
            is_data,
            cached_forever: !is_data,
        }
    }

    /// Returns true if the URL contains one of the ignore patterns
    pub fn is_ignored(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.ignore_patterns
            .iter()
            .any(|pattern| url.contains(pattern.as_str()))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
