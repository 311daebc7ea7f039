//! Cache updater
//!
//! Runs a discovery for one seed page to completion and stores everything it
//! found. Re-running on a fully cached seed fetches the seed page again but
//! every insert is a no-op.

use crate::crawler::Crawler;
use crate::storage::ResourceCache;

/// Outcome of one [`refresh`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Resources yielded by the discovery
    pub discovered: usize,
    /// Rows written
    pub inserted: usize,
    /// Resources whose (website, url) pair was already cached
    pub skipped: usize,
    /// Resources whose insert failed
    pub failed: usize,
}

/// Discovers the resources of `base_url` and inserts them into `cache`
///
/// Links already cached for `base_url` are not fetched. Insert failures are
/// logged and do not stop the batch.
pub async fn refresh(
    crawler: &Crawler,
    cache: &mut dyn ResourceCache,
    base_url: &str,
) -> RefreshSummary {
    let resources = crawler.discover(Some(&*cache), base_url).collect().await;

    let mut summary = RefreshSummary {
        discovered: resources.len(),
        ..RefreshSummary::default()
    };

    for resource in &resources {
        match cache.insert(resource) {
            Ok(true) => summary.inserted += 1,
            Ok(false) => {
                tracing::debug!("Already cached: {}", resource.url);
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::error!("Failed to cache {}: {}", resource.url, e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Refreshed {}: {} discovered, {} inserted, {} already cached, {} failed",
        base_url,
        summary.discovered,
        summary.inserted,
        summary.skipped,
        summary.failed
    );

    summary
}
