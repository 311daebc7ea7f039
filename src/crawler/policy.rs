//! Link admission policy
//!
//! A [`PolicyGate`] is built once per seed page and decides which of the
//! page's links are fetched. Rules are checked in order and the first failing
//! rule rejects the link:
//!
//! 1. the scheme is `http` or `https`
//! 2. the link shares the seed's top-level domain
//! 3. robots.txt of the seed host allows it
//! 4. the (website, url) pair is not cached yet
//!
//! The seed itself is checked against rules 1-3 only: it is fetched on every
//! run, even when a self-link put it in the cache.

use crate::robots::{self, ParsedRobots};
use crate::storage::ResourceCache;
use crate::url::top_level_domain;
use reqwest::Client;
use std::fmt;
use url::Url;

/// Why a link was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Scheme,
    ForeignDomain,
    Robots,
    Cached,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Scheme => "unsupported scheme",
            Rejection::ForeignDomain => "outside the seed domain",
            Rejection::Robots => "disallowed by robots.txt",
            Rejection::Cached => "already cached",
        };
        f.write_str(reason)
    }
}

/// Per-seed link filter
pub struct PolicyGate<'a> {
    website: String,
    tld: Option<String>,
    robots: Option<ParsedRobots>,
    agent: String,
    cache: Option<&'a dyn ResourceCache>,
}

impl<'a> PolicyGate<'a> {
    /// Creates a gate without robots.txt rules
    ///
    /// # Arguments
    ///
    /// * `website` - Cache key of the seed, as given by the caller
    /// * `base` - Parsed seed URL
    /// * `agent` - robots.txt product token
    /// * `cache` - Cache consulted by rule 4; `None` admits everything
    pub fn new(
        website: &str,
        base: &Url,
        agent: &str,
        cache: Option<&'a dyn ResourceCache>,
    ) -> Self {
        Self {
            website: website.to_string(),
            tld: top_level_domain(base),
            robots: None,
            agent: agent.to_string(),
            cache,
        }
    }

    /// Sets the robots.txt rules of the seed host
    pub fn with_robots(mut self, robots: Option<ParsedRobots>) -> Self {
        self.robots = robots;
        self
    }

    /// Creates a gate and loads robots.txt for the seed host
    ///
    /// robots.txt is best effort: if it cannot be fetched, every link passes
    /// rule 3.
    pub async fn load(
        client: &Client,
        website: &str,
        base: &Url,
        agent: &str,
        cache: Option<&'a dyn ResourceCache>,
    ) -> Self {
        let robots = match robots::fetch_robots(client, base).await {
            Ok(robots) => robots,
            Err(e) => {
                tracing::warn!("Could not load robots.txt for {}, allowing all: {}", base, e);
                None
            }
        };

        Self::new(website, base, agent, cache).with_robots(robots)
    }

    /// Checks a link against the rules in order
    pub fn check(&self, candidate: &Url) -> Result<(), Rejection> {
        self.check_seed(candidate)?;

        if let Some(cache) = self.cache {
            if cache.contains(&self.website, candidate.as_str()) {
                return Err(Rejection::Cached);
            }
        }

        Ok(())
    }

    /// Checks the seed URL against the scheme, domain and robots.txt rules
    pub fn check_seed(&self, candidate: &Url) -> Result<(), Rejection> {
        if !matches!(candidate.scheme(), "http" | "https") {
            return Err(Rejection::Scheme);
        }

        match (&self.tld, top_level_domain(candidate)) {
            (Some(seed), Some(link)) if *seed == link => {}
            _ => return Err(Rejection::ForeignDomain),
        }

        if let Some(robots) = &self.robots {
            if !robots::is_allowed(robots, candidate.as_str(), &self.agent) {
                return Err(Rejection::Robots);
            }
        }

        Ok(())
    }

    /// Returns true if the link passes every rule
    pub fn allows(&self, candidate: &Url) -> bool {
        self.check(candidate).is_ok()
    }
}
