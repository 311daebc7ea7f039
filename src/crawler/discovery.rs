//! Resource discovery from a single seed page
//!
//! [`Crawler::discover`] returns a [`Discovery`], which yields resources one
//! at a time. Nothing is fetched until the first call to [`Discovery::next`].
//!
//! For an HTML seed the page's links are filtered by the [`PolicyGate`] and
//! each admitted link is requested once; the resource is classified from the
//! response headers and the body is never read. A seed that is not HTML is
//! itself the only resource.
//!
//! Every failure is local: an unreachable seed yields nothing and an
//! unreachable link is skipped.

use crate::classify::{is_html, Classifier};
use crate::config::Config;
use crate::crawler::{build_http_client, extract_links, fetch, PolicyGate};
use crate::storage::{Resource, ResourceCache};
use crate::url::parse_seed;
use crate::ScoutError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::collections::VecDeque;
use url::Url;

/// Fetches seed pages and classifies the resources they link to
pub struct Crawler {
    client: Client,
    classifier: Classifier,
    robots_agent: String,
}

impl Crawler {
    /// Creates a crawler from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(ScoutError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScoutError> {
        Ok(Self {
            client: build_http_client(config)?,
            classifier: Classifier::new(&config.classifier),
            robots_agent: config.user_agent.crawler_name.clone(),
        })
    }

    /// Starts discovering the resources of one seed page
    ///
    /// `base_url` is also the website key under which the resources are
    /// cached. When `cache` is given, links already cached for this website
    /// are skipped.
    pub fn discover<'a>(
        &'a self,
        cache: Option<&'a dyn ResourceCache>,
        base_url: &str,
    ) -> Discovery<'a> {
        Discovery {
            crawler: self,
            cache,
            website: base_url.to_string(),
            state: State::Start,
        }
    }

    /// Returns the classifier used for fetched resources
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Requests a link and classifies it from the response headers
    async fn inspect(&self, website: &str, link: &Url) -> Result<Resource, ScoutError> {
        let response = fetch(&self.client, link).await?;
        let classification = self.classifier.classify(link, response.headers());
        Ok(Resource::new(website, link.as_str(), classification))
    }
}

enum State<'a> {
    Start,
    Single(Resource),
    Links {
        gate: PolicyGate<'a>,
        links: VecDeque<Url>,
    },
    Done,
}

/// Lazy, finite sequence of the resources found on one seed page
///
/// # Example
///
/// ```no_run
/// use resource_scout::{Config, Crawler};
///
/// # async fn run() -> Result<(), resource_scout::ScoutError> {
/// let crawler = Crawler::new(&Config::default())?;
/// let mut discovery = crawler.discover(None, "https://www.vkekk.lt/atviri-duomenys");
/// while let Some(resource) = discovery.next().await {
///     println!("{} {}", resource.file_type, resource.url);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Discovery<'a> {
    crawler: &'a Crawler,
    cache: Option<&'a dyn ResourceCache>,
    website: String,
    state: State<'a>,
}

impl<'a> Discovery<'a> {
    /// The website key of the resources this discovery yields
    pub fn website(&self) -> &str {
        &self.website
    }

    /// Yields the next resource, or `None` once the seed is exhausted
    pub async fn next(&mut self) -> Option<Resource> {
        loop {
            match std::mem::replace(&mut self.state, State::Done) {
                State::Start => self.state = self.start().await,
                State::Single(resource) => return Some(resource),
                State::Links { gate, mut links } => {
                    while let Some(link) = links.pop_front() {
                        if let Err(rejection) = gate.check(&link) {
                            tracing::debug!("Skipping {}: {}", link, rejection);
                            continue;
                        }

                        match self.crawler.inspect(&self.website, &link).await {
                            Ok(resource) => {
                                self.state = State::Links { gate, links };
                                return Some(resource);
                            }
                            Err(e) => tracing::warn!("Skipping {}: {}", link, e),
                        }
                    }
                    return None;
                }
                State::Done => return None,
            }
        }
    }

    /// Drains the sequence
    pub async fn collect(mut self) -> Vec<Resource> {
        let mut resources = Vec::new();
        while let Some(resource) = self.next().await {
            resources.push(resource);
        }
        resources
    }

    /// Loads robots.txt, fetches the seed, and decides what to yield
    async fn start(&self) -> State<'a> {
        let base = match parse_seed(&self.website) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Invalid seed URL '{}': {}", self.website, e);
                return State::Done;
            }
        };

        let crawler = self.crawler;
        let gate = PolicyGate::load(
            &crawler.client,
            &self.website,
            &base,
            &crawler.robots_agent,
            self.cache,
        )
        .await;

        if let Err(rejection) = gate.check_seed(&base) {
            tracing::info!("Not crawling {}: {}", base, rejection);
            return State::Done;
        }

        let response = match fetch(&crawler.client, &base).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch seed page {}: {}", base, e);
                return State::Done;
            }
        };

        let html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_html);

        if !html {
            let classification = crawler.classifier.classify(&base, response.headers());
            tracing::debug!("Seed {} is not HTML, yielding it as a resource", base);
            return State::Single(Resource::new(&self.website, base.as_str(), classification));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read seed page {}: {}", base, e);
                return State::Done;
            }
        };

        let links = extract_links(&body, &base);
        tracing::debug!("Found {} links on {}", links.len(), base);

        State::Links {
            gate,
            links: links.into(),
        }
    }
}
