//! robots.txt rules of one host

use robotstxt::DefaultMatcher;

/// The robots.txt body of a seed host
///
/// Matching is delegated to robotstxt's Google-compatible matcher, run once
/// per candidate link.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    body: String,
}

impl ParsedRobots {
    pub fn from_content(content: &str) -> Self {
        Self {
            body: content.to_string(),
        }
    }

    /// Returns true if `url` may be fetched by the crawler named `product`
    ///
    /// `url` is absolute; `product` is the robots.txt product token, e.g.
    /// `odgovlt-harvester`. An empty body allows everything.
    pub fn is_allowed(&self, url: &str, product: &str) -> bool {
        if self.body.trim().is_empty() {
            return true;
        }

        DefaultMatcher::default().one_agent_allowed_by_robots(&self.body, product, url)
    }
}
