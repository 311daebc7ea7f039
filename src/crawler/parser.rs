//! HTML parser for extracting links
//!
//! Every element carrying an `href` attribute contributes a candidate link,
//! in document order. Scheme and domain filtering is left to the policy gate.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all links from an HTML page, resolved against `base_url`
///
/// # Example
///
/// ```
/// use resource_scout::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/files/data.csv">Data</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/page").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links[0].as_str(), "https://example.com/files/data.csv");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL
///
/// Returns None for empty hrefs, same-page anchors, and hrefs that cannot be
/// resolved.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    base_url.join(href).ok()
}
