use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (e.g. `mailto:`), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use resource_scout::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the "top-level domain" used for same-site checks
///
/// This is the last two dot-separated labels of the lower-cased host, a coarse
/// approximation that groups `www.vkekk.lt` and `files.vkekk.lt` together. It
/// is not public-suffix aware.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use resource_scout::url::top_level_domain;
///
/// let url = Url::parse("http://www.Stat.gov.lt/page").unwrap();
/// assert_eq!(top_level_domain(&url), Some("gov.lt".to_string()));
/// ```
pub fn top_level_domain(url: &Url) -> Option<String> {
    let domain = extract_domain(url)?;
    let labels: Vec<&str> = domain.split('.').collect();
    let start = labels.len().saturating_sub(2);
    Some(labels[start..].join("."))
}
